//! Grid conventions of a map
//!
//! NS maps have flat top and bottom edges with rows doubled; EW maps have
//! pointed tops with columns doubled. The orientation fixes which coordinate
//! lies across each hex side and how hex names translate to coordinates.

use anyhow::{anyhow, bail, Context, Result};
use std::f64::consts::PI;

use super::hex_side::HexSide;
use super::types::HexCoordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileOrientation {
    NS,
    EW,
}

const NS_ROW_DELTAS: [i32; 6] = [2, 1, -1, -2, -1, 1];
const NS_COL_DELTAS: [i32; 6] = [0, -1, -1, 0, 1, 1];
const EW_ROW_DELTAS: [i32; 6] = [1, 0, -1, -1, 0, 1];
const EW_COL_DELTAS: [i32; 6] = [-1, -2, -1, 1, 2, 1];

const SQRT3: f64 = 1.732_050_807_568_877_2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapOrientation {
    orientation: TileOrientation,
    /// Letters index columns when true, rows otherwise
    letters_go_horizontal: bool,
    letter_a_has_even_numbers: bool,
}

impl MapOrientation {
    pub fn new(
        orientation: TileOrientation,
        letters_go_horizontal: bool,
        letter_a_has_even_numbers: bool,
    ) -> Self {
        Self {
            orientation,
            letters_go_horizontal,
            letter_a_has_even_numbers,
        }
    }

    /// Builds the orientation from the map's `tileOrientation`,
    /// `letterOrientation` and `even` attributes
    pub fn create(
        tile_orientation: Option<&str>,
        letter_orientation: Option<&str>,
        even: Option<&str>,
    ) -> Result<Self> {
        let orientation = match tile_orientation.map(str::trim) {
            Some("NS") => TileOrientation::NS,
            Some("EW") => TileOrientation::EW,
            Some(other) => bail!("Invalid tile orientation '{other}'"),
            None => bail!("Map orientation undefined"),
        };
        let letters_go_horizontal = match letter_orientation.map(str::trim) {
            Some("horizontal") => true,
            Some("vertical") => false,
            Some(other) => bail!("Invalid letter orientation '{other}'"),
            None => bail!("Letter orientation undefined"),
        };
        let even = even
            .map(str::trim)
            .ok_or_else(|| anyhow!("Map attribute 'even' undefined"))?;
        let first = even
            .chars()
            .next()
            .filter(char::is_ascii_alphabetic)
            .ok_or_else(|| anyhow!("Invalid value for 'even': '{even}'"))?;
        let letter_a_has_even_numbers = (first.to_ascii_uppercase() as u8 - b'A') % 2 == 0;

        Ok(Self::new(orientation, letters_go_horizontal, letter_a_has_even_numbers))
    }

    pub fn orientation(&self) -> TileOrientation {
        self.orientation
    }

    pub fn letters_go_horizontal(&self) -> bool {
        self.letters_go_horizontal
    }

    pub fn letter_a_has_even_numbers(&self) -> bool {
        self.letter_a_has_even_numbers
    }

    /// The coordinate across `side` from `origin`
    pub fn get_adjacent_coordinates(&self, origin: HexCoordinates, side: HexSide) -> HexCoordinates {
        let index = side.number() as usize;
        match self.orientation {
            TileOrientation::NS => origin.translate(NS_ROW_DELTAS[index], NS_COL_DELTAS[index]),
            TileOrientation::EW => origin.translate(EW_ROW_DELTAS[index], EW_COL_DELTAS[index]),
        }
    }

    /// Translates a hex name such as `B3` or `AA12` into coordinates
    pub fn parse_hex_name(&self, name: &str) -> Result<HexCoordinates> {
        let split = name
            .find(|c: char| !c.is_ascii_uppercase())
            .ok_or_else(|| anyhow!("Hex name '{name}' has no number"))?;
        let (letters, digits) = name.split_at(split);
        if letters.is_empty() {
            bail!("Hex name '{name}' has no letter");
        }
        let letter = letters
            .bytes()
            .try_fold(0i32, |acc, byte| {
                acc.checked_mul(26)?.checked_add(i32::from(byte - b'A' + 1))
            })
            .ok_or_else(|| anyhow!("Hex name '{name}' has too many letters"))?;
        let number: i32 = digits
            .parse()
            .with_context(|| format!("Invalid number in hex name '{name}'"))?;

        let parity = if self.letter_a_has_even_numbers { 1 } else { 0 };
        if (letter.rem_euclid(2) + number.rem_euclid(2)) % 2 != parity {
            bail!("Hex name '{name}' does not exist on this grid");
        }

        Ok(if self.letters_go_horizontal {
            HexCoordinates::new(number, letter)
        } else {
            HexCoordinates::new(letter, number)
        })
    }

    /// The inverse of [`MapOrientation::parse_hex_name`]
    pub fn hex_name(&self, coordinates: HexCoordinates) -> String {
        let (mut letter, number) = if self.letters_go_horizontal {
            (coordinates.col, coordinates.row)
        } else {
            (coordinates.row, coordinates.col)
        };
        let mut letters = Vec::new();
        while letter > 0 {
            let rem = (letter - 1) % 26;
            letters.push((b'A' + rem as u8) as char);
            letter = (letter - 1) / 26;
        }
        letters.reverse();
        format!("{}{}", letters.into_iter().collect::<String>(), number)
    }

    /// Angle at which a tile laid with `rotation` is drawn
    pub fn rotation_in_radians(&self, rotation: HexSide) -> f64 {
        let steps = rotation.number() as f64;
        match self.orientation {
            TileOrientation::NS => steps * PI / 3.0,
            TileOrientation::EW => (steps + 0.5) * PI / 3.0,
        }
    }

    /// Pixel centre of a hex whose corner radius is `size`
    pub fn hex_center(&self, coordinates: HexCoordinates, size: f64) -> (f64, f64) {
        let row = coordinates.row as f64;
        let col = coordinates.col as f64;
        match self.orientation {
            TileOrientation::NS => (col * 1.5 * size, row * SQRT3 / 2.0 * size),
            TileOrientation::EW => (col * SQRT3 / 2.0 * size, row * 1.5 * size),
        }
    }

    /// Pixel corners of a hex, clockwise
    pub fn hex_vertices(&self, coordinates: HexCoordinates, size: f64) -> [(f64, f64); 6] {
        let (cx, cy) = self.hex_center(coordinates, size);
        let offset = match self.orientation {
            TileOrientation::NS => 0.0,
            TileOrientation::EW => PI / 6.0,
        };
        std::array::from_fn(|corner| {
            let angle = offset + corner as f64 * PI / 3.0;
            (cx + size * angle.cos(), cy + size * angle.sin())
        })
    }
}
