use std::process::Command;

/// Test that the binary loads the demo board and logs its topology
#[test]
fn test_demo_board_summary() {
    let output = Command::new(env!("CARGO_BIN_EXE_hexrail"))
        .env("RUST_LOG", "info")
        .output()
        .expect("Failed to execute hexrail");

    assert!(
        output.status.success(),
        "hexrail failed on the demo board. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("MAP SUMMARY"), "Missing summary. stderr: {}", stderr);
    assert!(stderr.contains("Hexes: 11"), "Wrong hex count. stderr: {}", stderr);
    assert!(
        stderr.contains("City distances from A2: [1, 3, 4]"),
        "Missing city distances. stderr: {}",
        stderr
    );
}

/// Test that a distance query between two named hexes is answered
#[test]
fn test_distance_query() {
    let output = Command::new(env!("CARGO_BIN_EXE_hexrail"))
        .args(["--from", "A2", "--to", "C4"])
        .env("RUST_LOG", "info")
        .output()
        .expect("Failed to execute hexrail");

    assert!(output.status.success(), "hexrail failed to run");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Distance A2 -> C4: 3"),
        "Missing distance line. stderr: {}",
        stderr
    );
}

/// Test that an unknown hex name makes the binary fail with a message
#[test]
fn test_unknown_hex_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_hexrail"))
        .args(["--from", "Z9"])
        .output()
        .expect("Failed to execute hexrail");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown hex Z9"), "stderr: {}", stderr);
}
