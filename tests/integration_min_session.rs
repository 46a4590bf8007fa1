// Drives the compiled binary through a PTY, exercising the real event loop
// and crossterm input handling.
//
// Requires a TTY; expectrl allocates a pseudo terminal. Unix-only and
// ignored by default. Run with:
// `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_session_wins_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("endgame");
    let log = tempfile::tempdir()?;
    let cmd = format!(
        "{} -w hi --no-confetti --log-file {}",
        bin.display(),
        log.path().join("endgame.log").display()
    );

    let mut p = spawn(cmd)?;

    // let the app enter the alternate screen
    std::thread::sleep(Duration::from_millis(200));

    p.send("hi")?;
    std::thread::sleep(Duration::from_millis(200));

    p.send("\x1b")?; // ESC

    p.expect(Eof)?;
    Ok(())
}
