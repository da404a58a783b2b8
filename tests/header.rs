use std::process::Command;

#[test]
fn test_generated_header() {
    let output = Command::new(env!("CARGO_BIN_EXE_ppm-ticks")).env_remove("RUST_LOG").output().unwrap();
    assert!(output.status.success());
    let expected = "\
        /* This file is generated - do not change it manually! */\n\
        #ifndef __ppm_ticks__\n\
        #define __ppm_ticks__\n\
        #define IN_MIN_TICKS 1130\n\
        #define IN_MAX_TICKS 2260\n\
        #define MID_TICKS 1695\n\
        #define OUT_MIN_TICKS 621\n\
        #define OUT_MAX_TICKS 2994\n\
        #endif\n";
    assert_eq!(expected, String::from_utf8_lossy(&output.stdout));
    assert!(output.stderr.is_empty());
}

#[test]
fn test_debug_log_on_stderr() {
    let output = Command::new(env!("CARGO_BIN_EXE_ppm-ticks")).env("RUST_LOG", "debug").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 9);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("of MID is 1695 ticks"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_write_failure_exit_status() {
    use std::fs::File;
    use std::process::Stdio;

    let full = File::create("/dev/full").unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_ppm-ticks"))
        .env_remove("RUST_LOG")
        .stdout(Stdio::from(full))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR"));
    assert!(stderr.contains("Write header failed"));
}
