use std::path::Path;
use std::process::{Command, Output};

/// Bytes written as a test image. The CLI never decodes them.
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

/// Run the CLI against an isolated data directory.
pub fn run_cli(args: &[&str], data_dir: &Path, environment: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_snapjournal"));
    cmd.args(args);
    cmd.env("SNAPJOURNAL_DATA_DIR", data_dir);
    cmd.env("SNAPJOURNAL_ENVIRONMENT", environment);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("SNAPJOURNAL_BRIDGE_PLATFORM");
    cmd.env_remove("SNAPJOURNAL_BROWSER_GLOBALS");
    cmd.env_remove("SNAPJOURNAL_ORIGIN");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], data_dir: &Path, environment: &str) -> String {
    let output = run_cli(args, data_dir, environment);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Write a test image into `dir` and return its path as a string.
pub fn write_image(dir: &Path, name: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, JPEG_BYTES).expect("Failed to write test image");
    path.to_string_lossy().to_string()
}

/// Capture an image and return the new photo's id.
pub fn capture(data_dir: &Path, environment: &str, image: &str, title: &str) -> String {
    let stdout = run_cli_success(
        &["capture", "--file", image, "--title", title],
        data_dir,
        environment,
    );
    stdout
        .lines()
        .next()
        .expect("capture printed nothing")
        .trim()
        .to_string()
}

/// Listed photos as JSON values, newest first.
pub fn list(data_dir: &Path, environment: &str) -> Vec<serde_json::Value> {
    run_cli_success(&["list"], data_dir, environment)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("list printed invalid JSON"))
        .collect()
}
