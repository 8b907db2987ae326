use std::process::{Command, Output, Stdio};

/// Resource path the mock upstream serves.
pub const RESOURCE: &str = "/resource/vw6y-z8j6.json";

/// Run the CLI binary with arguments against `endpoint`.
///
/// Colors are disabled so assertions can match plain text.
pub fn run_cli(args: &[&str], endpoint: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_radius-watch"));
    cmd.args(args);
    cmd.env("RADIUS_WATCH_ENDPOINT", endpoint);
    cmd.env_remove("RADIUS_WATCH_APP_TOKEN");
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd.env("CLICOLOR", "0");
    cmd.stdin(Stdio::null());
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI off the async runtime so the mock server keeps serving.
pub async fn run_cli_async(args: &[&str], endpoint: &str) -> Output {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let endpoint = endpoint.to_string();
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli(&args, &endpoint)
    })
    .await
    .expect("CLI task panicked")
}

/// Assert success and return stdout.
pub fn success(output: &Output) -> String {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed\nstderr: {}", stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}
