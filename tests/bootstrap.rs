//! Bootstrap state machine scenarios against the recording transport.

mod common;

use common::{fixture, RecordingTransport};
use remote_sync_server::config::loader::ConfigError;
use remote_sync_server::config::Cli;
use remote_sync_server::lifecycle::startup::{run, BootstrapError};

fn cli_with_credentials(port: &str) -> Cli {
    Cli {
        log_level: Some(1),
        signed_cert_path: Some(fixture("server.crt").to_str().unwrap().to_string()),
        signed_key_path: Some(fixture("server.key").to_str().unwrap().to_string()),
        port: Some(port.to_string()),
        ..Cli::default()
    }
}

/// The end-to-end scenario: valid credentials, `--port 8443`,
/// `--logLevel 1`, no config file. The transport must be started on
/// `0.0.0.0:8443` with the anonymous identity and the raw credential
/// bytes, and the serve call must follow.
#[tokio::test]
async fn startup_reaches_the_serve_call() {
    let transport = RecordingTransport::default();
    let cli = cli_with_credentials("8443");

    run(&cli, &transport).await.unwrap();

    {
        let starts = transport.starts.lock().unwrap();
        assert_eq!(starts.len(), 1);

        let call = &starts[0];
        assert_eq!(call.address.to_string(), "0.0.0.0:8443");
        assert_eq!(call.identity, "anonymous");
        assert_eq!(call.cert, std::fs::read(fixture("server.crt")).unwrap());
        assert_eq!(call.key, std::fs::read(fixture("server.key")).unwrap());
    }
    assert_eq!(transport.serve_count(), 1);
}

#[tokio::test]
async fn nonexistent_config_file_never_starts_the_server() {
    let transport = RecordingTransport::default();
    let mut cli = cli_with_credentials("8443");
    cli.config = Some("/nonexistent/remote-sync.toml".to_string());

    let err = run(&cli, &transport).await.unwrap_err();

    assert!(matches!(err, BootstrapError::Config(_)));
    assert_eq!(transport.start_count(), 0);
    assert_eq!(transport.serve_count(), 0);
}

#[tokio::test]
async fn mismatched_credentials_never_reach_the_serve_step() {
    let transport = RecordingTransport::default();
    let mut cli = cli_with_credentials("8443");
    cli.signed_key_path = Some(fixture("other.key").to_str().unwrap().to_string());

    let err = run(&cli, &transport).await.unwrap_err();

    assert!(matches!(err, BootstrapError::Credentials(_)));
    assert_eq!(transport.start_count(), 0);
    assert_eq!(transport.serve_count(), 0);
}

#[tokio::test]
async fn missing_port_is_fatal_before_start() {
    let transport = RecordingTransport::default();
    let mut cli = cli_with_credentials("8443");
    cli.port = None;

    let err = run(&cli, &transport).await.unwrap_err();

    assert!(matches!(
        err,
        BootstrapError::Config(ConfigError::InvalidValue { key: "port", .. })
    ));
    assert_eq!(transport.start_count(), 0);
}

#[tokio::test]
async fn port_zero_is_fatal_before_start() {
    let transport = RecordingTransport::default();
    let cli = cli_with_credentials("0");

    let err = run(&cli, &transport).await.unwrap_err();

    assert!(matches!(err, BootstrapError::Config(_)));
    assert_eq!(transport.start_count(), 0);
}

#[tokio::test]
async fn serve_failure_surfaces_as_a_serve_error() {
    let transport = RecordingTransport::failing();
    let cli = cli_with_credentials("8443");

    let err = run(&cli, &transport).await.unwrap_err();

    assert!(matches!(err, BootstrapError::Serve(_)));
    assert_eq!(transport.serve_count(), 1);
}
