//! Log sink destination selection and threshold behavior.

use std::io::Write;
use std::path::PathBuf;

use tracing::Level;

use remote_sync_server::config::Settings;
use remote_sync_server::observability::logging::{
    self, level_for, open_log_file, LogConfig, LogDestination, LogInitError,
};

#[test]
fn threshold_mapping_is_monotonic_and_exhaustive() {
    assert_eq!(level_for(0), Level::INFO);
    assert_eq!(level_for(1), Level::DEBUG);
    assert_eq!(level_for(2), Level::TRACE);
    assert_eq!(level_for(100), Level::TRACE);
}

#[test]
fn empty_and_dash_paths_select_stdout() {
    assert_eq!(LogDestination::from_path(""), LogDestination::Stdout);
    assert_eq!(LogDestination::from_path("-"), LogDestination::Stdout);
}

#[test]
fn other_paths_select_a_file() {
    assert_eq!(
        LogDestination::from_path("/var/log/remote-sync.log"),
        LogDestination::File(PathBuf::from("/var/log/remote-sync.log"))
    );
}

#[test]
fn log_config_follows_settings() {
    let settings = Settings {
        log_path: "-".to_string(),
        log_level: 1,
        ..Settings::default()
    };

    let config = LogConfig::from_settings(&settings);

    assert_eq!(config.destination, LogDestination::Stdout);
    assert_eq!(config.threshold, 1);
}

#[test]
fn file_destination_is_created_on_init() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("remote-sync.log");
    let config = LogConfig {
        destination: LogDestination::File(path.clone()),
        threshold: 1,
    };

    logging::init(&config).unwrap();

    assert!(path.exists());
}

#[test]
fn unopenable_destination_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = LogConfig {
        // A directory cannot be opened for appending.
        destination: LogDestination::File(dir.path().to_path_buf()),
        threshold: 0,
    };

    let err = logging::init(&config).unwrap_err();

    assert!(matches!(err, LogInitError::OpenLogFile { .. }));
}

#[test]
fn log_file_opens_in_append_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("remote-sync.log");

    {
        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "first line").unwrap();
    }
    {
        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "second line").unwrap();
    }

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("first line"));
    assert!(contents.contains("second line"));
}
