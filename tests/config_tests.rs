use std::time::Duration;
use swarm_bridge::common::ApplicationError;
use swarm_bridge::Config;
use tempfile::tempdir;

#[test]
fn test_defaults_match_simulator_conventions() {
    let config = Config::default();

    assert_eq!(config.simulator.endpoint(), "127.0.0.1:19997");
    assert_eq!(config.simulator.connect_timeout(), Duration::from_millis(5000));
    assert_eq!(config.channel.outbound_stream, "signal");
    assert_eq!(config.channel.inbound_stream, "reply_signal");
    assert_eq!(config.channel.poll_policy().timeout, Some(Duration::from_secs(2)));
}

#[test]
fn test_partial_file_falls_back_to_defaults() {
    let config = Config::from_toml(
        r#"
[simulator]
port = 20000

[channel]
reply_timeout_ms = 0
"#,
    )
    .unwrap();

    assert_eq!(config.simulator.host, "127.0.0.1");
    assert_eq!(config.simulator.port, 20000);
    assert_eq!(config.channel.poll_policy().timeout, None);
    assert_eq!(config.channel.poll_policy().max_backoff, Duration::from_millis(50));
    assert_eq!(config.demo.robot_count, 3);
}

#[test]
fn test_invalid_values_are_rejected() {
    assert!(Config::from_toml("[logging]\nlevel = \"loud\"\n").is_err());
    assert!(Config::from_toml("[channel]\ninbound_stream = \"\"\n").is_err());
    assert!(Config::from_toml("[simulator]\nport = \"not a port\"\n").is_err());
}

#[tokio::test]
async fn test_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[logging]\nlevel = \"debug\"\nfile = \"swarm.log\"\n\n[demo]\nrobot_count = 10\n",
    )
    .unwrap();

    let config = Config::from_file(&path).await.unwrap();
    assert_eq!(config.logging.level_filter().unwrap(), log::LevelFilter::Debug);
    assert_eq!(config.logging.file.as_deref(), Some("swarm.log"));
    assert_eq!(config.demo.robot_count, 10);

    assert!(Config::from_file(dir.path().join("missing.toml")).await.is_err());
}

#[test]
fn test_robot_count_must_fit_uid_range() {
    let config = Config::from_toml("[demo]\nrobot_count = 4\n").unwrap();
    assert_eq!(config.demo.uids().unwrap(), 0..4);

    assert!(Config::from_toml("[demo]\nrobot_count = 3000000000\n").is_err());
}

#[tokio::test]
async fn test_load_falls_back_to_defaults_when_missing() {
    let dir = tempdir().unwrap();

    let config = Config::load(dir.path().join("absent.toml")).await.unwrap();

    assert_eq!(config.simulator.port, 19997);
    assert_eq!(config.demo.uids().unwrap(), 0..3);
}

#[tokio::test]
async fn test_load_reports_configuration_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();

    let err = Config::load(&path).await.unwrap_err();

    assert!(matches!(err, ApplicationError::Configuration(_)));
    assert!(err.to_string().contains("loud"));
}
