use signup_domain::config::LoggingConfig;
use signup_logger::{Logger, LoggerError};

// Runs in its own test binary: the global subscriber can be installed once per process.
#[test]
fn second_logger_in_one_process_is_rejected() {
    let console_only = LoggingConfig { level: "debug".into(), ..LoggingConfig::default() };

    let first = Logger::from_config("signup-cli", &console_only).expect("first logger installs");
    assert!(first.guard().is_none());

    let err = Logger::from_config("signup-worker", &console_only).expect_err("subscriber already set");
    assert!(matches!(err, LoggerError::Subscriber { .. }), "got {err}");
}
