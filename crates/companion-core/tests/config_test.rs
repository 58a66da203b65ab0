//! Config loading: TOML parsing, defaults, validation.

use companion_core::config::{CompanionConfig, GateConfig};
use companion_core::{CompanionError, CompanionErrorCode, PageId};

#[test]
fn empty_toml_yields_defaults() {
    let config = CompanionConfig::from_toml("").unwrap();
    assert_eq!(config.gate, GateConfig::default());
    assert_eq!(config.gate.trial_length_days, 10);
    assert_eq!(config.gate.local_flag_key, "disclaimer_agreed");
    assert_eq!(config.gate.anonymous_landing, PageId::Disclaimer);
    assert_eq!(config.gate.authenticated_home, PageId::Dashboard);
    assert!(config.storage.db_path.is_none());
    assert_eq!(config.observability.log_filter, "info");
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let config = CompanionConfig::from_toml(
        r#"
        [gate]
        trial_length_days = 14

        [storage]
        db_path = "/var/lib/companion/companion.db"
        "#,
    )
    .unwrap();
    assert_eq!(config.gate.trial_length_days, 14);
    assert_eq!(config.gate.local_flag_key, "disclaimer_agreed");
    assert_eq!(
        config.storage.db_path.as_deref(),
        Some("/var/lib/companion/companion.db")
    );
    assert_eq!(config.storage.busy_timeout_ms, 5000);
    assert!(config.storage.separate_reader);
}

#[test]
fn protected_anonymous_landing_is_rejected() {
    let err = CompanionConfig::load(
        r#"
        [gate]
        anonymous_landing = "Journal"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, CompanionError::Config(_)));
    assert_eq!(err.error_code(), "CONFIG_ERROR");
    assert!(err.to_string().contains("Journal"));
}

#[test]
fn onboarding_home_is_rejected() {
    let gate = GateConfig {
        authenticated_home: PageId::Welcome,
        ..GateConfig::default()
    };
    let err = gate.validate().unwrap_err();
    assert!(matches!(err, CompanionError::Config(_)));
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

#[test]
fn negative_trial_length_is_config_error() {
    let err = CompanionConfig::load(
        r#"
        [gate]
        trial_length_days = -1
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, CompanionError::Config(msg) if msg.contains("trial_length_days")));
}

#[test]
fn malformed_toml_is_config_error() {
    let err = CompanionConfig::load("[gate\ntrial_length_days = ").unwrap_err();
    assert!(matches!(err, CompanionError::Config(_)));
}

#[test]
fn welcome_landing_is_allowed() {
    let config = CompanionConfig::load(
        r#"
        [gate]
        anonymous_landing = "Welcome"
        "#,
    )
    .unwrap();
    assert_eq!(config.gate.anonymous_landing, PageId::Welcome);
}
