use std::io::Write;
use std::sync::Mutex;

use scene_core::config::*;
use scene_core::errors::ConfigError;

// Tests that touch SCENE_* variables must not interleave.
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = SceneConfig::from_toml("").unwrap();

    // Reconcile defaults
    assert!(config.reconcile.prune_dangling);
    assert_eq!(config.reconcile.equal_stamp_policy, EqualStampPolicy::PreferLocal);
    assert_eq!(config.reconcile.max_repair_passes, 64);

    // Validation defaults
    assert!(config.validation.check_record_shape);
    assert!(config.validation.check_groups);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[reconcile]
equal_stamp_policy = "canonical"
max_repair_passes = 8

[observability]
json = true
"#;
    let config = SceneConfig::from_toml(toml).unwrap();
    assert_eq!(config.reconcile.equal_stamp_policy, EqualStampPolicy::Canonical);
    assert_eq!(config.reconcile.max_repair_passes, 8);
    // Non-overridden fields keep defaults
    assert!(config.reconcile.prune_dangling);
    assert!(config.observability.json);
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn config_rejects_zero_repair_passes() {
    let err = SceneConfig::from_toml("[reconcile]\nmax_repair_passes = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "reconcile.max_repair_passes"));
}

#[test]
fn config_rejects_runaway_repair_passes() {
    let err = SceneConfig::from_toml("[reconcile]\nmax_repair_passes = 100000\n").unwrap_err();
    assert!(err.to_string().contains("100000"));
}

#[test]
fn config_rejects_unknown_log_level() {
    let err = SceneConfig::from_toml("[observability]\nlog_level = \"loud\"\n").unwrap_err();
    assert!(err.to_string().contains("loud"));
}

#[test]
fn config_rejects_malformed_toml() {
    let err = SceneConfig::from_toml("[reconcile\nprune_dangling = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn config_serializes_round_trip() {
    let mut config = SceneConfig::default();
    config.reconcile.equal_stamp_policy = EqualStampPolicy::Canonical;
    let text = toml::to_string(&config).unwrap();
    assert!(text.contains("equal_stamp_policy = \"canonical\""));
    let back = SceneConfig::from_toml(&text).unwrap();
    assert_eq!(back.reconcile.equal_stamp_policy, EqualStampPolicy::Canonical);
}

#[test]
fn equal_stamp_policy_parses_aliases() {
    assert_eq!("local".parse::<EqualStampPolicy>().unwrap(), EqualStampPolicy::PreferLocal);
    assert_eq!(" Canonical ".parse::<EqualStampPolicy>().unwrap(), EqualStampPolicy::Canonical);
    assert!("random".parse::<EqualStampPolicy>().is_err());
}

#[test]
fn load_reads_file_then_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[reconcile]\nprune_dangling = false\nmax_repair_passes = 3").unwrap();

    std::env::set_var("SCENE_MAX_REPAIR_PASSES", "12");
    std::env::set_var("SCENE_LOG_LEVEL", "DEBUG");
    let config = SceneConfig::load(Some(file.path()));
    std::env::remove_var("SCENE_MAX_REPAIR_PASSES");
    std::env::remove_var("SCENE_LOG_LEVEL");

    let config = config.unwrap();
    assert!(!config.reconcile.prune_dangling);
    assert_eq!(config.reconcile.max_repair_passes, 12);
    assert_eq!(config.observability.log_level, "debug");
}

#[test]
fn load_without_file_uses_defaults() {
    let _guard = ENV_LOCK.lock().unwrap();
    let config = SceneConfig::load(None).unwrap();
    assert_eq!(config.reconcile.max_repair_passes, 64);
}

#[test]
fn load_missing_file_is_reported() {
    let _guard = ENV_LOCK.lock().unwrap();
    let err = SceneConfig::load(Some(std::path::Path::new("/nonexistent/scene.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn load_rejects_bad_env_boolean() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("SCENE_PRUNE_DANGLING", "sometimes");
    let result = SceneConfig::load(None);
    std::env::remove_var("SCENE_PRUNE_DANGLING");
    assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
}
