use super::*;

#[test]
fn default_config_uses_yaml_output() {
    let config = AppConfig::default();
    assert_eq!(config.output(), OutputFormat::Yaml);
    assert_eq!(config.general.log_level, "info");
    assert!(config.kubeconfig.paths.is_empty());
}

#[test]
fn parse_general_from_toml() {
    let raw = r#"
[general]
output = "json"
log-level = "debug"
"#;
    let config: AppConfig = toml::from_str(raw).unwrap();
    assert_eq!(config.output(), OutputFormat::Json);
    assert_eq!(config.general.log_level, "debug");
}

#[test]
fn partial_toml_keeps_general_defaults() {
    let raw = r#"
[general]
output = "json"
"#;
    let config: AppConfig = toml::from_str(raw).unwrap();
    assert_eq!(config.general.log_level, "info");
}

#[test]
fn user_paths_replace_defaults() {
    let mut base = AppConfig::default();
    let user: AppConfig = toml::from_str("[kubeconfig]\npaths = [\"/etc/kube/a\", \"/etc/kube/b\"]\n").unwrap();
    base.merge(user);
    assert_eq!(base.kubeconfig.paths, vec![PathBuf::from("/etc/kube/a"), PathBuf::from("/etc/kube/b")]);
}

#[test]
fn empty_user_paths_keep_previous() {
    let mut base = AppConfig::default();
    base.kubeconfig.paths = vec![PathBuf::from("/etc/kube/a")];
    let user: AppConfig = toml::from_str("[general]\noutput = \"yaml\"\n").unwrap();
    base.merge(user);
    assert_eq!(base.kubeconfig.paths, vec![PathBuf::from("/etc/kube/a")]);
}

#[test]
fn unknown_output_format_is_rejected() {
    assert!(toml::from_str::<AppConfig>("[general]\noutput = \"xml\"\n").is_err());
}

#[test]
fn load_from_reads_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[general]\noutput = \"json\"\n").unwrap();
    let config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config.output(), OutputFormat::Json);
}

#[test]
fn load_from_missing_file_errors() {
    let dir = tempfile::TempDir::new().unwrap();
    assert!(AppConfig::load_from(&dir.path().join("missing.toml")).is_err());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let mut config = AppConfig::default();
    config.general.output = OutputFormat::Json;
    config.kubeconfig.paths = vec![PathBuf::from("/tmp/kube")];
    config.save(&path).unwrap();

    let loaded = AppConfig::load_from(&path).unwrap();
    assert_eq!(loaded.output(), OutputFormat::Json);
    assert_eq!(loaded.kubeconfig.paths, vec![PathBuf::from("/tmp/kube")]);
}

#[test]
fn init_refuses_to_overwrite() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    AppConfig::init_at(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    assert!(AppConfig::init_at(&path).is_err());
}
