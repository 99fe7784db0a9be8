//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed cwd and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use folio_config::{FolioConfig, TokenStorageKind};
use pretty_assertions::assert_eq;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://api.portfolio.example"
timeout_secs = 15

[session]
poll_interval_secs = 10
warning_threshold_secs = 120
storage = "memory"

[admin]
default_author = "Dr. Ada"
page_size = 25
"#,
        )?;

        let config: FolioConfig = Figment::from(Serialized::defaults(FolioConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.api.base_url, "https://api.portfolio.example");
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.session.poll_interval_secs, 10);
        assert_eq!(config.session.warning_threshold_secs, 120);
        assert_eq!(config.session.storage, TokenStorageKind::Memory);
        assert_eq!(config.admin.default_author, "Dr. Ada");
        assert_eq!(config.admin.page_size, 25);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".folio")?;
        jail.create_file(
            ".folio/config.toml",
            r#"
[api]
base_url = "http://127.0.0.1:9000"
"#,
        )?;

        let config = FolioConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.api.timeout_secs, 90);
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[session]
storage = "keyring"
"#,
        )?;

        let config: FolioConfig = Figment::from(Serialized::defaults(FolioConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.session.storage, TokenStorageKind::Keyring);
        assert_eq!(config.session.poll_interval_secs, 30);
        assert_eq!(config.admin.page_size, 10);
        Ok(())
    });
}

#[test]
fn invalid_values_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "file:///etc/passwd"
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(FolioConfig::default()))
            .merge(Toml::file("config.toml"));
        let result = FolioConfig::from_figment(figment);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("api.base_url"));
        Ok(())
    });
}
