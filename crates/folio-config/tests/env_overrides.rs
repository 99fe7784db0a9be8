use figment::Jail;
use folio_config::{FolioConfig, TokenStorageKind};

#[test]
fn env_selects_api_base_url() {
    Jail::expect_with(|jail| {
        jail.set_env("FOLIO_API__BASE_URL", "https://api.example.org");

        let config = FolioConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.api.base_url, "https://api.example.org");
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".folio")?;
        jail.create_file(
            ".folio/config.toml",
            r#"
[session]
poll_interval_secs = 60
storage = "file"
"#,
        )?;
        jail.set_env("FOLIO_SESSION__POLL_INTERVAL_SECS", "5");
        jail.set_env("FOLIO_SESSION__STORAGE", "memory");

        let config = FolioConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.session.poll_interval_secs, 5);
        assert_eq!(config.session.storage, TokenStorageKind::Memory);
        Ok(())
    });
}

#[test]
fn zero_timeout_from_env_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("FOLIO_API__TIMEOUT_SECS", "0");

        let result = FolioConfig::load();
        assert!(result.is_err());
        Ok(())
    });
}
