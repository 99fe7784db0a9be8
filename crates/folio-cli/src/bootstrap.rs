use std::path::{Path, PathBuf};

use anyhow::Context;
use folio_config::FolioConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, the layered config, then apply `--api-url`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<FolioConfig> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    load_dotenv(&cwd)?;

    let mut config = FolioConfig::load().context("failed to load folio configuration")?;
    apply_overrides(&mut config, flags)?;
    Ok(config)
}

fn apply_overrides(config: &mut FolioConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    if let Some(url) = &flags.api_url {
        config.api.base_url.clone_from(url);
        config
            .validate()
            .with_context(|| format!("invalid --api-url '{url}'"))?;
    }
    Ok(())
}

/// `.env` next to the project config wins over one in the working directory.
fn load_dotenv(root: &Path) -> anyhow::Result<()> {
    for candidate in dotenv_candidates(root) {
        if candidate.exists() {
            dotenvy::from_path(&candidate)
                .with_context(|| format!("failed to load dotenv file at {}", candidate.display()))?;
            tracing::debug!(path = %candidate.display(), "loaded dotenv");
            return Ok(());
        }
    }
    Ok(())
}

fn dotenv_candidates(root: &Path) -> [PathBuf; 2] {
    [root.join(".folio").join(".env"), root.join(".env")]
}
