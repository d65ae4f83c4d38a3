mod schema;
mod validation;

pub use schema::{Config, LeaderboardConfig, TemplateConfig};
pub use validation::validate_config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/game-ledger/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("game-ledger"))
}

/// Get the default config file path (~/.config/game-ledger/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path and
///   falls back to an empty config when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p.to_path_buf()
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                log::debug!(
                    "No config at {}, using defaults",
                    default_path.display()
                );
                return Ok(Config::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| {
            format!("Failed to parse config: invalid YAML in {}", config_path.display())
        })?;

    log::debug!(
        "Loaded config from {} ({} templates)",
        config_path.display(),
        config.templates.len()
    );
    Ok(config)
}

/// Resolve a template's path. Relative paths are taken from the directory of
/// `config_path` (or the default config directory when `None`).
pub fn resolve_template_path(
    config_path: Option<&Path>,
    template: &TemplateConfig,
) -> Result<PathBuf> {
    let path = PathBuf::from(&template.path);
    if path.is_absolute() {
        return Ok(path);
    }

    let base = match config_path.and_then(Path::parent) {
        Some(dir) => dir.to_path_buf(),
        None => get_config_dir()?,
    };
    Ok(base.join(path))
}
