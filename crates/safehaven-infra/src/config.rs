//! Configuration loader for SafeHaven.
//!
//! Reads `config.toml` from the data directory (`~/.safehaven/` in production)
//! and deserializes it into [`HavenConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use safehaven_types::config::HavenConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "SAFEHAVEN_DATA_DIR";

/// Resolve the data directory: `SAFEHAVEN_DATA_DIR`, else `~/.safehaven`.
pub fn resolve_data_dir() -> PathBuf {
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".safehaven"),
    }
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`HavenConfig::default()`].
/// - Unreadable or unparseable file: logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> HavenConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return HavenConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return HavenConfig::default();
        }
    };

    match toml::from_str::<HavenConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            HavenConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config, HavenConfig::default());
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
api_base_url = "https://haven.example.org/api"
remote_timeout_ms = 1500

[chat]
model = "gemini-2.0-flash"
api_key_env = "GEMINI_API_KEY"
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.api_base_url, "https://haven.example.org/api");
        assert_eq!(config.remote_timeout_ms, 1500);
        assert_eq!(config.aid_submit_delay_ms, 800);
        assert_eq!(config.chat.model, "gemini-2.0-flash");
        assert_eq!(config.chat.api_key_env, "GEMINI_API_KEY");
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "remote_timeout_ms = \"soon\" {{")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config, HavenConfig::default());
    }
}
