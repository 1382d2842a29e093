use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod user_prompts;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use user_prompts::prompt_for_team_url;
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// URL of the team profile page to scrape. Should include https:// prefix.
    pub team_page_url: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for page requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Cache window in seconds for video manifest lookups. Unset means every
    /// "load video" activation re-fetches the game page, so a live stream's
    /// changing manifest URL is never served stale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_cache_seconds: Option<u64>,
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            team_page_url: String::new(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            video_cache_seconds: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// If no config file exists, prompts user for the team page URL and
    /// creates one. Environment variables override config file values.
    ///
    /// # Environment Variables
    /// - `COURTSIDE_TEAM_URL` - Override team page URL
    /// - `COURTSIDE_LOG_FILE` - Override log file path
    /// - `COURTSIDE_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            let content = fs::read_to_string(&config_path).await?;
            toml::from_str(&content)?
        } else if let Ok(team_page_url) = std::env::var(crate::constants::env_vars::TEAM_URL) {
            Config {
                team_page_url,
                ..Config::default()
            }
        } else {
            let team_page_url = prompt_for_team_url().await?;

            let config = Config {
                team_page_url,
                ..Config::default()
            };

            config.save().await?;
            config
        };

        // Override with environment variables if present
        if let Ok(team_page_url) = std::env::var(crate::constants::env_vars::TEAM_URL) {
            config.team_page_url = team_page_url;
        }

        if let Ok(log_file_path) = std::env::var(crate::constants::env_vars::LOG_FILE) {
            config.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(crate::constants::env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.http_timeout_seconds = timeout;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(&self.team_page_url, &self.log_file_path)
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if Path::new(&config_path).exists() {
            let config = Config::load().await?;
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            println!("────────────────────────────────────");
            println!("Team Page URL:");
            println!("{}", config.team_page_url);
            println!("────────────────────────────────────");
            println!("HTTP Timeout:");
            println!("{} seconds", config.http_timeout_seconds);
            println!("────────────────────────────────────");
            println!("Video Cache:");
            match config.video_cache_seconds {
                Some(seconds) => println!("{seconds} seconds"),
                None => println!("disabled (re-fetch on every load)"),
            }
            println!("────────────────────────────────────");
            println!("Log File Location:");
            if let Some(custom_path) = &config.log_file_path {
                println!("{custom_path}");
            } else {
                println!("{log_dir}/courtside.log");
                println!("(Default location)");
            }
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path. Creates the parent
    /// directory if it doesn't exist and normalizes the team page URL to an
    /// https:// prefix.
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let team_page_url = if !self.team_page_url.starts_with("https://") {
            format!(
                "https://{}",
                self.team_page_url.trim_start_matches("http://")
            )
        } else {
            self.team_page_url.clone()
        };
        let content = toml::to_string_pretty(&Config {
            team_page_url,
            log_file_path: self.log_file_path.clone(),
            http_timeout_seconds: self.http_timeout_seconds,
            video_cache_seconds: self.video_cache_seconds,
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path (for testing).
    #[allow(dead_code)] // Used in tests
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
team_page_url = "https://www.ballertv.com/teams/drive-richmond-u11"
log_file_path = "/custom/log/path"
"#;
        tokio::fs::write(&config_path, config_content)
            .await
            .unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(
            config.team_page_url,
            "https://www.ballertv.com/teams/drive-richmond-u11"
        );
        assert_eq!(config.log_file_path, Some("/custom/log/path".to_string()));
        assert_eq!(config.http_timeout_seconds, default_http_timeout());
        assert_eq!(config.video_cache_seconds, None);
    }

    #[tokio::test]
    async fn test_config_load_with_video_cache() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let config_content = r#"
team_page_url = "https://www.ballertv.com/teams/x"
video_cache_seconds = 120
"#;
        tokio::fs::write(&config_path, config_content)
            .await
            .unwrap();

        let config = Config::load_from_path(&config_path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(config.video_cache_seconds, Some(120));
    }

    #[tokio::test]
    async fn test_config_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let original = Config {
            team_page_url: "https://www.ballertv.com/teams/x".to_string(),
            log_file_path: Some("/custom/log/path".to_string()),
            http_timeout_seconds: 15,
            video_cache_seconds: Some(60),
        };

        original.save_to_path(&config_path_str).await.unwrap();
        let loaded = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(original.team_page_url, loaded.team_page_url);
        assert_eq!(original.log_file_path, loaded.log_file_path);
        assert_eq!(original.http_timeout_seconds, loaded.http_timeout_seconds);
        assert_eq!(original.video_cache_seconds, loaded.video_cache_seconds);
    }

    #[tokio::test]
    async fn test_config_save_normalizes_scheme() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let config = Config {
            team_page_url: "http://www.ballertv.com/teams/x".to_string(),
            ..Config::default()
        };

        config.save_to_path(&config_path_str).await.unwrap();

        let loaded = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded.team_page_url, "https://www.ballertv.com/teams/x");
    }

    #[tokio::test]
    async fn test_config_save_creates_directory() {
        let temp_dir = tempdir().unwrap();
        let config_dir = temp_dir.path().join("courtside");
        let config_path = config_dir.join("config.toml");
        let config = Config {
            team_page_url: "https://www.ballertv.com/teams/x".to_string(),
            ..Config::default()
        };

        config
            .save_to_path(&config_path.to_string_lossy())
            .await
            .unwrap();
        assert!(config_dir.exists());
        assert!(config_path.exists());
    }

    #[tokio::test]
    async fn test_config_load_missing_required_field() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("incomplete_config.toml");

        let incomplete_content = r#"
log_file_path = "/some/path"
"#;
        tokio::fs::write(&config_path, incomplete_content)
            .await
            .unwrap();

        let result = Config::load_from_path(&config_path.to_string_lossy()).await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[tokio::test]
    async fn test_config_load_from_nonexistent_path() {
        let result = Config::load_from_path("/nonexistent/path/config.toml").await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Io(_)));
    }

    #[test]
    fn test_config_validation() {
        let valid = Config {
            team_page_url: "https://www.ballertv.com/teams/x".to_string(),
            ..Config::default()
        };
        assert!(valid.validate().is_ok());

        let empty_url = Config::default();
        assert!(empty_url.validate().is_err());

        let no_scheme = Config {
            team_page_url: "www.ballertv.com/teams/x".to_string(),
            ..Config::default()
        };
        assert!(no_scheme.validate().is_err());

        let empty_log_path = Config {
            team_page_url: "https://www.ballertv.com/teams/x".to_string(),
            log_file_path: Some(String::new()),
            ..Config::default()
        };
        assert!(empty_log_path.validate().is_err());
    }

    #[test]
    fn test_video_cache_not_serialized_when_unset() {
        let config = Config {
            team_page_url: "https://www.ballertv.com/teams/x".to_string(),
            ..Config::default()
        };

        let toml_string = toml::to_string_pretty(&config).unwrap();
        assert!(!toml_string.contains("video_cache_seconds"));
        assert!(!toml_string.contains("log_file_path"));
        assert!(toml_string.contains("team_page_url"));
    }

    #[test]
    fn test_config_path_generation() {
        let config_path = Config::get_config_path();
        assert!(config_path.contains("courtside"));
        assert!(config_path.ends_with("config.toml"));

        let log_dir_path = Config::get_log_dir_path();
        assert!(log_dir_path.contains("courtside"));
        assert!(log_dir_path.ends_with("logs"));
    }
}
