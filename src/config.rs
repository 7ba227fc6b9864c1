use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use toml;
use tracing::{info, warn};

/// Configuration for the Comanda server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL for the database connection
    pub database_url: String,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Directory with the built dashboard assets, if any
    pub static_dir: Option<PathBuf>,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    /// Optional update for database URL
    #[serde(default)]
    pub database_url: Option<String>,
    /// Optional update for the listen port
    #[serde(default)]
    pub port: Option<u16>,
    /// Optional update for the static assets directory
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
    /// Server URL for the CLI (ignored by the server itself)
    #[serde(default)]
    pub server_url: Option<String>,
}

/// Command line arguments for the server
#[derive(Parser, Debug)]
#[clap(name = "comanda", about = "Restaurant back-office server")]
pub struct CliArgs {
    /// Database URL
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Port to listen on
    #[clap(long, env = "PORT")]
    pub port: Option<u16>,

    /// Directory with the built dashboard assets
    #[clap(long, env = "COMANDA_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            database_url: update.database_url.unwrap_or(self.database_url),
            port: update.port.unwrap_or(self.port),
            static_dir: update.static_dir.or(self.static_dir),
        }
    }
}

/// Returns the base (default) configuration
pub fn base_config(config_path: Option<PathBuf>) -> Config {
    let database_url = config_path.map_or("comanda.db".to_string(), |path| {
        path.join("comanda.db").to_string_lossy().to_string()
    });

    Config {
        database_url,
        port: 3001,
        static_dir: None,
    }
}

/// Loads configuration from a TOML file
pub fn config_from_file(config_path: Option<PathBuf>) -> Result<ConfigUpdate, String> {
    let Some(config_path) = config_path else {
        return Ok(ConfigUpdate::default());
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    match fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str::<ConfigUpdate>(&content) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", config_path);
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                Err(format!("Failed to parse config file: {}", e))
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            Err(format!("Failed to read config file: {}", e))
        }
    }
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        database_url: args.database_url,
        port: args.port,
        static_dir: args.static_dir,
        server_url: None,
    }
}

/// Returns the XDG config directory for comanda, if one can be determined
pub fn get_config_dir_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "comanda", "comanda").map(|dirs| PathBuf::from(dirs.config_dir()))
}

/// Gets the complete configuration by combining defaults with
/// values from config file, environment variables, and command line arguments
/// in order of increasing precedence
pub fn get_config(args: CliArgs) -> Config {
    let mut config_path = get_config_dir_path();
    if config_path.is_none() {
        warn!("Could not determine XDG config directory, skipping config file");
    }

    config_path = config_path.and_then(|path| {
        if !path.exists() {
            info!("Config path not found at {:?}, using defaults", path);
            None
        } else {
            Some(path.join("config.toml"))
        }
    });

    let base = base_config(config_path.as_ref().and_then(|p| p.parent().map(PathBuf::from)));

    // Apply updates in order of increasing precedence
    let config = base
        .apply_update(config_from_file(config_path).unwrap_or_default())
        .apply_update(config_from_args(args));

    info!(
        "Final configuration: database_url={}, port={}, static_dir={:?}",
        config.database_url, config.port, config.static_dir
    );

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::{TempDir, tempdir};

    /// Helper function to create a test configuration file
    fn create_test_config_file(dir: &TempDir, content: &str) -> PathBuf {
        let config_path = dir.path().join("config.toml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        config_path
    }

    #[test]
    fn test_apply_update_with_all_values() {
        let config = Config {
            database_url: "original.db".to_string(),
            port: 3001,
            static_dir: None,
        };

        let update = ConfigUpdate {
            database_url: Some("updated.db".to_string()),
            port: Some(8080),
            static_dir: Some(PathBuf::from("/srv/dashboard")),
            server_url: None,
        };

        let updated = config.apply_update(update);

        assert_eq!(updated.database_url, "updated.db");
        assert_eq!(updated.port, 8080);
        assert_eq!(updated.static_dir, Some(PathBuf::from("/srv/dashboard")));
    }

    #[test]
    fn test_apply_update_with_no_values() {
        let config = Config {
            database_url: "original.db".to_string(),
            port: 3001,
            static_dir: Some(PathBuf::from("/srv/dashboard")),
        };

        let updated = config.clone().apply_update(ConfigUpdate::default());

        assert_eq!(updated.database_url, config.database_url);
        assert_eq!(updated.port, config.port);
        assert_eq!(updated.static_dir, config.static_dir);
    }

    #[test]
    fn test_config_from_file() {
        let dir = tempdir().unwrap();
        let config_path = create_test_config_file(
            &dir,
            r#"
database_url = "file.db"
port = 4000
"#,
        );

        let update = config_from_file(Some(config_path)).unwrap();

        assert_eq!(update.database_url, Some("file.db".to_string()));
        assert_eq!(update.port, Some(4000));
        assert_eq!(update.static_dir, None);
    }

    #[test]
    fn test_config_from_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("does-not-exist.toml");

        let update = config_from_file(Some(config_path)).unwrap();

        assert!(update.database_url.is_none());
        assert!(update.port.is_none());
    }

    #[test]
    fn test_config_from_invalid_file_is_error() {
        let dir = tempdir().unwrap();
        let config_path = create_test_config_file(&dir, "port = \"not a number\"");

        assert!(config_from_file(Some(config_path)).is_err());
    }

    #[test]
    fn test_base_config_defaults() {
        let config = base_config(None);

        assert_eq!(config.database_url, "comanda.db");
        assert_eq!(config.port, 3001);
        assert!(config.static_dir.is_none());
    }
}
