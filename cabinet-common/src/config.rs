//! Configuration loading and data folder resolution
//!
//! Config file resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. `CABINET_CONFIG` environment variable
//! 3. `<config dir>/cabinet/config.toml`
//! 4. Built-in defaults (a missing file is not an error)
//!
//! Data folder resolution priority:
//! 1. Command-line argument
//! 2. `CABINET_DATA_FOLDER` environment variable
//! 3. `data_folder` in the TOML file
//! 4. OS-dependent default (`<local data dir>/cabinet`)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::source::CsvSource;
use crate::{Error, Result};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "CABINET_CONFIG";

/// Environment variable naming the data folder
pub const DATA_FOLDER_ENV_VAR: &str = "CABINET_DATA_FOLDER";

/// Viewer configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CabinetConfig {
    /// Heading shown above the dashboard
    pub brand_name: String,

    /// Course whose rows are shown; rows for other courses are ignored
    pub course_id: String,

    /// Read `sample_csv_path` instead of `sheet_csv_url`
    pub use_sample_data: bool,

    /// Published sheet CSV export URL
    pub sheet_csv_url: String,

    /// Local sample sheet
    pub sample_csv_path: PathBuf,

    /// Folder for the progress store (optional)
    pub data_folder: Option<PathBuf>,

    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for CabinetConfig {
    fn default() -> Self {
        Self {
            brand_name: "Course Cabinet".to_string(),
            course_id: "course_alpha".to_string(),
            use_sample_data: true,
            sheet_csv_url: String::new(),
            sample_csv_path: PathBuf::from("./sample-sheet.csv"),
            data_folder: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl CabinetConfig {
    /// Parse TOML text; absent fields take built-in defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Read and parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load using the resolution priority in the module docs
    ///
    /// An explicitly named file (CLI or env) must exist and parse. The
    /// platform default file is optional.
    pub fn load(cli_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = cli_path {
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Self::from_file(Path::new(&path));
            }
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                warn!("No config file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Lesson sheet location for this configuration
    ///
    /// Fails with [`Error::SourceUnavailable`] when the selected location
    /// is empty.
    pub fn csv_source(&self) -> Result<CsvSource> {
        let source = if self.use_sample_data {
            CsvSource::File(self.sample_csv_path.clone())
        } else {
            CsvSource::Url(self.sheet_csv_url.trim().to_string())
        };
        source.validate()?;
        Ok(source)
    }

    /// Resolve the progress store folder (CLI > env > TOML > OS default)
    pub fn resolve_data_folder(&self, cli_arg: Option<&Path>) -> PathBuf {
        if let Some(path) = cli_arg {
            return path.to_path_buf();
        }

        if let Ok(path) = std::env::var(DATA_FOLDER_ENV_VAR) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &self.data_folder {
            return path.clone();
        }

        get_default_data_folder()
    }
}

/// Platform config file location (`~/.config/cabinet/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cabinet").join("config.toml"))
}

/// Get OS-dependent default data folder path
pub fn get_default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("cabinet"))
        .unwrap_or_else(|| PathBuf::from("./cabinet_data"))
}
