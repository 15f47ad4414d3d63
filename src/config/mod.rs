use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_persons_sheet")]
    pub persons_sheet: String,
    #[serde(default = "default_events_sheet")]
    pub events_sheet: String,
    #[serde(default = "default_matrix_sheet")]
    pub matrix_sheet: String,
    #[serde(default = "default_records_sheet")]
    pub records_sheet: String,
    #[serde(default = "default_event_type")]
    pub default_event_type: String,
}

fn default_persons_sheet() -> String {
    "Empleados".to_string()
}
fn default_events_sheet() -> String {
    "Eventos formativos".to_string()
}
fn default_matrix_sheet() -> String {
    "Matriz Programación".to_string()
}
fn default_records_sheet() -> String {
    "Registro Eventos Formativos".to_string()
}
fn default_event_type() -> String {
    "TRAINING".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            persons_sheet: default_persons_sheet(),
            events_sheet: default_events_sheet(),
            matrix_sheet: default_matrix_sheet(),
            records_sheet: default_records_sheet(),
            default_event_type: default_event_type(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtraining")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rtraining")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtraining.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rtraining.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let cfg: Self = serde_yaml::from_str(&content)?;
            if cfg.database.trim().is_empty() {
                return Err(AppError::Config(format!(
                    "'database' is empty in {}",
                    path.display()
                )));
            }
            Ok(cfg)
        } else {
            Ok(Self::default())
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("rtraining.sqlite")
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Self::with_database(db_path.clone());
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }

    pub fn print(&self) -> io::Result<()> {
        let yaml = serde_yaml::to_string(self).map_err(io::Error::other)?;
        println!("{}", yaml);
        Ok(())
    }
}
