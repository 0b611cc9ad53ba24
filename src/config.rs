use std::{collections::HashMap, path::{Path, PathBuf}};

use log::{debug, info};
use tinyjson::JsonValue;

use crate::{error::Error, utils};

pub const GAME_FOLDER_NAME: &str = "Guild Wars 2";
pub const SETTINGS_FILE_NAME: &str = "gw2-profiles.json";

const INSTALL_ROOT_VARS: &[&str] = &["PROGRAMFILES(x86)", "PROGRAMFILES"];

/// Locations the manager and launcher work against. Built once at startup
/// and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub profile_dir: PathBuf,
    pub install_roots: Vec<PathBuf>,
    pub game_dir: Option<PathBuf>,
}

impl Config {
    pub fn new(profile_dir: PathBuf) -> Config {
        Config {
            profile_dir,
            install_roots: Vec::new(),
            game_dir: None,
        }
    }

    pub fn from_env(profile_dir: Option<PathBuf>, game_dir: Option<PathBuf>) -> Result<Config, Error> {
        let profile_dir = match profile_dir {
            Some(dir) => dir,
            None => Self::default_profile_dir().ok_or(Error::NoProfileDir)?,
        };

        let install_roots = INSTALL_ROOT_VARS
            .iter()
            .filter_map(|var| std::env::var_os(var))
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .collect();

        Ok(Config {
            profile_dir,
            install_roots,
            game_dir,
        })
    }

    pub fn default_profile_dir() -> Option<PathBuf> {
        Some(utils::roaming_app_data_dir()?.join(GAME_FOLDER_NAME))
    }

    pub fn settings_path(&self) -> PathBuf {
        self.profile_dir.join(SETTINGS_FILE_NAME)
    }
}

/// Optional per-user defaults read from `gw2-profiles.json` in the profile
/// directory. Command-line values win over anything set here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub game_dir: Option<PathBuf>,
    pub backups: Option<i32>,
    pub options: Vec<String>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Settings, Error> {
        if !utils::path_exists(path) {
            debug!("no settings file at {}", path.display());
            return Ok(Settings::default());
        }

        let text = std::fs::read_to_string(path)?;
        let settings = Self::parse(&text)?;
        info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn parse(text: &str) -> Result<Settings, Error> {
        let value: JsonValue = text
            .parse()
            .map_err(|e: tinyjson::JsonParseError| Error::InvalidSettings(e.to_string()))?;
        let JsonValue::Object(root) = value else {
            return Err(Error::InvalidSettings("expected a JSON object".into()));
        };

        Ok(Settings {
            game_dir: Self::string_field(&root, "game_dir")?.map(PathBuf::from),
            backups: Self::integer_field(&root, "backups")?,
            options: Self::string_array_field(&root, "options")?,
        })
    }

    fn string_field(root: &HashMap<String, JsonValue>, key: &str) -> Result<Option<String>, Error> {
        match root.get(key) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(JsonValue::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(Error::InvalidSettings(format!("\"{}\" must be a string", key))),
        }
    }

    fn integer_field(root: &HashMap<String, JsonValue>, key: &str) -> Result<Option<i32>, Error> {
        match root.get(key) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(JsonValue::Number(n)) if n.fract() == 0.0 && *n >= i32::MIN as f64 && *n <= i32::MAX as f64 => {
                Ok(Some(*n as i32))
            }
            Some(_) => Err(Error::InvalidSettings(format!("\"{}\" must be an integer", key))),
        }
    }

    fn string_array_field(root: &HashMap<String, JsonValue>, key: &str) -> Result<Vec<String>, Error> {
        let Some(value) = root.get(key) else {
            return Ok(Vec::new());
        };
        let JsonValue::Array(items) = value else {
            return Err(Error::InvalidSettings(format!("\"{}\" must be an array of strings", key)));
        };
        items
            .iter()
            .map(|item| match item {
                JsonValue::String(s) => Ok(s.clone()),
                _ => Err(Error::InvalidSettings(format!("\"{}\" must be an array of strings", key))),
            })
            .collect()
    }
}
