use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

pub const HOME_ENV: &str = "AI_CARBON_TRACKER_HOME";
const APP_NAME: &str = "ai-carbon-tracker";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            data_dir: None,
            template_dir: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    pub paths: ConfigPaths,
    pub created: bool,
}

pub fn load_or_create() -> Result<ConfigLoad, String> {
    load_or_create_in(config_dir()?)
}

pub fn load_or_create_in(dir: PathBuf) -> Result<ConfigLoad, String> {
    fs::create_dir_all(&dir)
        .map_err(|err| format!("create config dir {}: {}", dir.display(), err))?;
    let file = dir.join(CONFIG_FILE_NAME);
    let paths = ConfigPaths { file };

    if paths.file.exists() {
        let contents = fs::read_to_string(&paths.file)
            .map_err(|err| format!("read config {}: {}", paths.file.display(), err))?;
        let config: CliConfig = toml::from_str(&contents)
            .map_err(|err| format!("parse config {}: {}", paths.file.display(), err))?;
        return Ok(ConfigLoad {
            config,
            paths,
            created: false,
        });
    }

    let config = CliConfig::default();
    let contents =
        toml::to_string_pretty(&config).map_err(|err| format!("serialize config: {}", err))?;
    fs::write(&paths.file, contents)
        .map_err(|err| format!("write config {}: {}", paths.file.display(), err))?;

    Ok(ConfigLoad {
        config,
        paths,
        created: true,
    })
}

/// `$AI_CARBON_TRACKER_HOME` when set, otherwise the platform config dir.
pub fn config_dir() -> Result<PathBuf, String> {
    if let Some(home) = tracker_home() {
        return Ok(home);
    }
    Ok(project_dirs()?.config_dir().to_path_buf())
}

pub fn tracker_home() -> Option<PathBuf> {
    std::env::var_os(HOME_ENV).map(PathBuf::from)
}

pub fn project_dirs() -> Result<ProjectDirs, String> {
    ProjectDirs::from("", "", APP_NAME)
        .ok_or_else(|| "resolve home directory for config".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_default_config_once() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config_dir = dir.path().join("config");
        let first = load_or_create_in(config_dir.clone()).expect("create");
        assert!(first.created);
        assert_eq!(first.config, CliConfig::default());
        assert!(first.paths.file.exists());

        let second = load_or_create_in(config_dir).expect("load");
        assert!(!second.created);
        assert_eq!(second.config.log_level, "warn");
    }

    #[test]
    fn missing_keys_use_defaults() {
        let config: CliConfig = toml::from_str("template_dir = \"/opt/templates\"").expect("parse");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.data_dir, None);
        assert_eq!(config.template_dir, Some(PathBuf::from("/opt/templates")));
    }
}
