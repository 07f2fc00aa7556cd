use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::path::PathBuf;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

pub const ENV_PREFIX: &str = "FUNWHEEL";
const TASKS_FILE_NAME: &str = "tasks.wfn";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum Language {
    #[default]
    #[strum(to_string = "enUs", serialize = "en")]
    EnUs,
    #[strum(to_string = "deDe", serialize = "de")]
    DeDe,
}

/// Tuning of the wheel's motion. Units are degrees and degrees per tick.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Velocity added or removed per tick while dragging.
    pub drag_increment: f64,
    /// Base braking per tick once released, scaled by the braking table.
    pub brake_decrement: f64,
    pub detent_min: f64,
    pub detent_max: f64,
    /// Below this the wheel is considered stopped in its current direction.
    pub stillness_threshold: f64,
    pub dead_zone: f64,
    pub max_velocity: f64,
    pub boundary_margin: f64,
    /// Rest ticks that must be exceeded before the settle event fires.
    pub rest_threshold: usize,
    pub history_capacity: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            drag_increment: 0.1,
            brake_decrement: 0.02,
            detent_min: 0.01,
            detent_max: 0.04,
            stillness_threshold: 0.01,
            dead_zone: 0.1,
            max_velocity: 20.0,
            boundary_margin: 3.0,
            rest_threshold: 5,
            history_capacity: 20,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("drag_increment", self.drag_increment),
            ("brake_decrement", self.brake_decrement),
            ("max_velocity", self.max_velocity),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Err(ConfigError::Invalid(format!("physics.{name} must be positive")));
        }

        let non_negative = [
            ("detent_min", self.detent_min),
            ("stillness_threshold", self.stillness_threshold),
            ("dead_zone", self.dead_zone),
            ("boundary_margin", self.boundary_margin),
        ];
        if let Some((name, _)) = non_negative.iter().find(|(_, v)| !(v.is_finite() && *v >= 0.0)) {
            return Err(ConfigError::Invalid(format!(
                "physics.{name} must not be negative"
            )));
        }

        if !self.detent_max.is_finite() || self.detent_max < self.detent_min {
            return Err(ConfigError::Invalid(
                "physics.detent_max must not be below physics.detent_min".to_string(),
            ));
        }
        if self.rest_threshold >= self.history_capacity {
            return Err(ConfigError::Invalid(
                "physics.rest_threshold must be smaller than physics.history_capacity".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetPaths {
    pub app_logo: PathBuf,
    pub wheel_logo: PathBuf,
    pub background: PathBuf,
    pub sound_stopper: PathBuf,
    pub sound_settle: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            app_logo: PathBuf::from("resources/base/app-logo.png"),
            wheel_logo: PathBuf::from("resources/base/wheel-logo.png"),
            background: PathBuf::from("resources/base/background.jpeg"),
            sound_stopper: PathBuf::from("resources/base/stopper.wav"),
            sound_settle: PathBuf::from("resources/base/tada.wav"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub language: Language,
    pub fps: u32,
    pub window_width: i32,
    pub window_height: i32,
    pub task_max_length: usize,
    pub randomize_tasks: bool,
    /// Opens the task editor before the first spin.
    pub edit_tasks_on_start: bool,
    pub display_background_image: bool,
    pub tasks_file: Option<PathBuf>,
    pub assets: AssetPaths,
    pub physics: PhysicsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::default(),
            fps: 60,
            window_width: 800,
            window_height: 800,
            task_max_length: 38,
            randomize_tasks: false,
            edit_tasks_on_start: true,
            display_background_image: true,
            tasks_file: None,
            assets: AssetPaths::default(),
            physics: PhysicsConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be positive".to_string()));
        }
        if self.window_width <= 0 || self.window_height <= 0 {
            return Err(ConfigError::Invalid(
                "window size must be positive".to_string(),
            ));
        }
        // room for the "..." suffix
        if self.task_max_length < 4 {
            return Err(ConfigError::Invalid(
                "task_max_length must be at least 4".to_string(),
            ));
        }
        self.physics.validate()
    }

    /// Explicit `tasks_file`, else `tasks.wfn` in the user data directory.
    pub fn tasks_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.tasks_file {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join(TASKS_FILE_NAME)),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("org", "wheeloffun", "funwheel").ok_or(ConfigError::ConfigDirNotFound)
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(environment())
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
