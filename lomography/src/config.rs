use crate::cli::Cli;
use anyhow::{Context, Result, bail};
use derivative::Derivative;
use log::debug;
use lomo_effect::RadiusMode;
use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

const APP_NAME: &str = "lomography";

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct Config {
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(skip)]
    pub is_first_run: bool,

    #[serde(default)]
    pub filter: Filter,

    #[serde(default)]
    pub output: Output,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Filter {
    #[derivative(Default(value = "lomo_effect::lut::STEEPNESS_DEFAULT"))]
    pub steepness: i32,

    #[derivative(Default(value = "lomo_effect::vignette::RADIUS_PERCENT_DEFAULT"))]
    pub radius: i32,

    pub legacy_radius: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Output {
    #[derivative(Default(value = "PathBuf::from(\"output.jpg\")"))]
    pub path: PathBuf,
}

impl Config {
    /// Loads the configuration from the platform config directory
    ///
    /// # Returns
    /// - `Result<Config>` with file values, or defaults on first run
    pub fn init() -> Result<Self> {
        let app_dirs =
            AppDirs::new(Some(APP_NAME), true).context("no platform config directory")?;
        fs::create_dir_all(&app_dirs.config_dir)?;

        let path = app_dirs.config_dir.join(format!("{APP_NAME}.toml"));
        Self::load_from(&path).with_context(|| "load config file failed")
    }

    /// Loads configuration from `path`, writing defaults when the file is
    /// missing and backing it up first when it cannot be parsed
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = match fs::read_to_string(path) {
            Ok(text) => match toml::from_str::<Config>(&text) {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("invalid config {}: {e}", path.display());
                    _ = fs::copy(path, format!("{}.bak", path.display()));
                    Self::first_run()
                }
            },
            Err(_) => Self::first_run(),
        };

        config.config_path = path.to_path_buf();
        if config.is_first_run {
            config.save()?;
        }

        config.clamp();
        debug!("{config:?}");
        Ok(config)
    }

    fn first_run() -> Self {
        Self {
            is_first_run: true,
            ..Self::default()
        }
    }

    /// Keeps hand-edited values inside the slider ranges
    fn clamp(&mut self) {
        use lomo_effect::{lut::STEEPNESS_MAX, vignette::RADIUS_PERCENT_MAX};

        self.filter.steepness = self.filter.steepness.clamp(0, STEEPNESS_MAX);
        self.filter.radius = self.filter.radius.clamp(0, RADIUS_PERCENT_MAX);
    }

    /// Saves the current configuration to file
    pub fn save(&self) -> Result<()> {
        match toml::to_string_pretty(self) {
            Ok(text) => Ok(fs::write(&self.config_path, text)
                .with_context(|| "save config failed".to_string())?),
            Err(e) => bail!(format!("convert config to toml format failed. {e:?}")),
        }
    }

    /// Command line flags win over file values
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(steepness) = cli.steepness {
            self.filter.steepness = steepness;
        }
        if let Some(radius) = cli.radius {
            self.filter.radius = radius;
        }
        if let Some(output) = &cli.output {
            self.output.path = output.clone();
        }
        if cli.legacy_radius {
            self.filter.legacy_radius = true;
        }
        self
    }

    pub fn radius_mode(&self) -> RadiusMode {
        if self.filter.legacy_radius {
            RadiusMode::Legacy
        } else {
            RadiusMode::Separate
        }
    }
}
