//! Configuration file handling.
//!
//! Loads `.olympic-dashboard.toml` and merges it with command-line flags.
//! Precedence: built-in defaults < config file < CLI.

use crate::cli::Args;
use crate::data::{DataLoader, NullPolicy};
use crate::pipeline::ViewParams;
use crate::stats::{AgeRange, AgeRangeError, MedalFilter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".olympic-dashboard.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid age range: {0}")]
    AgeRange(#[from] AgeRangeError),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Input and dump files.
    #[serde(default)]
    pub data: DataConfig,

    /// Cleaning settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Initial values of the interactive selectors.
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_athletes")]
    pub athletes: PathBuf,

    #[serde(default = "default_regions")]
    pub regions: PathBuf,

    /// Merged dump target; an empty path disables the dump.
    #[serde(default = "default_merged_output")]
    pub merged_output: Option<PathBuf>,

    /// Rows scanned for CSV schema inference; unset scans whole files.
    #[serde(default)]
    pub infer_schema_length: Option<usize>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            athletes: default_athletes(),
            regions: default_regions(),
            merged_output: default_merged_output(),
            infer_schema_length: None,
        }
    }
}

fn default_athletes() -> PathBuf {
    PathBuf::from("athlete_events.csv")
}

fn default_regions() -> PathBuf {
    PathBuf::from("noc_regions.csv")
}

fn default_merged_output() -> Option<PathBuf> {
    Some(PathBuf::from("merged_file.csv"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub null_policy: NullPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub age_range: AgeRange,

    #[serde(default)]
    pub medal_filter: MedalFilter,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load `.olympic-dashboard.toml` from the working directory, if present.
    pub fn load_default() -> Result<Option<Self>, ConfigError> {
        let path = Path::new(CONFIG_FILE_NAME);
        if path.exists() {
            Ok(Some(Self::load(path)?))
        } else {
            Ok(None)
        }
    }

    /// Resolve the configuration for a run: `--config`, else the default file,
    /// else built-in defaults; then apply CLI overrides.
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::load_default()?.unwrap_or_default(),
        };
        config.merge_with_args(args)?;
        Ok(config)
    }

    /// Merge CLI arguments into the configuration (CLI wins).
    pub fn merge_with_args(&mut self, args: &Args) -> Result<(), ConfigError> {
        if let Some(athletes) = &args.athletes {
            self.data.athletes = athletes.clone();
        }
        if let Some(regions) = &args.regions {
            self.data.regions = regions.clone();
        }
        if args.no_dump {
            self.data.merged_output = None;
        } else if let Some(output) = &args.merged_output {
            self.data.merged_output = Some(output.clone());
        }
        if let Some(policy) = args.null_policy {
            self.pipeline.null_policy = policy;
        }
        if let Some(filter) = args.medal_filter {
            self.display.medal_filter = filter;
        }
        if args.age_min.is_some() || args.age_max.is_some() {
            let current = self.display.age_range;
            self.display.age_range = AgeRange::new(
                args.age_min.unwrap_or(current.lo()),
                args.age_max.unwrap_or(current.hi()),
            )?;
        }
        Ok(())
    }

    /// Loader for the configured input and dump files.
    pub fn loader(&self) -> DataLoader {
        let merged_output = self
            .data
            .merged_output
            .clone()
            .filter(|p| !p.as_os_str().is_empty());

        DataLoader::new(&self.data.athletes, &self.data.regions)
            .with_merged_output(merged_output)
            .with_infer_schema_length(self.data.infer_schema_length)
    }

    /// Initial selector values.
    pub fn view_params(&self) -> ViewParams {
        ViewParams {
            medal_filter: self.display.medal_filter,
            age_range: self.display.age_range,
        }
    }

    /// Generate the default configuration file content.
    pub fn default_toml() -> Result<String, ConfigError> {
        let body = toml::to_string_pretty(&Config::default())?;
        Ok(format!("# Olympic History Dashboard configuration\n\n{}", body))
    }
}
