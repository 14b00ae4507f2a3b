//! Configuration loading and management.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use graph_common::time::{parse_date, today};
use graph_common::Rgb;
use renderer::{ColorScheme, Levels, Quantizer};
use serde::{Deserialize, Serialize};

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "contribution-graph.yaml";

/// Filename meaning "write to stdout".
pub const STDOUT_FILENAME: &str = "-";

/// Main configuration loaded from YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub graph: GraphSettings,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_filename")]
    pub filename: String,
    /// Compact markup when true, two-space indentation otherwise.
    #[serde(default = "default_minify")]
    pub minify: bool,
}

fn default_filename() -> String {
    "contribution-graph.svg".to_string()
}

fn default_minify() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            filename: default_filename(),
            minify: default_minify(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphSettings {
    /// Last day of the calendar (`YYYY-MM-DD`); today in UTC when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_date: Option<String>,
    /// Primary color as `#rrggbb`.
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_levels")]
    pub levels: u32,
}

fn default_color() -> String {
    "#216e39".to_string()
}

fn default_levels() -> u32 {
    5
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            last_date: None,
            color: default_color(),
            levels: default_levels(),
        }
    }
}

/// Where contribution events come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceConfig {
    /// JSON, NDJSON or CSV file of timestamped events.
    EventFile { path: PathBuf },
    /// Commits of a local repository.
    Git {
        path: PathBuf,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        author: Option<String>,
        #[serde(default)]
        include_merges: bool,
    },
}

impl SourceConfig {
    /// Identity used to detect duplicate entries.
    pub fn key(&self) -> (&'static str, &Path) {
        match self {
            SourceConfig::EventFile { path } => ("event_file", path),
            SourceConfig::Git { path, .. } => ("git", path),
        }
    }
}

/// Values given on the command line; each one replaces the file value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub last_date: Option<String>,
    pub color: Option<String>,
    pub levels: Option<u32>,
    pub output: Option<String>,
    pub no_minify: bool,
    pub events: Vec<PathBuf>,
}

impl GraphConfig {
    /// Parse YAML after expanding `${VAR}` references.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let expanded = shellexpand::env(content)
            .context("Failed to expand environment variables in config")?;
        let config: GraphConfig =
            serde_yaml::from_str(&expanded).context("Failed to parse config YAML")?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("Invalid config file {:?}", path))
    }

    /// Load the explicit config file, or the default one if it exists.
    ///
    /// A missing default file yields the built-in defaults; a missing
    /// explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(last_date) = overrides.last_date {
            self.graph.last_date = Some(last_date);
        }
        if let Some(color) = overrides.color {
            self.graph.color = color;
        }
        if let Some(levels) = overrides.levels {
            self.graph.levels = levels;
        }
        if let Some(output) = overrides.output {
            self.output.filename = output;
        }
        if overrides.no_minify {
            self.output.minify = false;
        }
        self.sources.extend(
            overrides
                .events
                .into_iter()
                .map(|path| SourceConfig::EventFile { path }),
        );
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        self.primary_color()?;
        self.levels()?;
        self.last_date()?;
        if self.output.filename.trim().is_empty() {
            anyhow::bail!("output.filename must not be empty");
        }
        if self.sources.is_empty() {
            anyhow::bail!("at least one event source must be configured");
        }
        Ok(())
    }

    pub fn primary_color(&self) -> Result<Rgb> {
        Rgb::from_hex(&self.graph.color).context("graph.color")
    }

    pub fn levels(&self) -> Result<Levels> {
        Levels::new(self.graph.levels).context("graph.levels")
    }

    /// Configured last date, or today (UTC).
    pub fn last_date(&self) -> Result<NaiveDate> {
        match &self.graph.last_date {
            Some(s) => parse_date(s).context("graph.last_date"),
            None => Ok(today()),
        }
    }

    /// Quantizer for the configured levels and primary color.
    pub fn quantizer(&self) -> Result<Quantizer> {
        Ok(Quantizer::new(
            self.levels()?,
            ColorScheme::from_primary(self.primary_color()?),
        ))
    }

    pub fn writes_to_stdout(&self) -> bool {
        self.output.filename == STDOUT_FILENAME
    }
}
