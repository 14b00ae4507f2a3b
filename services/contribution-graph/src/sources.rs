//! Event source adapters: local event files and git repositories.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use graph_common::time::parse_timestamp;
use graph_common::{ContributionEvent, EventSource, GraphError, GraphResult};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::SourceConfig;

/// Layout of an event file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFileFormat {
    /// A JSON array of event objects.
    Json,
    /// One JSON event object per line.
    NdJson,
    /// `timestamp[,weight]` lines with an optional header.
    Csv,
}

impl EventFileFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "ndjson" | "jsonl" => Some(Self::NdJson),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Event object as stored in JSON files.
#[derive(Debug, Deserialize)]
struct RawEvent {
    timestamp: String,
    #[serde(default = "default_weight")]
    weight: u32,
}

fn default_weight() -> u32 {
    1
}

/// Events read from a local file.
#[derive(Debug, Clone)]
pub struct EventFileSource {
    path: PathBuf,
    format: EventFileFormat,
}

impl EventFileSource {
    pub fn new(path: impl Into<PathBuf>) -> GraphResult<Self> {
        let path = path.into();
        let format = EventFileFormat::from_path(&path).ok_or_else(|| {
            GraphError::SourceError(format!(
                "Unsupported event file {:?}: expected .json, .ndjson, .jsonl or .csv",
                path
            ))
        })?;
        Ok(Self { path, format })
    }

    pub fn format(&self) -> EventFileFormat {
        self.format
    }

    /// Parse file contents in this source's format.
    pub fn parse(&self, content: &str) -> GraphResult<Vec<ContributionEvent>> {
        match self.format {
            EventFileFormat::Json => {
                let raw: Vec<RawEvent> =
                    serde_json::from_str(content).map_err(|e| self.invalid(0, e))?;
                raw.into_iter()
                    .enumerate()
                    .map(|(i, r)| self.convert(i + 1, r))
                    .collect()
            }
            EventFileFormat::NdJson => content
                .lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(i, line)| {
                    let raw: RawEvent =
                        serde_json::from_str(line).map_err(|e| self.invalid(i + 1, e))?;
                    self.convert(i + 1, raw)
                })
                .collect(),
            EventFileFormat::Csv => self.parse_csv(content),
        }
    }

    fn parse_csv(&self, content: &str) -> GraphResult<Vec<ContributionEvent>> {
        let mut events = Vec::new();
        let mut header_allowed = true;
        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split(',').map(str::trim);
            let timestamp = fields.next().unwrap_or_default();
            // Only the first record line may be a header.
            if std::mem::take(&mut header_allowed) && timestamp.eq_ignore_ascii_case("timestamp")
            {
                continue;
            }

            let weight = match fields.next() {
                Some(w) if !w.is_empty() => w
                    .parse::<u32>()
                    .map_err(|e| self.invalid(i + 1, format!("weight '{w}': {e}")))?,
                _ => default_weight(),
            };
            let timestamp = parse_timestamp(timestamp).map_err(|e| self.invalid(i + 1, e))?;
            events.push(ContributionEvent::new(timestamp, weight));
        }
        Ok(events)
    }

    fn convert(&self, line: usize, raw: RawEvent) -> GraphResult<ContributionEvent> {
        let timestamp = parse_timestamp(&raw.timestamp).map_err(|e| self.invalid(line, e))?;
        Ok(ContributionEvent::new(timestamp, raw.weight))
    }

    fn invalid(&self, line: usize, message: impl std::fmt::Display) -> GraphError {
        let message = if line == 0 {
            message.to_string()
        } else {
            format!("line {line}: {message}")
        };
        GraphError::InvalidEvent {
            source_name: self.name(),
            message,
        }
    }
}

impl EventSource for EventFileSource {
    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn events(&self) -> GraphResult<Vec<ContributionEvent>> {
        let content = fs::read_to_string(&self.path)?;
        let events = self.parse(&content)?;
        debug!(path = %self.path.display(), count = events.len(), "Read event file");
        Ok(events)
    }
}

/// Commits of a local repository, one weight-1 event per commit at its
/// author date.
#[derive(Debug, Clone)]
pub struct GitLogSource {
    path: PathBuf,
    author: Option<String>,
    include_merges: bool,
}

impl GitLogSource {
    pub fn new(path: impl Into<PathBuf>, author: Option<String>, include_merges: bool) -> Self {
        Self {
            path: path.into(),
            author,
            include_merges,
        }
    }

    /// Arguments passed to `git`. The repository path is passed through
    /// unchanged, including non-UTF-8 paths.
    pub fn args(&self) -> Vec<OsString> {
        let mut args = vec![
            OsString::from("-C"),
            self.path.clone().into_os_string(),
            OsString::from("log"),
            OsString::from("--format=%aI"),
        ];
        if !self.include_merges {
            args.push(OsString::from("--no-merges"));
        }
        if let Some(author) = &self.author {
            args.push(OsString::from(format!("--author={author}")));
        }
        args
    }

    /// Parse `git log --format=%aI` output, one timestamp per line.
    pub fn parse_log(&self, output: &str) -> GraphResult<Vec<ContributionEvent>> {
        output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                parse_timestamp(line)
                    .map(ContributionEvent::single)
                    .map_err(|e| GraphError::InvalidEvent {
                        source_name: self.name(),
                        message: e.to_string(),
                    })
            })
            .collect()
    }
}

impl EventSource for GitLogSource {
    fn name(&self) -> String {
        format!("git:{}", self.path.display())
    }

    fn events(&self) -> GraphResult<Vec<ContributionEvent>> {
        let output = Command::new("git").args(self.args()).output()?;
        if !output.status.success() {
            return Err(GraphError::SourceError(format!(
                "git log in {} failed: {}",
                self.path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let events = self.parse_log(&stdout)?;
        debug!(repo = %self.path.display(), commits = events.len(), "Read git log");
        Ok(events)
    }
}

/// Build one source per configured entry, skipping duplicates.
pub fn build_sources(configs: &[SourceConfig]) -> GraphResult<Vec<Box<dyn EventSource>>> {
    let mut seen = HashSet::new();
    let mut sources: Vec<Box<dyn EventSource>> = Vec::with_capacity(configs.len());

    for config in configs {
        let (kind, path) = config.key();
        if !seen.insert((kind, path.to_path_buf())) {
            warn!(kind, path = %path.display(), "Source is a duplicate - ignoring");
            continue;
        }

        let source: Box<dyn EventSource> = match config {
            SourceConfig::EventFile { path } => Box::new(EventFileSource::new(path.clone())?),
            SourceConfig::Git {
                path,
                author,
                include_merges,
            } => Box::new(GitLogSource::new(path.clone(), author.clone(), *include_merges)),
        };
        sources.push(source);
    }

    Ok(sources)
}
