//! Contribution graph generator.
//!
//! Loads configuration, aggregates all configured event sources into one
//! calendar and renders the calendar as an SVG heatmap.

pub mod config;
pub mod logging;
pub mod output;
pub mod sources;

use anyhow::{Context, Result};
use graph_common::{AggregateSummary, Calendar, EventSource};
use renderer::{HeatmapRenderer, RenderSummary};
use tracing::info;

pub use config::{ConfigOverrides, GraphConfig, OutputConfig, SourceConfig};

/// Result of a complete run.
#[derive(Debug, Clone)]
pub struct GeneratedGraph {
    pub document: Vec<u8>,
    pub events: AggregateSummary,
    pub render: RenderSummary,
}

/// Aggregate `sources` into a fresh calendar, one source at a time.
pub fn build_calendar(
    config: &GraphConfig,
    sources: &[Box<dyn EventSource>],
) -> Result<(Calendar, AggregateSummary)> {
    let mut calendar = Calendar::new(config.last_date()?);
    let mut summary = AggregateSummary::default();

    for source in sources {
        let name = source.name();
        let batch = calendar
            .aggregate_source(source.as_ref())
            .with_context(|| format!("Failed to read events from {name}"))?;
        info!(
            source = %name,
            accepted = batch.accepted,
            dropped = batch.dropped,
            "Aggregated source"
        );
        summary = summary.merge(batch);
    }

    Ok((calendar, summary))
}

/// Validate `config`, collect events and render the document in memory.
///
/// Nothing is written; see [`output::write_document`].
pub fn generate(config: &GraphConfig) -> Result<GeneratedGraph> {
    config.validate().context("Invalid configuration")?;
    let renderer = HeatmapRenderer::new(config.quantizer()?);

    let sources = sources::build_sources(&config.sources).context("Invalid event source")?;
    let (calendar, events) = build_calendar(config, &sources)?;
    info!(
        first = %calendar.first_date(),
        last = %calendar.last_date(),
        accepted = events.accepted,
        dropped = events.dropped,
        "Built calendar"
    );

    let (document, render) = renderer
        .render_to_vec(&calendar, !config.output.minify)
        .context("Failed to render contribution graph")?;

    Ok(GeneratedGraph {
        document,
        events,
        render,
    })
}

/// Generate the graph and write it to the configured output.
pub fn run(config: &GraphConfig) -> Result<GeneratedGraph> {
    let graph = generate(config)?;
    output::write_document(&config.output.filename, &graph.document)?;
    info!(
        filename = %config.output.filename,
        bytes = graph.document.len(),
        "Contribution graph written"
    );
    Ok(graph)
}
