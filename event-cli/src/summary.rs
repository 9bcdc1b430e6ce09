//! Plain-text run summary

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use event_analyzer::EventClassification;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Aggregated counters for one analysis run
pub struct RunSummary {
    started: DateTime<Utc>,
    events: usize,
    category_totals: BTreeMap<String, usize>,
    signal_total: Option<usize>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            started: Utc::now(),
            events: 0,
            category_totals: BTreeMap::new(),
            signal_total: None,
        }
    }

    /// Fold one event's classification into the counters
    pub fn record(&mut self, classification: &EventClassification, signal_count: Option<usize>) {
        self.events += 1;
        for label in classification.labels() {
            *self.category_totals.entry(label.to_string()).or_insert(0) +=
                classification.particles_of(label).len();
        }
        if let Some(count) = signal_count {
            *self.signal_total.get_or_insert(0) += count;
        }
    }

    pub fn events(&self) -> usize {
        self.events
    }

    /// Render the summary
    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let finished = Utc::now();
        writeln!(writer, "Analysis run summary")?;
        writeln!(writer, "--------------------")?;
        writeln!(
            writer,
            "started:  {}",
            self.started.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(
            writer,
            "finished: {}",
            finished.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(writer, "events analyzed: {}", self.events)?;
        for (label, total) in &self.category_totals {
            writeln!(writer, "  {}: {} particles", label, total)?;
        }
        if let Some(total) = self.signal_total {
            writeln!(writer, "  signal search: {} terminal particles", total)?;
        }
        Ok(())
    }

    /// Write the summary to a file
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("failed to create summary file: {:?}", path))?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)?;
        writer.flush()?;
        log::info!("Run summary written to {:?}", path);
        Ok(())
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}
