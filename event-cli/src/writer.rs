//! CSV output for training rows
//!
//! Writes one row per event: the event-level scalar and seed PID, followed by
//! a fixed number of particle blocks (pt, eta, phi, pid). Events with fewer
//! selected particles are zero-padded so every row has the same width,
//! `2 + 4 * max_particles` columns; surplus particles are truncated. The
//! particle list is assumed to be already ordered by descending pT.

use anyhow::{Context, Result};
use event_analyzer::Particle;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct CsvWriter<W: Write> {
    writer: W,
    max_particles: usize,
}

impl CsvWriter<BufWriter<File>> {
    /// Create the output file, truncating any existing one
    pub fn create(path: &Path, max_particles: usize) -> Result<Self> {
        let file =
            File::create(path).with_context(|| format!("failed to create CSV file: {:?}", path))?;
        log::info!("Writing CSV rows to {:?}", path);
        Ok(Self::new(BufWriter::new(file), max_particles))
    }
}

impl<W: Write> CsvWriter<W> {
    pub fn new(writer: W, max_particles: usize) -> Self {
        Self {
            writer,
            max_particles,
        }
    }

    /// Write one event row
    pub fn write_event(&mut self, q2: f64, seed_pid: i32, particles: &[&Particle]) -> Result<()> {
        write!(self.writer, "{},{}", q2, seed_pid)?;

        for particle in particles.iter().take(self.max_particles) {
            let momentum = &particle.momentum;
            write!(
                self.writer,
                ",{},{},{},{}",
                momentum.pt(),
                momentum.eta(),
                momentum.phi(),
                particle.pid
            )?;
        }

        // zero padding keeps the row width fixed
        for _ in particles.len().min(self.max_particles)..self.max_particles {
            self.writer.write_all(b",0,0,0,0")?;
        }

        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flush buffered rows to the underlying writer
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
