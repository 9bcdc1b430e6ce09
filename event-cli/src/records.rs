//! Event record reader
//!
//! Collaborator glue between an event source and the analyzer library: reads
//! JSON-lines event records (one event per line) and materializes
//! [`Event`] arenas. Particle and vertex cross-references are plain array
//! indices in the record and are validated while building.
//!
//! Record shape:
//!
//! ```json
//! {"particles": [{"px": 0.0, "py": 0.0, "pz": 40.0, "e": 45.0, "pid": 5,
//!                 "status": 23, "end_vertex": 0}],
//!  "vertices": [{"out": [1, 2]}]}
//! ```

use anyhow::{anyhow, Context, Result};
use event_analyzer::{Event, FourMomentum, Particle, Vertex};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ParticleRecord {
    px: f64,
    py: f64,
    pz: f64,
    e: f64,
    pid: i32,
    status: i32,
    #[serde(default)]
    end_vertex: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct VertexRecord {
    out: Vec<usize>,
}

#[derive(Debug, Deserialize)]
struct EventRecord {
    particles: Vec<ParticleRecord>,
    #[serde(default)]
    vertices: Vec<VertexRecord>,
}

/// Streaming reader over a JSON-lines event file
///
/// Blank lines are skipped; every other line must hold one event record.
/// Errors carry the 1-based line number of the offending record.
pub struct EventReader<R: BufRead> {
    reader: R,
    line: usize,
}

impl EventReader<BufReader<File>> {
    /// Open an event file for streaming
    pub fn open(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("failed to open event file: {:?}", path))?;
        log::info!("Reading events from {:?}", path);
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> EventReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }

    fn parse_event(&self, line: &str) -> Result<Event> {
        let record: EventRecord = serde_json::from_str(line)
            .with_context(|| format!("line {}: invalid event record", self.line))?;

        let mut event = Event::new();

        let particle_ids: Vec<_> = record
            .particles
            .iter()
            .map(|p| {
                event.add_particle(Particle::new(
                    FourMomentum::new(p.px, p.py, p.pz, p.e),
                    p.pid,
                    p.status,
                ))
            })
            .collect();

        let mut vertex_ids = Vec::with_capacity(record.vertices.len());
        for (v_idx, vertex) in record.vertices.iter().enumerate() {
            let mut out = Vec::with_capacity(vertex.out.len());
            for &p_idx in &vertex.out {
                let id = particle_ids.get(p_idx).copied().ok_or_else(|| {
                    anyhow!(
                        "line {}: vertex {} lists missing particle {}",
                        self.line,
                        v_idx,
                        p_idx
                    )
                })?;
                out.push(id);
            }
            vertex_ids.push(event.add_vertex(Vertex::new(out)));
        }

        for (p_idx, particle) in record.particles.iter().enumerate() {
            if let Some(v_idx) = particle.end_vertex {
                let vertex_id = vertex_ids.get(v_idx).copied().ok_or_else(|| {
                    anyhow!(
                        "line {}: particle {} points at missing vertex {}",
                        self.line,
                        p_idx,
                        v_idx
                    )
                })?;
                event.set_end_vertex(particle_ids[p_idx], vertex_id)?;
            }
        }

        Ok(event)
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut line = String::new();
            self.line += 1;
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    return Some(self.parse_event(trimmed));
                }
                Err(e) => {
                    return Some(
                        Err(e).with_context(|| format!("line {}: read failed", self.line)),
                    )
                }
            }
        }
    }
}
