use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{create_dir_all, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::algorithms::Algorithm;
use crate::routines::settings::Settings;

/// One sweep result: a single algorithm run on a single instance size
#[derive(Debug, Clone, Serialize)]
pub struct SweepRow {
    algorithm: Algorithm,
    observations: usize,
    dimension: usize,
    horizon: usize,
    step: f64,
    objective: f64,
    elapsed_s: f64,
}

impl SweepRow {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        algorithm: Algorithm,
        observations: usize,
        dimension: usize,
        horizon: usize,
        step: f64,
        objective: f64,
        elapsed_s: f64,
    ) -> Self {
        Self {
            algorithm,
            observations,
            dimension,
            horizon,
            step,
            objective,
            elapsed_s,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn observations(&self) -> usize {
        self.observations
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Objective of the time-averaged iterate
    pub fn objective(&self) -> f64 {
        self.objective
    }

    pub fn elapsed_s(&self) -> f64 {
        self.elapsed_s
    }
}

/// Collects the [SweepRow]s of a whole sweep and writes the CSV report
#[derive(Debug, Clone, Serialize)]
pub struct SweepLog {
    rows: Vec<SweepRow>,
}

impl SweepLog {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn push(&mut self, row: SweepRow) {
        self.rows.push(row);
    }

    pub fn extend(&mut self, rows: Vec<SweepRow>) {
        self.rows.extend(rows);
    }

    pub fn rows(&self) -> &[SweepRow] {
        &self.rows
    }

    /// Write all rows to `sweep.csv` in the output folder
    pub fn write(&self, settings: &Settings) -> Result<()> {
        tracing::debug!("Writing sweep results...");
        let outputfile = OutputFile::new(settings.output.path.as_str(), "sweep.csv")?;
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(outputfile.file());

        // Write headers
        writer.write_field("algorithm")?;
        writer.write_field("observations")?;
        writer.write_field("dimension")?;
        writer.write_field("horizon")?;
        writer.write_field("step")?;
        writer.write_field("objective")?;
        writer.write_field("elapsed_s")?;
        writer.write_record(None::<&[u8]>)?;

        for row in &self.rows {
            writer.write_field(format!("{}", row.algorithm))?;
            writer.write_field(format!("{}", row.observations))?;
            writer.write_field(format!("{}", row.dimension))?;
            writer.write_field(format!("{}", row.horizon))?;
            writer.write_field(format!("{:.6e}", row.step))?;
            writer.write_field(format!("{:.6e}", row.objective))?;
            writer.write_field(format!("{:.3}", row.elapsed_s))?;
            writer.write_record(None::<&[u8]>)?;
        }
        writer.flush()?;
        tracing::debug!("Sweep results written to {:?}", outputfile.relative_path());
        Ok(())
    }
}

impl Default for SweepLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Contains all the necessary information of an output file
#[derive(Debug)]
pub struct OutputFile {
    file: File,
    relative_path: PathBuf,
}

impl OutputFile {
    pub fn new(folder: &str, file_name: &str) -> Result<Self> {
        let relative_path = Path::new(&folder).join(file_name);

        if let Some(parent) = relative_path.parent() {
            create_dir_all(parent)
                .with_context(|| format!("Failed to create directories for {:?}", parent))?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&relative_path)
            .with_context(|| format!("Failed to open file: {:?}", relative_path))?;

        Ok(OutputFile {
            file,
            relative_path,
        })
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    pub fn file_owned(self) -> File {
        self.file
    }

    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }
}
