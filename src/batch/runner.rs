use chrono::Utc;
use glob::{Pattern, glob};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::summary::{ClassSummary, RunSummary, SUMMARY_FILE_NAME};
use super::{ClassLabel, RAW_EXTENSION};
use crate::config::Config;
use crate::error::{ProcessError, Result};
use crate::ndvi::compute_ndvi;
use crate::readers;
use crate::resize::resize_area;
use crate::writers::{ARRAY_EXTENSION, write_npy};

/// Converts every raw image of every class into a resized NDVI array.
///
/// The output root belongs to the runner: it is wiped and recreated on every
/// run, never merged with a previous one.
#[derive(Debug)]
pub struct BatchRunner {
    config: Config,
}

impl BatchRunner {
    pub fn new(config: Config) -> Self {
        BatchRunner { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn process(&self) -> Result<RunSummary> {
        let input_dir = self.config.input_dir();
        let output_dir = self.config.output_dir();
        let img_size = self.config.img_size();

        info!("=== Hyperspectral Image Processor ===");
        info!("Input Directory: {}", display_absolute(input_dir));
        info!("Output Directory: {}", display_absolute(output_dir));
        info!("Target Image Size: {}x{} pixels", img_size, img_size);
        info!(
            "Using Bands: Red={}nm, NIR={}nm",
            self.config.sensor().red_wavelength(),
            self.config.sensor().nir_wavelength()
        );

        if !input_dir.is_dir() {
            error!("Input directory not found at {}", input_dir.display());
            return Err(ProcessError::InputNotFound(input_dir.to_path_buf()));
        }

        let started_at = Utc::now();
        self.prepare_output()?;

        let mut classes = Vec::with_capacity(ClassLabel::ALL.len());
        for class in ClassLabel::ALL {
            classes.push(self.process_class(class)?);
        }

        let summary = RunSummary {
            started_at,
            finished_at: Utc::now(),
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            img_size,
            sensor: *self.config.sensor(),
            classes,
        };

        let summary_path = output_dir.join(SUMMARY_FILE_NAME);
        if let Err(e) = summary.write_to(&summary_path) {
            warn!("Could not write {}: {}", summary_path.display(), e);
        }

        info!("=== Processing Complete ===");
        info!("Saved results to: {}", display_absolute(output_dir));
        info!("Summary:\n{}", summary);

        Ok(summary)
    }

    /// Remove whatever sits at the output root and recreate it empty.
    fn prepare_output(&self) -> Result<()> {
        let input_dir = self.config.input_dir();
        let output_dir = self.config.output_dir();

        let preparation_error = |source: io::Error| ProcessError::OutputPreparation {
            path: output_dir.to_path_buf(),
            source,
        };

        if output_dir.exists() {
            // Wiping an ancestor of the input would destroy the raw data.
            let input = fs::canonicalize(input_dir).map_err(preparation_error)?;
            let output = fs::canonicalize(output_dir).map_err(preparation_error)?;
            if input.starts_with(&output) {
                return Err(preparation_error(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "output directory contains the input directory",
                )));
            }

            if output_dir.is_dir() {
                fs::remove_dir_all(output_dir).map_err(preparation_error)?;
            } else {
                fs::remove_file(output_dir).map_err(preparation_error)?;
            }
            info!("Cleared existing output directory.");
        }

        fs::create_dir_all(output_dir).map_err(preparation_error)?;
        Ok(())
    }

    fn process_class(&self, class: ClassLabel) -> Result<ClassSummary> {
        let input_class_dir = self.config.input_dir().join(class.dir_name());
        let output_class_dir = self.config.output_dir().join(class.dir_name());

        fs::create_dir_all(&output_class_dir).map_err(|source| {
            ProcessError::OutputPreparation {
                path: output_class_dir.clone(),
                source,
            }
        })?;

        if !input_class_dir.is_dir() {
            warn!(
                "No input directory for class '{}' at {}, skipping",
                class,
                input_class_dir.display()
            );
        }

        let raw_images = find_raw_images(&input_class_dir);
        info!(
            "Processing {} images in class '{}'...",
            raw_images.len(),
            class
        );

        let progress = class_progress(raw_images.len(), class);
        let step = |path: &PathBuf| {
            let outcome = self.process_image(path, &output_class_dir);
            progress.inc(1);
            outcome
        };

        let outcomes: Vec<Result<PathBuf>> = if self.config.parallel() {
            raw_images.par_iter().map(step).collect()
        } else {
            raw_images.iter().map(step).collect()
        };
        progress.finish();

        let mut summary = ClassSummary::new(class, raw_images.len());
        for (path, outcome) in raw_images.iter().zip(outcomes) {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            match outcome {
                Ok(output_path) => {
                    debug!("Saved {}", output_path.display());
                    summary.succeeded += 1;
                }
                Err(e) => {
                    error!("Error processing {}: {}", file_name, e);
                    summary.record_failure(file_name, e.to_string());
                }
            }
        }
        summary.sort_failures();

        Ok(summary)
    }

    /// Decode one raw image, compute its NDVI, resize and save it.
    ///
    /// Returns the path of the written array.
    pub fn process_image(&self, input_path: &Path, output_class_dir: &Path) -> Result<PathBuf> {
        // Stored as (height, width, band); NDVI wants bands first.
        let cube = readers::create_reader(input_path)?.read_cube()?;
        let bands_first = cube.permuted_axes([2, 0, 1]);

        let ndvi = compute_ndvi(bands_first.view(), self.config.sensor())?;

        let img_size = self.config.img_size();
        let resized = resize_area(ndvi.view(), (img_size, img_size))?;

        let output_path = output_class_dir.join(output_file_name(input_path)?);
        write_npy(&output_path, resized.view())?;

        Ok(output_path)
    }
}

/// Regular files directly inside `class_dir` ending in `.tif`.
pub fn find_raw_images(class_dir: &Path) -> Vec<PathBuf> {
    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&class_dir.to_string_lossy()),
        RAW_EXTENSION
    );

    match glob(&pattern) {
        Ok(paths) => paths
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Could not read {}: {}", e.path().display(), e.error());
                    None
                }
            })
            .filter(|path| path.is_file())
            .collect(),
        Err(e) => {
            warn!("Invalid search pattern {}: {}", pattern, e);
            Vec::new()
        }
    }
}

fn output_file_name(input_path: &Path) -> Result<String> {
    let stem = input_path.file_stem().ok_or_else(|| {
        ProcessError::Persist(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no file name", input_path.display()),
        ))
    })?;

    Ok(format!("{}.{}", stem.to_string_lossy(), ARRAY_EXTENSION))
}

const PROGRESS_TEMPLATE: &str =
    "{prefix:>6} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}";

fn class_progress(len: usize, class: ClassLabel) -> ProgressBar {
    let progress = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template(PROGRESS_TEMPLATE) {
        progress.set_style(style.progress_chars("#>-"));
    }
    progress.set_prefix(class.to_string());
    progress
}

fn display_absolute(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
