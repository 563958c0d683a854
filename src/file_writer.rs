//! File writing utilities for dashboard views.
//!
//! Views are handed to the plotting side as files: either one JSON document
//! holding every chart, or one CSV table per chart.

use crate::error::Result;
use crate::models::{OutputFormat, WordCount};
use crate::service::DashboardView;
use csv::Writer;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write a view into `output_dir`, creating the directory if needed.
///
/// # Returns
///
/// Paths of the files written
pub fn write_view(view: &DashboardView, format: OutputFormat, output_dir: &Path) -> Result<Vec<PathBuf>> {
    create_dir_all(output_dir)?;

    match format {
        OutputFormat::Json => {
            let file_path = output_dir.join(format!("view.{}", format.extension()));
            write_json_file(view, &file_path)?;
            Ok(vec![file_path])
        }
        OutputFormat::Csv => {
            let ratings = output_dir.join("rating_distribution.csv");
            let positive = output_dir.join("words_positive.csv");
            let negative = output_dir.join("words_negative.csv");
            let trend = output_dir.join("review_trend.csv");

            write_rating_csv(view, &ratings)?;
            write_words_csv(&view.words.positive, &positive)?;
            write_words_csv(&view.words.negative, &negative)?;
            write_trend_csv(view, &trend)?;

            Ok(vec![ratings, positive, negative, trend])
        }
    }
}

/// Write a view as pretty-printed JSON to any writer
pub fn write_view_json<W: Write>(view: &DashboardView, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, view)?;
    Ok(())
}

fn write_json_file(view: &DashboardView, file_path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(file_path)?);
    write_view_json(view, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Header: `Rating, count`
fn write_rating_csv(view: &DashboardView, file_path: &Path) -> Result<()> {
    let mut writer = Writer::from_path(file_path)?;
    writer.write_record(["Rating", "count"])?;
    for (rating, count) in &view.rating_distribution {
        writer.write_record([rating.to_string(), count.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Header: `word, count`
fn write_words_csv(words: &[WordCount], file_path: &Path) -> Result<()> {
    let mut writer = Writer::from_path(file_path)?;
    writer.write_record(["word", "count"])?;
    for entry in words {
        writer.write_record([entry.word.clone(), entry.count.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Header: `Review Date, counts`
fn write_trend_csv(view: &DashboardView, file_path: &Path) -> Result<()> {
    let mut writer = Writer::from_path(file_path)?;
    writer.write_record(["Review Date", "counts"])?;
    for point in &view.trend {
        writer.write_record([point.period.to_string(), point.count.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
