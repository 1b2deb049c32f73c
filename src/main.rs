//! dicom-decoder - dump the attributes of a DICOM file.
//!
//! This binary loads a file into memory, decodes its dataset, and prints
//! one row per attribute plus a parse summary.

use std::process::ExitCode;

use bytes::Bytes;
use clap::Parser as ClapParser;
use serde::Serialize;
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dicom_decoder::{
    config::{Config, VALUE_PREVIEW_BYTES},
    error::LoadError,
    format::{has_dicm_marker, DataElement, Dataset, ParseStats, Parser},
};

fn main() -> ExitCode {
    let config = Config::parse();
    init_logging(&config);

    let data = match load_file(&config.file) {
        Ok(data) => data,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if !has_dicm_marker(&data) {
        warn!(
            "{}: no DICM marker at offset 128; decoding anyway",
            config.file
        );
    }

    let (dataset, stats) = Parser::new().parse_with_stats(data);

    if config.json {
        print_json(&config.file, &dataset, &stats);
    } else {
        print_table(&dataset, &stats, config.limit);
    }

    ExitCode::SUCCESS
}

/// Read the whole file into an immutable buffer.
///
/// This is the one fallible step: decoding itself cannot fail.
fn load_file(path: &str) -> Result<Bytes, LoadError> {
    let contents = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })?;
    Ok(Bytes::from(contents))
}

/// Initialize the tracing/logging subsystem.
fn init_logging(config: &Config) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// =============================================================================
// Table Output
// =============================================================================

fn print_table(dataset: &Dataset, stats: &ParseStats, limit: usize) {
    println!("{:<12} {:<4} {:>10}  VALUE", "TAG", "VR", "LENGTH");
    for element in dataset.iter().take(limit) {
        println!(
            "{:<12} {:<4} {:>10}  {}",
            element.tag.to_string(),
            element.vr.to_string(),
            element.length,
            preview(element)
        );
    }
    if dataset.len() > limit {
        println!("... {} more attribute(s) not shown", dataset.len() - limit);
    }

    println!();
    println!(
        "{} attribute(s), {} frame(s), {} dropped fragment(s); stopped: {:?} at offset {}",
        stats.elements, stats.frames, stats.dropped_fragments, stats.stop, stats.stop_offset
    );
}

/// One-line rendering of an element's value.
///
/// Frames win over everything, then small integers, then printable text,
/// then a hex prefix of the raw bytes.
fn preview(element: &DataElement) -> String {
    if let Some(frames) = element.frames() {
        return format!("[{} frame(s)]", frames.len());
    }
    if let Some(n) = element.as_int() {
        return n.to_string();
    }
    if let Some(text) = element.as_text() {
        if !text.is_empty() {
            return text;
        }
    }
    let bytes = element.bytes();
    let shown = &bytes[..bytes.len().min(VALUE_PREVIEW_BYTES)];
    let mut rendered = hex::encode(shown);
    if bytes.len() > VALUE_PREVIEW_BYTES {
        rendered.push_str("...");
    }
    rendered
}

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Serialize)]
struct JsonSummary<'a> {
    file: &'a str,
    stats: &'a ParseStats,
    attributes: Vec<JsonAttribute>,
}

#[derive(Serialize)]
struct JsonAttribute {
    tag: String,
    vr: String,
    length: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    int: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frames: Option<Vec<usize>>,
}

fn print_json(file: &str, dataset: &Dataset, stats: &ParseStats) {
    let attributes = dataset
        .iter()
        .map(|element| JsonAttribute {
            tag: element.tag.to_string(),
            vr: element.vr.to_string(),
            length: element.length,
            int: element.as_int(),
            text: element.as_text().filter(|t| !t.is_empty()),
            frames: element
                .frames()
                .map(|frames| frames.iter().map(Bytes::len).collect()),
        })
        .collect();

    let summary = JsonSummary {
        file,
        stats,
        attributes,
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => error!("failed to serialize summary: {}", e),
    }
}
