//! Configuration for the `dicom-decoder` dump binary.
//!
//! Options come from command-line arguments via clap, with environment
//! variable fallbacks using the `DICOM_` prefix:
//!
//! - `DICOM_JSON` - emit the JSON summary instead of the table
//! - `DICOM_LIMIT` - maximum number of attribute rows to print

use clap::Parser;

// =============================================================================
// Default Values
// =============================================================================

/// Default maximum number of attribute rows printed in table mode.
pub const DEFAULT_ROW_LIMIT: usize = 200;

/// Bytes of a value shown in the table's preview column.
pub const VALUE_PREVIEW_BYTES: usize = 16;

// =============================================================================
// CLI Arguments
// =============================================================================

/// dicom-decoder - dump the attributes of a DICOM file.
///
/// Reads the file into memory, decodes its dataset, and prints one row
/// per attribute plus a parse summary. Decoding is best-effort: a
/// malformed or truncated file prints whatever prefix could be decoded.
#[derive(Parser, Debug, Clone)]
#[command(name = "dicom-decoder")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Path to the DICOM file to dump.
    pub file: String,

    /// Emit a JSON summary instead of the attribute table.
    #[arg(long, default_value_t = false, env = "DICOM_JSON")]
    pub json: bool,

    /// Maximum number of attribute rows to print in table mode.
    #[arg(long, default_value_t = DEFAULT_ROW_LIMIT, env = "DICOM_LIMIT")]
    pub limit: usize,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// Tracing filter directive for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "dicom_decoder=info",
            1 => "dicom_decoder=debug",
            _ => "dicom_decoder=trace",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
