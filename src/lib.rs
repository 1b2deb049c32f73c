//! # dicom-decoder
//!
//! A permissive decoder for DICOM files in the explicit-VR little-endian
//! encoding, including the two irregular nested sub-formats:
//! undefined-length sequences (flattened into one payload) and
//! undefined-length encapsulated pixel data (split into per-frame
//! compressed payloads).
//!
//! The decoder is total over arbitrary byte input: it never fails on
//! malformed content, it stops and returns the attributes decoded so
//! far. The only hard error in the crate is failing to read the input
//! file into memory, which belongs to the caller supplying the buffer.
//!
//! ## Scope
//!
//! Attributes are exposed generically by `(group, element)` identity with
//! typed accessors; assigning meaning to a particular identity is the
//! caller's lookup, not the decoder's. No rendering, windowing, or
//! dictionary semantics live here. Implicit-VR datasets are not
//! supported.
//!
//! ## Architecture
//!
//! - [`mod@format`] - cursor, header decoding, sequence flattening,
//!   pixel-data assembly, and the dataset parser
//! - [`error`] - truncation signalling and load errors
//! - [`config`] - CLI configuration for the `dicom-decoder` dump binary
//!
//! ## Example
//!
//! ```rust
//! use bytes::Bytes;
//! use dicom_decoder::{parse, tags::well_known};
//!
//! # fn buffer_from_somewhere() -> Bytes { Bytes::from(vec![0u8; 200]) }
//! let data: Bytes = buffer_from_somewhere();
//! let dataset = parse(data);
//!
//! if let Some(rows) = dataset.int_of(well_known::ROWS) {
//!     println!("image has {rows} rows");
//! }
//! for frame in dataset.frames().unwrap_or_default() {
//!     // each frame starts at its JPEG SOI marker
//!     assert_eq!(&frame[..2], &[0xFF, 0xD8]);
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;

// Re-export commonly used types
pub use config::Config;
pub use error::{LoadError, Truncated};
pub use format::tags;
pub use format::{
    assemble_frames, decode_header, extract_frame, flatten_sequence, has_dicm_marker, parse,
    ByteCursor, DataElement, Dataset, ElementHeader, FragmentOutcome, FrameAssembly, LengthForm,
    ParseStats, Parser, StopReason, Tag, Vr, DATA_START, HEADER_MIN_SIZE, MAGIC_SIZE,
    PREAMBLE_SIZE, SOI, UNDEFINED_LENGTH,
};
