//! DICOM dataset decoding.
//!
//! This module decodes explicit-VR little-endian DICOM files into an
//! ordered attribute list. Decoding is permissive by design: malformed
//! content never raises an error, the attribute loop simply stops and
//! returns the longest prefix it could make sense of.
//!
//! # Key Concepts
//!
//! - **Attribute**: one `(group, element, VR, length, value)` record,
//!   the atomic unit of the format.
//!
//! - **Undefined length**: the `0xFFFFFFFF` length sentinel meaning "the
//!   true extent is marked by a delimiter item later in the stream". Only
//!   sequences and pixel data can carry it.
//!
//! - **Flattened sequences**: undefined-length sequence items are
//!   concatenated into one opaque payload, not parsed recursively.
//!
//! - **Encapsulated pixel data**: the pixel-data attribute as a stream of
//!   length-prefixed compressed fragments; frames are recovered by
//!   scanning for the JPEG SOI marker.

mod cursor;
mod dataset;
mod header;
mod pixeldata;
mod sequence;
pub mod tags;
mod vr;

pub use cursor::ByteCursor;
pub use dataset::{
    parse, DataElement, Dataset, ParseStats, Parser, StopReason, DATA_START, MAGIC_SIZE,
    PREAMBLE_SIZE,
};
pub use header::{decode_header, ElementHeader, HEADER_MIN_SIZE};
pub use pixeldata::{assemble_frames, extract_frame, FragmentOutcome, FrameAssembly, SOI};
pub use sequence::flatten_sequence;
pub use tags::{Tag, UNDEFINED_LENGTH};
pub use vr::{LengthForm, Vr};

/// Probe for the "DICM" identifier at offset 128.
///
/// Advisory only: the parser skips the preamble region unconditionally
/// and never validates it. Tools can use this to warn when an input is
/// probably not a Part 10 file at all.
pub fn has_dicm_marker(data: &[u8]) -> bool {
    data.len() >= DATA_START && &data[PREAMBLE_SIZE..DATA_START] == b"DICM"
}
