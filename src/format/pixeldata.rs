//! Encapsulated pixel data assembly.
//!
//! When the pixel-data attribute (7FE0,0010) carries the undefined-length
//! sentinel, its value is not a contiguous raw buffer but a stream of
//! length-prefixed fragments:
//!
//! ```text
//! (FFFE,E000) length  -> Basic Offset Table (may be zero-length)
//! (FFFE,E000) length  -> fragment 1
//! (FFFE,E000) length  -> fragment 2
//! ...
//! (FFFE,E0DD) 0       -> sequence delimiter
//! ```
//!
//! The offset table is consumed and discarded; frames are located by
//! scanning each fragment for the JPEG Start Of Image marker instead of
//! by offset arithmetic. Fragment bytes before the marker (encoder
//! padding, fragment headers) are stripped so each frame starts exactly
//! at `FF D8`. A fragment with no marker yields no frame; the drop is
//! counted so callers can tell the frame list came up short.

use bytes::Bytes;
use tracing::{debug, trace, warn};

use super::cursor::ByteCursor;
use super::tags::{ITEM_ELEMENT, ITEM_GROUP, SEQUENCE_DELIMITER_ELEMENT};

// =============================================================================
// JPEG Marker
// =============================================================================

/// JPEG Start Of Image marker; every decodable frame payload begins here.
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// Find the first SOI marker in a fragment.
fn find_soi(fragment: &[u8]) -> Option<usize> {
    fragment.windows(2).position(|w| w == SOI)
}

// =============================================================================
// Fragment Extraction
// =============================================================================

/// Outcome of examining one pixel-data fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentOutcome {
    /// The fragment contained an image; payload starts at its SOI marker.
    Frame(Bytes),

    /// No SOI marker anywhere in the fragment; nothing usable.
    Dropped { fragment_len: usize },
}

/// Extract the frame payload from a raw fragment.
///
/// Keeps the suffix beginning at the first SOI marker, dropping any
/// leading non-image bytes. Zero-copy: the returned frame is a sub-slice
/// of the fragment.
pub fn extract_frame(fragment: Bytes) -> FragmentOutcome {
    match find_soi(&fragment) {
        Some(start) => FragmentOutcome::Frame(fragment.slice(start..)),
        None => FragmentOutcome::Dropped {
            fragment_len: fragment.len(),
        },
    }
}

// =============================================================================
// Frame Assembly
// =============================================================================

/// Frames recovered from an encapsulated pixel-data stream.
#[derive(Debug, Clone, Default)]
pub struct FrameAssembly {
    /// One compressed payload per recovered frame, in encounter order.
    pub frames: Vec<Bytes>,

    /// Fragments that contained no SOI marker and produced no frame.
    pub dropped_fragments: usize,
}

/// Consume an undefined-length pixel-data stream at the cursor.
///
/// The cursor must sit just past the pixel-data header. The offset table,
/// if present, is skipped; when the first header is not an item marker
/// the cursor rewinds 4 bytes and fragment scanning starts immediately.
/// The fragment loop ends at the `(FFFE,E0DD)` delimiter, at the buffer
/// edge, or defensively (rewinding 8 bytes) on a non-`FFFE` group.
pub fn assemble_frames(cursor: &mut ByteCursor) -> FrameAssembly {
    let mut assembly = FrameAssembly::default();

    skip_offset_table(cursor);

    while cursor.remaining() >= 8 {
        let Ok(group) = cursor.read_u16_le() else {
            break;
        };
        let Ok(element) = cursor.read_u16_le() else {
            break;
        };
        let Ok(length) = cursor.read_u32_le() else {
            break;
        };

        if group != ITEM_GROUP {
            // Malformed stream: give the 8 header bytes back to the outer
            // attribute loop and stop.
            warn!(
                offset = cursor.position() - 8,
                "expected fragment marker in pixel data, found group {group:04X}, stopping"
            );
            cursor.rewind(8);
            break;
        }

        if element == SEQUENCE_DELIMITER_ELEMENT {
            trace!(offset = cursor.position(), "pixel data delimiter");
            break;
        }

        if element == ITEM_ELEMENT && cursor.remaining() >= length as usize {
            let fragment = cursor
                .take(length as usize)
                .unwrap_or_else(|_| Bytes::new());
            match extract_frame(fragment) {
                FragmentOutcome::Frame(frame) => {
                    trace!(len = frame.len(), "frame extracted");
                    assembly.frames.push(frame);
                }
                FragmentOutcome::Dropped { fragment_len } => {
                    warn!(fragment_len, "fragment without SOI marker dropped");
                    assembly.dropped_fragments += 1;
                }
            }
        }
    }

    debug!(
        frames = assembly.frames.len(),
        dropped = assembly.dropped_fragments,
        "pixel data assembled"
    );
    assembly
}

/// Skip the Basic Offset Table if the stream starts with one.
///
/// When the first header is `(FFFE,E000)` its length is read and that
/// many bytes are discarded; per-frame offsets are never surfaced.
/// Otherwise the 4 header bytes are rewound and no table is assumed.
fn skip_offset_table(cursor: &mut ByteCursor) {
    if cursor.remaining() < 8 {
        return;
    }
    let Ok(group) = cursor.read_u16_le() else {
        return;
    };
    let Ok(element) = cursor.read_u16_le() else {
        return;
    };

    if group == ITEM_GROUP && element == ITEM_ELEMENT {
        let Ok(table_len) = cursor.read_u32_le() else {
            return;
        };
        trace!(table_len, "skipping basic offset table");
        if cursor.skip(table_len as usize).is_err() {
            // Table claims more bytes than exist; nothing after it can be
            // a fragment, so park the cursor at the end.
            let end = cursor.len();
            cursor.seek(end);
        }
    } else {
        cursor.rewind(4);
    }
}

// =============================================================================
// Tests
// =============================================================================
