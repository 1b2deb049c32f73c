//! Dataset decoding: the attribute loop and its output types.
//!
//! [`Parser::parse`] is the crate's entry point. It walks a resident
//! buffer left to right, decoding one attribute at a time and appending
//! it to an ordered [`Dataset`]. Parsing is total: no malformed input
//! ever surfaces an error, the loop just stops and returns whatever was
//! decoded up to that point. [`Parser::parse_with_stats`] additionally
//! reports why the loop stopped and what was dropped along the way.

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, trace};

use super::cursor::ByteCursor;
use super::header::{decode_header, ElementHeader, HEADER_MIN_SIZE};
use super::pixeldata::assemble_frames;
use super::sequence::flatten_sequence;
use super::tags::Tag;
use super::vr::Vr;

// =============================================================================
// Layout Constants
// =============================================================================

/// Fixed preamble at the start of every Part 10 file.
pub const PREAMBLE_SIZE: usize = 128;

/// The 4-byte format identifier ("DICM") following the preamble.
pub const MAGIC_SIZE: usize = 4;

/// Offset of the first attribute: preamble plus identifier, both skipped
/// unconditionally and never validated.
pub const DATA_START: usize = PREAMBLE_SIZE + MAGIC_SIZE;

// =============================================================================
// DataElement
// =============================================================================

/// One decoded attribute: identity, VR, declared length, and payload.
///
/// Elements are immutable once constructed. For a flattened sequence the
/// value is the concatenation of its item payloads and `length` is the
/// flattened byte count; for encapsulated pixel data the value is empty
/// and the payload lives in `frames`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataElement {
    pub tag: Tag,
    pub vr: Vr,
    pub length: u32,
    value: Bytes,
    frames: Option<Vec<Bytes>>,
}

impl DataElement {
    /// Construct an ordinary element from its decoded parts.
    pub fn new(tag: Tag, vr: Vr, length: u32, value: Bytes) -> Self {
        Self {
            tag,
            vr,
            length,
            value,
            frames: None,
        }
    }

    /// Construct the encapsulated pixel-data element.
    ///
    /// The declared length was the undefined sentinel, so the stored
    /// length is fixed at zero and the value is empty.
    pub fn with_frames(tag: Tag, vr: Vr, frames: Vec<Bytes>) -> Self {
        Self {
            tag,
            vr,
            length: 0,
            value: Bytes::new(),
            frames: Some(frames),
        }
    }

    /// The raw payload, unchanged from the source bytes.
    #[inline]
    pub fn bytes(&self) -> &Bytes {
        &self.value
    }

    /// Per-frame compressed payloads, present only on encapsulated
    /// pixel data.
    #[inline]
    pub fn frames(&self) -> Option<&[Bytes]> {
        self.frames.as_deref()
    }

    /// Interpret the value as a little-endian unsigned integer.
    ///
    /// Defined only for payloads of exactly 2 or 4 bytes (US/UL-sized
    /// fields); anything else yields `None`.
    pub fn as_int(&self) -> Option<u32> {
        match self.value.len() {
            2 => Some(u32::from(u16::from_le_bytes([self.value[0], self.value[1]]))),
            4 => Some(u32::from_le_bytes([
                self.value[0],
                self.value[1],
                self.value[2],
                self.value[3],
            ])),
            _ => None,
        }
    }

    /// Interpret the value as trimmed ASCII text.
    ///
    /// Returns `None` when the payload is not ASCII. DICOM pads text
    /// values to even length with spaces or NULs; the padding is trimmed.
    pub fn as_text(&self) -> Option<String> {
        if !self.value.is_ascii() {
            return None;
        }
        let text = std::str::from_utf8(&self.value).ok()?;
        Some(
            text.trim_matches(|c: char| c.is_ascii_whitespace() || c.is_ascii_control())
                .to_string(),
        )
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// An ordered collection of decoded attributes, insertion order equal to
/// file order. Repeated tags are preserved, not merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    elements: Vec<DataElement>,
}

impl Dataset {
    /// Number of decoded attributes.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether no attributes were decoded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over attributes in file order.
    pub fn iter(&self) -> impl Iterator<Item = &DataElement> {
        self.elements.iter()
    }

    /// Find the first attribute with the given tag, by linear scan.
    pub fn find(&self, tag: Tag) -> Option<&DataElement> {
        self.elements.iter().find(|e| e.tag == tag)
    }

    /// Find a tag and project its value as an integer.
    pub fn int_of(&self, tag: Tag) -> Option<u32> {
        self.find(tag)?.as_int()
    }

    /// Frames of the encapsulated pixel-data attribute, if present.
    pub fn frames(&self) -> Option<&[Bytes]> {
        self.elements.iter().find_map(|e| e.frames())
    }

    /// Number of encapsulated frames, zero when there are none.
    pub fn frame_count(&self) -> usize {
        self.frames().map_or(0, <[Bytes]>::len)
    }

    fn push(&mut self, element: DataElement) {
        self.elements.push(element);
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DataElement;
    type IntoIter = std::slice::Iter<'a, DataElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

// =============================================================================
// Parse Statistics
// =============================================================================

/// Why the attribute loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The buffer was shorter than the 132-byte preamble region.
    BufferTooSmall,

    /// Fewer than 8 bytes remained where the next header would start.
    EndOfData,

    /// A header could not be read in full.
    TruncatedHeader,

    /// A declared value length exceeded the remaining buffer.
    TruncatedValue,
}

/// Diagnostic counters for one parse call.
///
/// The dataset alone does not say why decoding stopped or whether any
/// pixel-data fragments were dropped; callers that care read it here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Attributes appended to the dataset.
    pub elements: usize,

    /// Undefined-length sequences flattened.
    pub sequences: usize,

    /// Frames recovered from encapsulated pixel data.
    pub frames: usize,

    /// Pixel-data fragments dropped for lacking an SOI marker.
    pub dropped_fragments: usize,

    /// Why the loop stopped.
    pub stop: StopReason,

    /// Cursor position when the loop stopped.
    pub stop_offset: usize,
}

// =============================================================================
// Parser
// =============================================================================

/// Decodes a resident DICOM buffer into a [`Dataset`].
///
/// The parser holds no state between calls and performs no I/O; separate
/// parses on independent buffers are free to run concurrently. Input is
/// assumed to be explicit VR little-endian; implicit-VR data will
/// desynchronize the attribute loop and typically yields a short or
/// empty dataset rather than an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a buffer, returning the decoded dataset.
    ///
    /// Total over arbitrary input: malformed content stops the loop and
    /// the attributes decoded so far are returned. A buffer shorter than
    /// 132 bytes yields an empty dataset.
    pub fn parse(&self, data: Bytes) -> Dataset {
        self.parse_with_stats(data).0
    }

    /// Parse a buffer, also returning diagnostic counters and the reason
    /// the attribute loop stopped.
    pub fn parse_with_stats(&self, data: Bytes) -> (Dataset, ParseStats) {
        let mut dataset = Dataset::default();
        let mut stats = ParseStats {
            elements: 0,
            sequences: 0,
            frames: 0,
            dropped_fragments: 0,
            stop: StopReason::EndOfData,
            stop_offset: 0,
        };

        if data.len() < DATA_START {
            debug!(len = data.len(), "buffer shorter than preamble region");
            stats.stop = StopReason::BufferTooSmall;
            return (dataset, stats);
        }

        let mut cursor = ByteCursor::new(data);
        cursor.seek(DATA_START);

        while cursor.remaining() >= HEADER_MIN_SIZE {
            let header = match decode_header(&mut cursor) {
                Ok(header) => header,
                Err(_) => {
                    stats.stop = StopReason::TruncatedHeader;
                    break;
                }
            };
            trace!(
                tag = %header.tag,
                vr = %header.vr,
                length = header.length,
                "attribute header decoded"
            );

            if header.is_delimited_sequence() {
                let flattened = flatten_sequence(&mut cursor);
                let length = flattened.len() as u32;
                dataset.push(DataElement::new(header.tag, header.vr, length, flattened));
                stats.sequences += 1;
            } else if header.is_encapsulated_pixel_data() {
                let assembly = assemble_frames(&mut cursor);
                stats.frames += assembly.frames.len();
                stats.dropped_fragments += assembly.dropped_fragments;
                dataset.push(DataElement::with_frames(
                    header.tag,
                    header.vr,
                    assembly.frames,
                ));
            } else if !self.read_standard_value(&mut cursor, &header, &mut dataset) {
                stats.stop = StopReason::TruncatedValue;
                break;
            }
        }

        stats.elements = dataset.len();
        stats.stop_offset = cursor.position();
        debug!(
            elements = stats.elements,
            frames = stats.frames,
            stop = ?stats.stop,
            offset = stats.stop_offset,
            "parse finished"
        );
        (dataset, stats)
    }

    /// Read a bounded-length value and append the attribute.
    ///
    /// Returns `false` when the declared length exceeds the remaining
    /// buffer; the truncated attribute is not constructed.
    fn read_standard_value(
        &self,
        cursor: &mut ByteCursor,
        header: &ElementHeader,
        dataset: &mut Dataset,
    ) -> bool {
        let length = header.length as usize;
        match cursor.take(length) {
            Ok(value) => {
                dataset.push(DataElement::new(header.tag, header.vr, header.length, value));
                true
            }
            Err(_) => {
                debug!(
                    tag = %header.tag,
                    length = header.length,
                    remaining = cursor.remaining(),
                    "declared value length exceeds buffer"
                );
                false
            }
        }
    }
}

/// Parse a buffer with a default [`Parser`].
pub fn parse(data: Bytes) -> Dataset {
    Parser::new().parse(data)
}

// =============================================================================
// Tests
// =============================================================================
