//! Shared helpers for synthesizing DICOM buffers in tests.

use bytes::Bytes;
use dicom_decoder::format::{Tag, PREAMBLE_SIZE, UNDEFINED_LENGTH};

/// Builds explicit-VR little-endian DICOM buffers byte by byte.
///
/// Every method appends to the buffer and returns `self`, so a whole
/// file reads as one chain. The default constructor writes the 128-byte
/// preamble and the DICM marker; `raw` starts from nothing for
/// malformed-input tests.
pub struct DicomBuilder {
    buf: Vec<u8>,
}

impl DicomBuilder {
    /// Start with a zeroed preamble and the DICM marker.
    pub fn new() -> Self {
        let mut buf = vec![0u8; PREAMBLE_SIZE];
        buf.extend_from_slice(b"DICM");
        Self { buf }
    }

    /// Start with an empty buffer.
    pub fn raw() -> Self {
        Self { buf: Vec::new() }
    }

    /// Append arbitrary bytes.
    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Append a short-form attribute (u16 length).
    pub fn short_element(mut self, tag: Tag, vr: &str, value: &[u8]) -> Self {
        self.push_tag(tag);
        self.buf.extend_from_slice(vr.as_bytes());
        self.buf
            .extend_from_slice(&(value.len() as u16).to_le_bytes());
        self.buf.extend_from_slice(value);
        self
    }

    /// Append a long-form attribute (reserved bytes + u32 length).
    pub fn long_element(mut self, tag: Tag, vr: &str, value: &[u8]) -> Self {
        self.push_tag(tag);
        self.buf.extend_from_slice(vr.as_bytes());
        self.buf.extend_from_slice(&[0, 0]);
        self.buf
            .extend_from_slice(&(value.len() as u32).to_le_bytes());
        self.buf.extend_from_slice(value);
        self
    }

    /// Append a long-form header with the undefined-length sentinel and
    /// no payload; items must follow.
    pub fn delimited_header(mut self, tag: Tag, vr: &str) -> Self {
        self.push_tag(tag);
        self.buf.extend_from_slice(vr.as_bytes());
        self.buf.extend_from_slice(&[0, 0]);
        self.buf.extend_from_slice(&UNDEFINED_LENGTH.to_le_bytes());
        self
    }

    /// Append an `(FFFE,E000)` item with the given payload.
    pub fn item(mut self, payload: &[u8]) -> Self {
        self.buf.extend_from_slice(&0xFFFEu16.to_le_bytes());
        self.buf.extend_from_slice(&0xE000u16.to_le_bytes());
        self.buf
            .extend_from_slice(&(payload.len() as u32).to_le_bytes());
        self.buf.extend_from_slice(payload);
        self
    }

    /// Append an `(FFFE,E000)` header declaring `length` with no payload.
    pub fn item_header(mut self, length: u32) -> Self {
        self.buf.extend_from_slice(&0xFFFEu16.to_le_bytes());
        self.buf.extend_from_slice(&0xE000u16.to_le_bytes());
        self.buf.extend_from_slice(&length.to_le_bytes());
        self
    }

    /// Append the `(FFFE,E0DD)` sequence delimiter.
    pub fn sequence_delimiter(mut self) -> Self {
        self.buf.extend_from_slice(&0xFFFEu16.to_le_bytes());
        self.buf.extend_from_slice(&0xE0DDu16.to_le_bytes());
        self.buf.extend_from_slice(&0u32.to_le_bytes());
        self
    }

    /// Finish and hand the buffer over.
    pub fn build(self) -> Bytes {
        Bytes::from(self.buf)
    }

    fn push_tag(&mut self, tag: Tag) {
        self.buf.extend_from_slice(&tag.group.to_le_bytes());
        self.buf.extend_from_slice(&tag.element.to_le_bytes());
    }
}

/// A minimal JPEG-like payload: optional junk, SOI, body, EOI.
pub fn jpeg_payload(leading_junk: usize) -> Vec<u8> {
    let mut buf = vec![0x00; leading_junk];
    buf.extend_from_slice(&[0xFF, 0xD8]);
    buf.extend_from_slice(&[0x01, 0x02, 0x03, 0x04]);
    buf.extend_from_slice(&[0xFF, 0xD9]);
    buf
}
