//! Attribute header decoding.
//!
//! Every explicit-VR attribute starts with the same 8-byte prefix:
//!
//! ```text
//! Bytes 0-1: group number (u16 LE)
//! Bytes 2-3: element number (u16 LE)
//! Bytes 4-5: VR code (2 ASCII chars)
//! Bytes 6-7: length (u16 LE), or 2 reserved bytes for the long forms
//! ```
//!
//! The long forms (OB/OW/UN/UT, sequences, and pixel data) follow the
//! reserved bytes with a u32 length, so their headers are 12 bytes total.
//! Only the sequence/pixel-data form may carry the undefined-length
//! sentinel that triggers delimited decoding.
//!
//! This decoder assumes explicit VR little-endian throughout. Implicit-VR
//! datasets have no VR bytes in their headers, so feeding one in here
//! desynchronizes the cursor; that is a documented limitation of the
//! crate, not a recoverable condition.

use crate::error::Truncated;

use super::cursor::ByteCursor;
use super::tags::{Tag, UNDEFINED_LENGTH};
use super::vr::{LengthForm, Vr};

// =============================================================================
// ElementHeader
// =============================================================================

/// Minimum bytes an attribute header occupies.
pub const HEADER_MIN_SIZE: usize = 8;

/// A decoded attribute header: identity, VR, declared length, and the
/// layout class the length was read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementHeader {
    pub tag: Tag,
    pub vr: Vr,
    pub length: u32,
    pub form: LengthForm,
}

impl ElementHeader {
    /// Whether the declared length is the undefined-length sentinel.
    ///
    /// Only headers in the [`LengthForm::Delimited`] class can report
    /// this; the short form cannot encode the sentinel at all.
    #[inline]
    pub fn is_undefined_length(&self) -> bool {
        self.form == LengthForm::Delimited && self.length == UNDEFINED_LENGTH
    }

    /// Whether this header opens an undefined-length sequence.
    #[inline]
    pub fn is_delimited_sequence(&self) -> bool {
        self.vr == Vr::SQ && self.is_undefined_length()
    }

    /// Whether this header opens undefined-length encapsulated pixel data.
    #[inline]
    pub fn is_encapsulated_pixel_data(&self) -> bool {
        self.tag.is_pixel_data() && self.is_undefined_length()
    }
}

/// Decode one attribute header at the cursor.
///
/// Requires at least 8 bytes; when fewer remain, returns [`Truncated`]
/// without moving the cursor. A long-form header truncated after its
/// first 8 bytes also returns [`Truncated`]; the parse loop stops either
/// way, so the cursor position after a failed decode is not relied upon.
pub fn decode_header(cursor: &mut ByteCursor) -> Result<ElementHeader, Truncated> {
    if cursor.remaining() < HEADER_MIN_SIZE {
        return Err(Truncated {
            offset: cursor.position(),
            needed: HEADER_MIN_SIZE,
            remaining: cursor.remaining(),
        });
    }

    let group = cursor.read_u16_le()?;
    let element = cursor.read_u16_le()?;
    let tag = Tag::new(group, element);
    let vr = Vr::from_code(&cursor.read_str(2)?);

    // Pixel data takes the long delimited form regardless of its declared
    // VR; some encoders write it as OB, others as OW.
    let form = if vr == Vr::SQ || tag.is_pixel_data() {
        LengthForm::Delimited
    } else if vr.has_reserved_long_length() {
        LengthForm::LongReserved
    } else {
        LengthForm::Short
    };

    let length = match form {
        LengthForm::Short => u32::from(cursor.read_u16_le()?),
        LengthForm::LongReserved | LengthForm::Delimited => {
            cursor.skip(2)?;
            cursor.read_u32_le()?
        }
    };

    Ok(ElementHeader {
        tag,
        vr,
        length,
        form,
    })
}

// =============================================================================
// Tests
// =============================================================================
