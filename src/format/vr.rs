//! Value representation codes and length-encoding classification.
//!
//! In explicit-VR encoding every attribute header carries a two-character
//! ASCII code (the VR) that determines how the length field that follows
//! it is laid out. This module classifies VRs into the three header
//! layouts the wire format uses; it does not validate codes against the
//! standard's dictionary, and an unrecognized code simply falls into the
//! short form.

use std::fmt;

use serde::Serialize;

// =============================================================================
// Vr
// =============================================================================

/// A two-character value representation code, e.g. `US`, `SQ`, `OB`.
///
/// Stored as raw bytes so that a garbage code survives round-tripping
/// into diagnostics unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Vr([u8; 2]);

impl Vr {
    /// Sequence of items.
    pub const SQ: Vr = Vr(*b"SQ");

    /// Create a VR from its two code bytes.
    #[inline]
    pub const fn new(code: [u8; 2]) -> Self {
        Self(code)
    }

    /// Create a VR from a trimmed code string.
    ///
    /// Strings other than exactly two bytes yield a blank VR, which
    /// classifies as short form like any unrecognized code.
    pub fn from_code(code: &str) -> Self {
        let bytes = code.as_bytes();
        if bytes.len() == 2 {
            Self([bytes[0], bytes[1]])
        } else {
            Self([b' ', b' '])
        }
    }

    /// The code as a string slice, best-effort.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("??")
    }

    /// Whether this VR uses the long header form with two reserved bytes
    /// followed by a 32-bit length.
    ///
    /// These are the binary/large-object VRs: OB, OW, UN, UT. `SQ` also
    /// uses the long form but is classified separately because it is the
    /// only form that may carry the undefined-length sentinel.
    #[inline]
    pub fn has_reserved_long_length(&self) -> bool {
        matches!(&self.0, b"OB" | b"OW" | b"UN" | b"UT")
    }
}

impl fmt::Display for Vr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// LengthForm
// =============================================================================

/// The three header layouts an explicit-VR attribute can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthForm {
    /// 2-byte length immediately after the VR, widened to u32.
    Short,

    /// 2 reserved bytes then a 4-byte length (OB, OW, UN, UT).
    LongReserved,

    /// 2 reserved bytes then a 4-byte length that may be the
    /// undefined-length sentinel (VR "SQ", or the pixel-data tag
    /// regardless of VR).
    Delimited,
}

// =============================================================================
// Tests
// =============================================================================
