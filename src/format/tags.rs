//! Attribute identity and well-known tag constants.
//!
//! A DICOM attribute is identified by a `(group, element)` pair. The
//! parser itself assigns no meaning to any pair beyond the three it
//! special-cases structurally (the 0xFFFE item markers, the pixel-data
//! tag, and VR "SQ"); everything in [`well_known`] exists for consumers
//! that look attributes up by identity after the parse.

use std::fmt;

use serde::Serialize;

// =============================================================================
// Tag
// =============================================================================

/// A `(group, element)` attribute identity pair.
///
/// Tags are not unique within a dataset: repeated tags are preserved in
/// file order, and lookups return the first occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Tag {
    pub group: u16,
    pub element: u16,
}

impl Tag {
    /// Create a tag from its group and element numbers.
    #[inline]
    pub const fn new(group: u16, element: u16) -> Self {
        Self { group, element }
    }

    /// Whether this is the pixel-data tag (7FE0,0010).
    ///
    /// Pixel data takes the long header form regardless of its declared
    /// VR, so the header decoder tests identity as well as VR.
    #[inline]
    pub const fn is_pixel_data(self) -> bool {
        self.group == 0x7FE0 && self.element == 0x0010
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:04X},{:04X})", self.group, self.element)
    }
}

// =============================================================================
// Structural Markers
// =============================================================================

/// Group number shared by all item and delimiter markers.
pub const ITEM_GROUP: u16 = 0xFFFE;

/// Element number of an item marker (FFFE,E000).
pub const ITEM_ELEMENT: u16 = 0xE000;

/// Element number of a sequence delimiter (FFFE,E0DD).
pub const SEQUENCE_DELIMITER_ELEMENT: u16 = 0xE0DD;

/// Length sentinel meaning "undefined, terminated by a delimiter item".
pub const UNDEFINED_LENGTH: u32 = 0xFFFF_FFFF;

// =============================================================================
// Well-Known Tags
// =============================================================================

/// Tags consumers commonly look up by identity after parsing.
///
/// This is a caller-side vocabulary, not a data dictionary: the parser
/// never consults it. Only the handful of tags a viewer needs to size,
/// window, and page through an image are listed.
pub mod well_known {
    use super::Tag;

    /// Transfer Syntax UID (0002,0010).
    pub const TRANSFER_SYNTAX_UID: Tag = Tag::new(0x0002, 0x0010);

    /// Number of Frames (0028,0008).
    pub const NUMBER_OF_FRAMES: Tag = Tag::new(0x0028, 0x0008);

    /// Rows (0028,0010).
    pub const ROWS: Tag = Tag::new(0x0028, 0x0010);

    /// Columns (0028,0011).
    pub const COLUMNS: Tag = Tag::new(0x0028, 0x0011);

    /// Samples per Pixel (0028,0002).
    pub const SAMPLES_PER_PIXEL: Tag = Tag::new(0x0028, 0x0002);

    /// Bits Allocated (0028,0100).
    pub const BITS_ALLOCATED: Tag = Tag::new(0x0028, 0x0100);

    /// Window Center (0028,1050).
    pub const WINDOW_CENTER: Tag = Tag::new(0x0028, 0x1050);

    /// Window Width (0028,1051).
    pub const WINDOW_WIDTH: Tag = Tag::new(0x0028, 0x1051);

    /// Pixel Data (7FE0,0010).
    pub const PIXEL_DATA: Tag = Tag::new(0x7FE0, 0x0010);
}

// =============================================================================
// Tests
// =============================================================================
