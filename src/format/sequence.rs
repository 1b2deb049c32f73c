//! Undefined-length sequence flattening.
//!
//! A sequence attribute (VR "SQ") with the undefined-length sentinel is
//! followed by a stream of items, each an `(FFFE,E000)` marker with its
//! own length, terminated by an `(FFFE,E0DD)` sequence delimiter.
//!
//! This module does not parse items into child datasets. Item payloads
//! are concatenated verbatim into one opaque blob, which becomes the
//! sequence attribute's value. Recursive sub-dataset decoding is a
//! deliberate non-feature; consumers that need nested structure must
//! re-parse the blob themselves.

use bytes::{Bytes, BytesMut};
use tracing::{trace, warn};

use super::cursor::ByteCursor;
use super::tags::{
    ITEM_ELEMENT, ITEM_GROUP, SEQUENCE_DELIMITER_ELEMENT, UNDEFINED_LENGTH,
};

/// Consume an undefined-length sequence's item stream, returning the
/// flattened concatenation of item payloads.
///
/// The cursor must sit just past the sequence header. Termination:
///
/// - an `(FFFE,E0DD)` delimiter ends the sequence normally;
/// - a non-`FFFE` group where an item marker was expected ends it
///   defensively, rewinding the cursor 4 bytes so the outer loop can
///   retry those bytes as an attribute header;
/// - fewer than 8 bytes remaining ends it at the buffer edge.
///
/// Items with the undefined-length sentinel, unknown element numbers, or
/// declared lengths the buffer cannot satisfy contribute nothing and are
/// skipped without any length-based advancement.
pub fn flatten_sequence(cursor: &mut ByteCursor) -> Bytes {
    let mut flattened = BytesMut::new();

    while cursor.remaining() >= 8 {
        // The u16 reads cannot fail with 8 bytes remaining.
        let Ok(item_group) = cursor.read_u16_le() else {
            break;
        };
        let Ok(item_element) = cursor.read_u16_le() else {
            break;
        };

        if item_group != ITEM_GROUP {
            // Not an item marker: back off the 4 bytes just read and let
            // the outer attribute loop resynchronize on them.
            warn!(
                offset = cursor.position() - 4,
                "expected item marker in sequence, found group {item_group:04X}, stopping"
            );
            cursor.rewind(4);
            break;
        }

        let Ok(item_length) = cursor.read_u32_le() else {
            break;
        };

        if item_element == SEQUENCE_DELIMITER_ELEMENT {
            trace!(offset = cursor.position(), "sequence delimiter");
            break;
        }

        if item_element == ITEM_ELEMENT
            && item_length != UNDEFINED_LENGTH
            && cursor.remaining() >= item_length as usize
        {
            let payload = cursor
                .take(item_length as usize)
                .unwrap_or_else(|_| Bytes::new());
            trace!(len = payload.len(), "sequence item flattened");
            flattened.extend_from_slice(&payload);
        }
        // Anything else (nested undefined-length item, unknown element,
        // oversized declared length) is skipped without advancing past a
        // payload; the loop re-reads from the current position.
    }

    flattened.freeze()
}

// =============================================================================
// Tests
// =============================================================================
