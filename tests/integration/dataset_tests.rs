//! End-to-end dataset decoding tests.

use dicom_decoder::format::{
    parse, tags::well_known, Parser, StopReason, Tag, DATA_START,
};

use super::test_utils::DicomBuilder;

// =============================================================================
// Whole-Buffer Behavior
// =============================================================================

#[test]
fn test_sub_preamble_buffers_yield_empty_datasets() {
    for len in [0usize, 50, 131] {
        let (dataset, stats) =
            Parser::new().parse_with_stats(DicomBuilder::raw().bytes(&vec![1u8; len]).build());
        assert!(dataset.is_empty(), "len {len}");
        assert_eq!(stats.stop, StopReason::BufferTooSmall);
    }
}

#[test]
fn test_bare_prefix_is_empty_dataset() {
    let (dataset, stats) = Parser::new().parse_with_stats(DicomBuilder::new().build());
    assert!(dataset.is_empty());
    assert_eq!(stats.stop, StopReason::EndOfData);
    assert_eq!(stats.stop_offset, DATA_START);
}

#[test]
fn test_arbitrary_junk_never_errors() {
    // Deterministic pseudo-random bytes; parsing must be total.
    let mut junk = Vec::with_capacity(4096);
    let mut state = 0x1234_5678u32;
    for _ in 0..4096 {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        junk.push((state >> 24) as u8);
    }
    let dataset = parse(DicomBuilder::raw().bytes(&junk).build());
    // No assertion on contents: the property is that we got here.
    let _ = dataset.len();
}

// =============================================================================
// Attribute Decoding
// =============================================================================

#[test]
fn test_reference_scenario_rows_256() {
    let data = DicomBuilder::new()
        .short_element(well_known::ROWS, "US", &[0x00, 0x01])
        .build();
    let dataset = parse(data);

    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.int_of(well_known::ROWS), Some(256));
}

#[test]
fn test_mixed_header_forms_in_sequence_order() {
    let data = DicomBuilder::new()
        .short_element(Tag::new(0x0010, 0x0010), "PN", b"DOE^JOHN")
        .long_element(Tag::new(0x0042, 0x0011), "OB", &[0xAB; 40])
        .short_element(well_known::COLUMNS, "US", &[0x40, 0x00])
        .build();
    let dataset = parse(data);

    assert_eq!(dataset.len(), 3);
    let tags: Vec<Tag> = dataset.iter().map(|e| e.tag).collect();
    assert_eq!(
        tags,
        [
            Tag::new(0x0010, 0x0010),
            Tag::new(0x0042, 0x0011),
            well_known::COLUMNS
        ]
    );
    assert_eq!(dataset.int_of(well_known::COLUMNS), Some(64));
}

#[test]
fn test_cursor_advance_equals_header_plus_length() {
    // Two short-form attributes: the second is only reachable if the
    // first advanced exactly 8 + length bytes.
    let value = [0x11u8; 10];
    let data = DicomBuilder::new()
        .short_element(Tag::new(0x0008, 0x0018), "UI", &value)
        .short_element(well_known::ROWS, "US", &[0x00, 0x01])
        .build();
    let (dataset, stats) = Parser::new().parse_with_stats(data);

    assert_eq!(dataset.len(), 2);
    assert_eq!(stats.stop_offset, DATA_START + (8 + 10) + (8 + 2));
}

#[test]
fn test_text_attribute_padding_trimmed() {
    let data = DicomBuilder::new()
        .short_element(well_known::TRANSFER_SYNTAX_UID, "UI", b"1.2.840.10008.1.2.1\0")
        .build();
    let dataset = parse(data);

    let uid = dataset.find(well_known::TRANSFER_SYNTAX_UID).unwrap();
    assert_eq!(uid.as_text().as_deref(), Some("1.2.840.10008.1.2.1"));
    // The raw value keeps its padding byte.
    assert_eq!(uid.length, 20);
}

#[test]
fn test_duplicate_tags_kept_and_find_returns_first() {
    let tag = Tag::new(0x0020, 0x0032);
    let data = DicomBuilder::new()
        .short_element(tag, "DS", b"1.0\\2.0 ")
        .short_element(tag, "DS", b"3.0\\4.0 ")
        .build();
    let dataset = parse(data);

    assert_eq!(dataset.len(), 2);
    assert_eq!(
        dataset.find(tag).unwrap().as_text().as_deref(),
        Some("1.0\\2.0")
    );
}

// =============================================================================
// Sequences
// =============================================================================

#[test]
fn test_sequence_flattening_sums_item_lengths() {
    let seq_tag = Tag::new(0x0008, 0x1140);
    let data = DicomBuilder::new()
        .delimited_header(seq_tag, "SQ")
        .item(&[1; 4])
        .item(&[2; 6])
        .item(&[3; 10])
        .sequence_delimiter()
        .short_element(well_known::ROWS, "US", &[0x00, 0x01])
        .build();
    let (dataset, stats) = Parser::new().parse_with_stats(data);

    let seq = dataset.find(seq_tag).unwrap();
    assert_eq!(seq.length, 20);
    assert_eq!(seq.bytes().len(), 20);
    assert_eq!(stats.sequences, 1);
    assert_eq!(dataset.int_of(well_known::ROWS), Some(256));
}

#[test]
fn test_sequence_with_nested_undefined_item_skips_it() {
    let seq_tag = Tag::new(0x0008, 0x1140);
    let data = DicomBuilder::new()
        .delimited_header(seq_tag, "SQ")
        .item(b"keep")
        .item_header(0xFFFF_FFFF) // nested undefined-length item
        .sequence_delimiter()
        .build();
    let dataset = parse(data);

    assert_eq!(&dataset.find(seq_tag).unwrap().bytes()[..], b"keep");
}

#[test]
fn test_sequence_interrupted_by_attribute_header_resynchronizes() {
    // The sequence stream runs into a plain attribute header; the
    // flattener must rewind 4 bytes so that attribute still decodes.
    let seq_tag = Tag::new(0x0040, 0x0275);
    let data = DicomBuilder::new()
        .delimited_header(seq_tag, "SQ")
        .item(b"ab")
        .short_element(well_known::ROWS, "US", &[0x00, 0x01])
        .build();
    let dataset = parse(data);

    assert_eq!(dataset.len(), 2);
    assert_eq!(&dataset.find(seq_tag).unwrap().bytes()[..], b"ab");
    assert_eq!(dataset.int_of(well_known::ROWS), Some(256));
}

// =============================================================================
// Truncation
// =============================================================================

#[test]
fn test_value_past_buffer_end_is_not_constructed() {
    let mut builder = DicomBuilder::new()
        .short_element(well_known::ROWS, "US", &[0x00, 0x01])
        .short_element(well_known::COLUMNS, "US", &[0x40, 0x00]);
    // Header declaring 500 bytes, followed by 4.
    builder = builder
        .bytes(&0x7FE0u16.to_le_bytes())
        .bytes(&0x0011u16.to_le_bytes())
        .bytes(b"OB")
        .bytes(&[0, 0])
        .bytes(&500u32.to_le_bytes())
        .bytes(&[1, 2, 3, 4]);

    let (dataset, stats) = Parser::new().parse_with_stats(builder.build());
    assert_eq!(dataset.len(), 2);
    assert_eq!(stats.stop, StopReason::TruncatedValue);
}

#[test]
fn test_partial_trailing_header_is_ignored() {
    let data = DicomBuilder::new()
        .short_element(well_known::ROWS, "US", &[0x00, 0x01])
        .bytes(&[0x28, 0x00, 0x11, 0x00, b'U']) // 5 of 8 header bytes
        .build();
    let (dataset, stats) = Parser::new().parse_with_stats(data);

    assert_eq!(dataset.len(), 1);
    assert_eq!(stats.stop, StopReason::EndOfData);
}

// =============================================================================
// Idempotence
// =============================================================================

#[test]
fn test_same_buffer_parses_identically_twice() {
    let data = DicomBuilder::new()
        .short_element(well_known::ROWS, "US", &[0x00, 0x01])
        .delimited_header(Tag::new(0x0008, 0x1140), "SQ")
        .item(&[7; 3])
        .sequence_delimiter()
        .build();

    let first = parse(data.clone());
    let second = parse(data);
    assert_eq!(first, second);
}
