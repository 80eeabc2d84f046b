//! Property-based tests for BED record parsing and formatting

use bed_query::formats::bed::{format_bed, BedParseError, BedRecord, Delimiter};
use proptest::prelude::*;

/// Generate a valid chromosome name
///
/// Only the bare words `track` and `browser` are excluded; names that merely
/// start with them are ordinary contigs.
fn arb_chrom_name() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u8..=22).prop_map(|n| format!("chr{}", n)),
        Just("chrX".to_string()),
        Just("chrY".to_string()),
        Just("track_1".to_string()),
        Just("browserContig".to_string()),
        "(track|browser)[a-zA-Z0-9_.]{1,6}",
        "[a-zA-Z0-9][a-zA-Z0-9_.]{0,11}"
            .prop_filter("bare header keyword", |c| c != "track" && c != "browser"),
    ]
}

/// Generate an extra field: no tabs, newlines or spaces
fn arb_field() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.,+-]{1,16}"
}

/// Generate a valid record
fn arb_record() -> impl Strategy<Value = BedRecord> {
    (
        arb_chrom_name(),
        0u64..1_000_000_000,
        0u64..100_000,
        prop::collection::vec(arb_field(), 0..9),
    )
        .prop_map(|(chrom, start, size, extra)| {
            BedRecord::new(chrom, start, start + size, extra).unwrap()
        })
}

/// Generate a whitespace separator run
fn arb_separator() -> impl Strategy<Value = String> {
    "[ \t]{1,4}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Formatting then parsing gives back the same record
    #[test]
    fn prop_format_parse_roundtrip(record in arb_record()) {
        let line = record.to_line();
        prop_assert!(line.ends_with('\n'));
        prop_assert_eq!(line.matches('\n').count(), 1);

        let parsed = BedRecord::parse(&line, Delimiter::Tab).unwrap();
        prop_assert_eq!(parsed, record);
    }

    /// Canonical output has exactly one tab between consecutive fields
    #[test]
    fn prop_canonical_field_count(record in arb_record()) {
        let line = record.to_line();
        let fields: Vec<&str> = line.trim_end_matches('\n').split('\t').collect();
        prop_assert_eq!(fields.len(), 3 + record.extra_fields().len());
        prop_assert_eq!(fields[0], record.chrom());
        prop_assert_eq!(&fields[3..], record.extra_fields());
    }

    /// Whitespace-mode parsing ignores how fields were separated
    #[test]
    fn prop_whitespace_separators_normalized(
        record in arb_record(),
        seps in prop::collection::vec(arb_separator(), 11),
    ) {
        let mut fields = vec![
            record.chrom().to_string(),
            record.start().to_string(),
            record.end().to_string(),
        ];
        fields.extend(record.extra_fields().iter().cloned());

        let mut messy = String::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                messy.push_str(&seps[i - 1]);
            }
            messy.push_str(field);
        }

        let parsed = BedRecord::parse(&messy, Delimiter::Whitespace).unwrap();
        prop_assert_eq!(parsed.to_line(), record.to_line());
    }

    /// Any end before start is rejected
    #[test]
    fn prop_end_before_start_rejected(
        chrom in arb_chrom_name(),
        end in 0u64..1_000_000,
        gap in 1u64..1000,
    ) {
        let start = end + gap;
        let line = format!("{}\t{}\t{}", chrom, start, end);
        prop_assert_eq!(
            BedRecord::parse(&line, Delimiter::Tab),
            Err(BedParseError::InvalidRange { start, end })
        );
    }

    /// Cleanup emits one canonical line per input record, in order
    #[test]
    fn prop_format_bed_preserves_order(records in prop::collection::vec(arb_record(), 0..30)) {
        let input: String = records
            .iter()
            .map(|r| r.to_line().replace('\t', "  "))
            .collect();
        let expected: String = records.iter().map(|r| r.to_line()).collect();

        let mut output = Vec::new();
        let stats = format_bed(input.as_bytes(), &mut output).unwrap();

        prop_assert_eq!(stats.records, records.len());
        prop_assert_eq!(String::from_utf8(output).unwrap(), expected);
    }
}

/// End-to-end: whitespace-separated input becomes tab-separated output
#[test]
fn test_cleanup_scenario() {
    let mut output = Vec::new();
    format_bed("chr1  100   200   geneA\n".as_bytes(), &mut output).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "chr1\t100\t200\tgeneA\n");
}

/// Contigs named like UCSC header keywords are records, not headers
#[test]
fn test_cleanup_header_like_chroms() {
    let mut output = Vec::new();
    let stats = format_bed(
        "browserContig 1 2 n\ntrack name=x\ntrack_1 10 20\n".as_bytes(),
        &mut output,
    )
    .unwrap();
    assert_eq!(stats.records, 2);
    assert_eq!(stats.skipped, 1);
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "browserContig\t1\t2\tn\ntrack_1\t10\t20\n"
    );
}

/// Too few fields and bad coordinates are reported, not skipped
#[test]
fn test_cleanup_rejects_malformed() {
    for bad in ["chr1 100", "chr1 abc 200", "chr1 100 -5", "chr1 300 200"] {
        let mut output = Vec::new();
        let result = format_bed(bad.as_bytes(), &mut output);
        assert!(result.is_err(), "'{}' should be rejected", bad);
    }
}
