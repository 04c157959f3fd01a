//! Unit tests for the status mapping and the report summary calculator

use partstracker::model::Part;
use partstracker::summary::{status_label, summarize, PartStatus};

fn part(status: &str) -> Part {
    Part {
        qty: 1,
        part_number: "P-1".to_string(),
        description: String::new(),
        customer: String::new(),
        invoice_number: String::new(),
        status: status.to_string(),
        notes: String::new(),
    }
}

const RAW_CODES: [&str; 9] = [
    "pending-use",
    "used",
    "used-no-charge",
    "returned",
    "pending-return",
    "lost",
    "never-received",
    "add-to-stock",
    "damaged-warranty-out",
];

#[test]
fn test_status_label_known_codes() {
    assert_eq!(status_label("pending-use"), "Pending Use");
    assert_eq!(status_label("used"), "Used");
    assert_eq!(status_label("used-no-charge"), "Used (No Charge)");
    assert_eq!(status_label("returned"), "Returned");
    assert_eq!(status_label("pending-return"), "Pending Return");
    assert_eq!(status_label("lost"), "Lost");
    assert_eq!(status_label("never-received"), "Never Received");
    assert_eq!(status_label("add-to-stock"), "Add to Stock");
    assert_eq!(status_label("damaged-warranty-out"), "Damaged (Warranty Out)");
}

#[test]
fn test_status_label_unknown_code_passes_through() {
    assert_eq!(status_label("misplaced"), "misplaced");
    assert_eq!(status_label(""), "");
}

#[test]
fn test_every_raw_code_parses() {
    for raw in RAW_CODES {
        assert!(PartStatus::from_raw(raw).is_some(), "unparsed code {raw}");
    }
    assert_eq!(PartStatus::ALL.len(), RAW_CODES.len());
}

#[test]
fn test_summarize_empty_input() {
    let tally = summarize(&[]);

    // All nine labels present, all at zero
    assert_eq!(tally.len(), 9);
    for status in PartStatus::ALL {
        assert_eq!(tally[status.label()], 0);
    }
}

#[test]
fn test_summarize_one_part_per_code() {
    let parts: Vec<Part> = RAW_CODES.iter().map(|raw| part(raw)).collect();
    let tally = summarize(&parts);

    assert_eq!(tally.len(), 9);
    for status in PartStatus::ALL {
        assert_eq!(tally[status.label()], 1, "label {}", status.label());
    }
}

#[test]
fn test_summarize_counts_repeats() {
    let parts = vec![part("used"), part("used"), part("lost"), part("used")];
    let tally = summarize(&parts);

    assert_eq!(tally["Used"], 3);
    assert_eq!(tally["Lost"], 1);
    assert_eq!(tally["Returned"], 0);
    assert_eq!(tally.len(), 9);
}

#[test]
fn test_summarize_drops_unknown_codes() {
    let parts = vec![part("misplaced"), part("used")];
    let tally = summarize(&parts);

    // The unknown code contributes nothing and adds no key
    assert_eq!(tally.len(), 9);
    assert_eq!(tally["Used"], 1);
    assert!(!tally.contains_key("misplaced"));

    let total: u32 = tally.values().sum();
    assert_eq!(total, 1);
}

#[test]
fn test_summarize_counts_label_coincident_codes() {
    // A raw code that textually matches a label falls through the verbatim
    // translation straight onto the existing key
    let tally = summarize(&[part("Used")]);

    assert_eq!(tally["Used"], 1);
    assert_eq!(tally.len(), 9);
}
