//! Part status codes and the report summary calculator
//!
//! Clients submit short machine-readable disposition codes for each part
//! (e.g. "pending-use"). This module owns the closed set of known codes,
//! their human-readable labels, and the tally computed for every completed
//! report.

use std::collections::BTreeMap;

use crate::model::Part;

/// The closed set of part dispositions a technician can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartStatus {
    PendingUse,
    Used,
    UsedNoCharge,
    Returned,
    PendingReturn,
    Lost,
    NeverReceived,
    AddToStock,
    DamagedWarrantyOut,
}

impl PartStatus {
    /// Every known disposition, in display order
    pub const ALL: [PartStatus; 9] = [
        PartStatus::PendingUse,
        PartStatus::Used,
        PartStatus::UsedNoCharge,
        PartStatus::Returned,
        PartStatus::PendingReturn,
        PartStatus::Lost,
        PartStatus::NeverReceived,
        PartStatus::AddToStock,
        PartStatus::DamagedWarrantyOut,
    ];

    /// Parses the raw wire code for a disposition
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "pending-use" => Some(PartStatus::PendingUse),
            "used" => Some(PartStatus::Used),
            "used-no-charge" => Some(PartStatus::UsedNoCharge),
            "returned" => Some(PartStatus::Returned),
            "pending-return" => Some(PartStatus::PendingReturn),
            "lost" => Some(PartStatus::Lost),
            "never-received" => Some(PartStatus::NeverReceived),
            "add-to-stock" => Some(PartStatus::AddToStock),
            "damaged-warranty-out" => Some(PartStatus::DamagedWarrantyOut),
            _ => None,
        }
    }

    /// Human-readable label shown to technicians and managers
    pub fn label(self) -> &'static str {
        match self {
            PartStatus::PendingUse => "Pending Use",
            PartStatus::Used => "Used",
            PartStatus::UsedNoCharge => "Used (No Charge)",
            PartStatus::Returned => "Returned",
            PartStatus::PendingReturn => "Pending Return",
            PartStatus::Lost => "Lost",
            PartStatus::NeverReceived => "Never Received",
            PartStatus::AddToStock => "Add to Stock",
            PartStatus::DamagedWarrantyOut => "Damaged (Warranty Out)",
        }
    }
}

/// Translates a raw status code to its label
///
/// Codes outside the known set pass through verbatim so that display paths
/// can still show whatever the client sent.
pub fn status_label(raw: &str) -> String {
    match PartStatus::from_raw(raw) {
        Some(status) => status.label().to_string(),
        None => raw.to_string(),
    }
}

/// Tallies a parts list into a per-label count table
///
/// The result always carries all nine known labels, each starting at zero,
/// regardless of the input. A part whose translated label is not one of the
/// nine keys contributes nothing to the tally; since unknown codes translate
/// to themselves, they are silently dropped unless the code textually matches
/// a label. Key order carries no meaning.
pub fn summarize(parts: &[Part]) -> BTreeMap<String, u32> {
    let mut tally: BTreeMap<String, u32> = PartStatus::ALL
        .iter()
        .map(|status| (status.label().to_string(), 0))
        .collect();

    for part in parts {
        let label = status_label(&part.status);
        if let Some(count) = tally.get_mut(label.as_str()) {
            *count += 1;
        }
    }

    tally
}
