//! Built-in Trouble Code Catalog
//!
//! Seed data for the session cache: the codes drivers look up most often,
//! curated so the common path never needs the external knowledge source.

mod seed;

pub use seed::seed_records;

use dtc_model::DiagnosticRecord;
use std::collections::HashMap;

/// Seed records keyed by their normalized code.
pub fn seed_map() -> HashMap<String, DiagnosticRecord> {
    seed_records()
        .into_iter()
        .map(|record| (record.code.clone(), record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtc_model::{DtcCode, SafetyStatus, Severity};

    #[test]
    fn every_seed_code_is_valid() {
        for record in seed_records() {
            let code = DtcCode::parse(&record.code).unwrap();
            assert_eq!(code.as_str(), record.code, "seed codes must be pre-normalized");
        }
    }

    #[test]
    fn seed_codes_are_unique() {
        let records = seed_records();
        let map = seed_map();
        assert_eq!(map.len(), records.len());
    }

    #[test]
    fn no_seed_record_is_the_fallback_shape() {
        for record in seed_records() {
            assert!(!record.is_unknown(), "{} carries the fallback category", record.code);
        }
    }

    #[test]
    fn catalytic_converter_entry_matches_expected_ratings() {
        let map = seed_map();
        let record = &map["P0420"];
        assert_eq!(record.severity, Severity::Medium);
        assert_eq!(record.safety_status, SafetyStatus::Safe);
    }

    #[test]
    fn all_records_have_display_content() {
        for record in seed_records() {
            assert!(!record.title.is_empty());
            assert!(!record.symptoms.is_empty(), "{} has no symptoms", record.code);
            assert!(!record.causes.is_empty(), "{} has no causes", record.code);
        }
    }
}
