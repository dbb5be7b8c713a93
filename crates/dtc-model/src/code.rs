//! Trouble Code Parsing and Normalization

use crate::error::CodeError;
use std::fmt;

/// Minimum number of hex digits required after the system prefix
const MIN_HEX_DIGITS: usize = 4;

/// Strip all whitespace from raw input and uppercase the remainder.
///
/// The result is the lookup key used throughout the resolution pipeline,
/// whether or not it passes format validation.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// A validated, normalized OBD-II diagnostic trouble code.
///
/// Constructed via [`DtcCode::parse`], which normalizes the input and
/// enforces the `[PCBU][0-9A-F]{4,}` shape: a powertrain/chassis/body/
/// network prefix followed by at least four hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DtcCode(String);

impl DtcCode {
    /// Parse a raw user-entered code string.
    pub fn parse(raw: &str) -> Result<Self, CodeError> {
        let normalized = normalize(raw);
        let mut chars = normalized.chars();

        let prefix = chars.next().ok_or(CodeError::Empty)?;
        if !matches!(prefix, 'P' | 'C' | 'B' | 'U') {
            return Err(CodeError::InvalidPrefix(prefix));
        }

        // Start-anchored match: at least four hex digits must immediately
        // follow the prefix.
        let hex_run = chars.take_while(char::is_ascii_hexdigit).count();
        if hex_run < MIN_HEX_DIGITS {
            return Err(CodeError::TooFewDigits(hex_run));
        }

        Ok(Self(normalized))
    }

    /// The normalized code string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// System the code belongs to: P, C, B, or U
    pub fn system(&self) -> char {
        // Non-empty by construction
        self.0.chars().next().unwrap_or('P')
    }

    /// Consume the code, yielding the normalized string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DtcCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_canonical_code() {
        let code = DtcCode::parse("P0420").unwrap();
        assert_eq!(code.as_str(), "P0420");
        assert_eq!(code.system(), 'P');
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        let code = DtcCode::parse("  p 0420 ").unwrap();
        assert_eq!(code.as_str(), "P0420");
    }

    #[test]
    fn accepts_longer_hex_runs() {
        assert!(DtcCode::parse("U012345").is_ok());
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(DtcCode::parse("   "), Err(CodeError::Empty));
    }

    #[test]
    fn rejects_unknown_prefix() {
        assert_eq!(DtcCode::parse("X0420"), Err(CodeError::InvalidPrefix('X')));
    }

    #[test]
    fn rejects_short_hex_run() {
        assert_eq!(DtcCode::parse("P042"), Err(CodeError::TooFewDigits(3)));
    }

    #[test]
    fn non_hex_character_cuts_the_run() {
        assert_eq!(DtcCode::parse("P04G2"), Err(CodeError::TooFewDigits(2)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(DtcCode::parse("garbage").is_err());
    }

    proptest! {
        #[test]
        fn parse_never_panics(raw in ".*") {
            let _ = DtcCode::parse(&raw);
        }

        #[test]
        fn generated_codes_always_parse(
            prefix in prop::sample::select(vec!['P', 'C', 'B', 'U']),
            digits in "[0-9A-F]{4,6}",
        ) {
            let raw = format!("{prefix}{digits}");
            let code = DtcCode::parse(&raw).unwrap();
            prop_assert_eq!(code.as_str(), raw.as_str());
        }
    }
}
