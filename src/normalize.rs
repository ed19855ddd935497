//! Call contracts for the external normalization and case-folding
//! collaborator.
//!
//! The codec core does not implement normalization. With the `normalization`
//! feature enabled these functions delegate to the `unicode-normalization`
//! crate; without it every call on a non-empty input returns the empty
//! string, the collaborator's own failure convention. Callers therefore
//! cannot distinguish "collaborator unavailable" from "input rejected" —
//! an accepted ambiguity of the contract.

#[cfg(feature = "normalization")]
use unicode_normalization::UnicodeNormalization;

/// Normalize a string to canonical composed form (NFC).
///
/// Failure is indicated by an empty result for a non-empty input.
#[must_use]
pub fn to_normal_nfc_form(value: &str) -> String {
    #[cfg(feature = "normalization")]
    {
        value.nfc().collect()
    }
    #[cfg(not(feature = "normalization"))]
    {
        let _ = value;
        String::new()
    }
}

/// Normalize a string to compatibility decomposed form (NFKD).
///
/// Failure is indicated by an empty result for a non-empty input.
#[must_use]
pub fn to_normal_nfkd_form(value: &str) -> String {
    #[cfg(feature = "normalization")]
    {
        value.nfkd().collect()
    }
    #[cfg(not(feature = "normalization"))]
    {
        let _ = value;
        String::new()
    }
}

/// Lowercase a string with full Unicode mappings. The mapping is not
/// locale-tailored.
///
/// Failure is indicated by an empty result for a non-empty input.
#[must_use]
pub fn to_lower(value: &str) -> String {
    #[cfg(feature = "normalization")]
    {
        value.to_lowercase()
    }
    #[cfg(not(feature = "normalization"))]
    {
        let _ = value;
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "normalization"))]
    #[test]
    fn unavailable_collaborator_signals_empty_failure() {
        assert_eq!(to_normal_nfc_form("caf\u{00E9}"), "");
        assert_eq!(to_normal_nfkd_form("caf\u{00E9}"), "");
        assert_eq!(to_lower("CAF\u{00C9}"), "");
        // An empty input has an empty normalization either way.
        assert_eq!(to_normal_nfc_form(""), "");
    }

    #[cfg(feature = "normalization")]
    #[test]
    fn nfc_composes_combining_marks() {
        // e + combining acute composes to the precomposed form.
        assert_eq!(to_normal_nfc_form("e\u{0301}"), "\u{00E9}");
        assert_eq!(to_normal_nfc_form("\u{00E9}"), "\u{00E9}");
    }

    #[cfg(feature = "normalization")]
    #[test]
    fn nfkd_decomposes_compatibility_forms() {
        // The ligature fi decomposes to its compatibility parts.
        assert_eq!(to_normal_nfkd_form("\u{FB01}"), "fi");
        assert_eq!(to_normal_nfkd_form("\u{00E9}"), "e\u{0301}");
    }

    #[cfg(feature = "normalization")]
    #[test]
    fn lowercasing_uses_full_mappings() {
        assert_eq!(to_lower("CAF\u{00C9}"), "caf\u{00E9}");
        assert_eq!(to_lower("\u{0130}"), "i\u{0307}");
    }
}
