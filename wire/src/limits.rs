//! Configurable limits for bounded transport decoding.

/// Transport-level limits for build code decoding.
///
/// These limits are enforced before and during inflation so a hostile code
/// cannot exhaust memory. Payload body limits belong to the codec layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum length of the text code in characters.
    pub max_code_len: usize,

    /// Maximum size of the inflated payload in bytes.
    pub max_payload_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // Browsers cap URLs well below this.
            max_code_len: 8 * 1024,

            // A fully specified v2 build is a few hundred bytes.
            max_payload_bytes: 64 * 1024,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_code_len: 2048,
            max_payload_bytes: 4096,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_code_len: usize::MAX,
            max_payload_bytes: usize::MAX,
        }
    }
}
