//! Resolution record produced once per input name

/// Outcome of resolving one name
///
/// `found` is true iff a selected handle met the minimum-follower threshold.
/// When `found` is false every optional field is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRecord {
    /// The display name as read from the input
    pub name: String,

    /// Selected handle, prefixed with `@`
    pub handle: Option<String>,

    /// Follower count of the selected handle
    pub follower_count: Option<u64>,

    /// Verification flag of the selected handle (`None` if the provider did not say)
    pub verified: Option<bool>,

    /// Whether a qualifying account was found
    pub found: bool,
}

impl ResolutionRecord {
    /// Create a record for a name whose selected handle qualified
    pub fn found(name: &str, handle: &str, follower_count: u64, verified: Option<bool>) -> Self {
        ResolutionRecord {
            name: name.to_string(),
            handle: Some(format!("@{}", handle)),
            follower_count: Some(follower_count),
            verified,
            found: true,
        }
    }

    /// Create a record for a name with no qualifying handle
    pub fn not_found(name: &str) -> Self {
        ResolutionRecord {
            name: name.to_string(),
            handle: None,
            follower_count: None,
            verified: None,
            found: false,
        }
    }

    /// True when the record holds a positively verified account
    pub fn is_verified(&self) -> bool {
        self.found && self.verified == Some(true)
    }
}
