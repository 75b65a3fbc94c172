use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable key of one navigable tutorial section.
///
/// Section keys are plain strings (`"intro"`, `"attention"`, …) so they can
/// round-trip through the address fragment and persisted progress records
/// without translation.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionId(String);

impl SectionId {
    /// Creates a new `SectionId`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Namespacing key for one tutorial instance (`"transformer"`, `"ssm"`, …).
///
/// Progress is persisted under this key, so two tutorials never clobber each
/// other's saved state.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TutorialKey(String);

impl TutorialKey {
    /// Creates a new `TutorialKey`.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the underlying key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SectionId({})", self.0)
    }
}

impl fmt::Debug for TutorialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TutorialKey({})", self.0)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TutorialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<&str> for TutorialKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_id_display_is_bare_key() {
        let id = SectionId::new("intro");
        assert_eq!(id.to_string(), "intro");
        assert_eq!(format!("{id:?}"), "SectionId(intro)");
    }

    #[test]
    fn tutorial_key_equality() {
        assert_eq!(TutorialKey::new("trm"), TutorialKey::from("trm"));
        assert_ne!(TutorialKey::new("trm"), TutorialKey::new("ssm"));
    }
}
