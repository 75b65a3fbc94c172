use thiserror::Error;

use crate::model::{SectionId, SectionList};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NavigationError {
    #[error("unknown section: {id}")]
    UnknownSection { id: String },
}

/// Where the learner is in a tutorial and which sections they have seen.
///
/// `visited` keeps insertion order and set semantics: a section appears once,
/// in the order it was first entered. The set only grows within a session;
/// the sole shrink path is [`NavigationState::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    current: SectionId,
    visited: Vec<SectionId>,
}

impl NavigationState {
    /// Fresh state for a tutorial: positioned on the first section, which
    /// counts as visited.
    #[must_use]
    pub fn initial(sections: &SectionList) -> Self {
        let first = sections.first().clone();
        Self {
            current: first.clone(),
            visited: vec![first],
        }
    }

    /// Rehydrates state from a persisted record.
    ///
    /// Visited entries that no longer name a known section are dropped
    /// (sections can be renamed between deploys); the initial section is
    /// re-inserted if the stored set lost it. A `current` outside the list
    /// cannot be repaired and is an error the caller handles by falling back
    /// to defaults.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::UnknownSection` if `current` is not in
    /// `sections`.
    pub fn from_persisted(
        sections: &SectionList,
        current: &str,
        visited: &[String],
    ) -> Result<Self, NavigationError> {
        let current = sections
            .get(current)
            .cloned()
            .ok_or_else(|| NavigationError::UnknownSection {
                id: current.to_owned(),
            })?;

        let mut state = Self {
            current,
            visited: Vec::with_capacity(visited.len() + 1),
        };
        state.insert_visited(sections.first().clone());
        for id in visited {
            if let Some(known) = sections.get(id) {
                state.insert_visited(known.clone());
            }
        }
        Ok(state)
    }

    /// Makes `target` the current section and marks it visited.
    ///
    /// Returns `true` when the section had not been visited before. The
    /// caller is responsible for validating `target` against the section
    /// list first.
    pub fn enter(&mut self, target: SectionId) -> bool {
        self.current = target.clone();
        self.insert_visited(target)
    }

    /// Back to the initial section with only it visited.
    pub fn reset(&mut self, sections: &SectionList) {
        let first = sections.first().clone();
        self.current = first.clone();
        self.visited = vec![first];
    }

    #[must_use]
    pub fn current(&self) -> &SectionId {
        &self.current
    }

    #[must_use]
    pub fn visited(&self) -> &[SectionId] {
        &self.visited
    }

    #[must_use]
    pub fn is_visited(&self, id: &SectionId) -> bool {
        self.visited.contains(id)
    }

    /// Share of sections visited, as a percentage in `[0, 100]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent_complete(&self, sections: &SectionList) -> f64 {
        (self.visited.len() as f64 / sections.len() as f64) * 100.0
    }

    fn insert_visited(&mut self, id: SectionId) -> bool {
        if self.visited.contains(&id) {
            return false;
        }
        self.visited.push(id);
        true
    }
}
