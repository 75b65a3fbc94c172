use thiserror::Error;

use crate::model::SectionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SectionListError {
    #[error("a tutorial needs at least one section")]
    Empty,

    #[error("duplicate section id: {id}")]
    Duplicate { id: String },
}

/// Ordered list of the sections making up one tutorial.
///
/// The list is fixed when the page is composed and never changes afterwards;
/// every navigation target is validated against it. Order defines what
/// "next" and "previous" mean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionList {
    sections: Vec<SectionId>,
}

impl SectionList {
    /// Builds a section list, rejecting empty and duplicate-bearing input.
    ///
    /// # Errors
    ///
    /// Returns `SectionListError::Empty` for an empty list and
    /// `SectionListError::Duplicate` when the same id appears twice.
    pub fn new(sections: Vec<SectionId>) -> Result<Self, SectionListError> {
        if sections.is_empty() {
            return Err(SectionListError::Empty);
        }
        for (i, id) in sections.iter().enumerate() {
            if sections[..i].contains(id) {
                return Err(SectionListError::Duplicate {
                    id: id.as_str().to_owned(),
                });
            }
        }
        Ok(Self { sections })
    }

    /// Convenience constructor from bare string keys.
    ///
    /// # Errors
    ///
    /// Same as [`SectionList::new`].
    pub fn from_names<I, S>(names: I) -> Result<Self, SectionListError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(|n| SectionId::new(n)).collect())
    }

    /// The first section, where every tutorial starts.
    #[must_use]
    pub fn first(&self) -> &SectionId {
        &self.sections[0]
    }

    /// Looks up a section by its bare key.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SectionId> {
        self.sections.iter().find(|s| s.as_str() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &SectionId) -> bool {
        self.sections.contains(id)
    }

    #[must_use]
    pub fn index_of(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| s == id)
    }

    /// The section following `id` in list order, or `None` at the end.
    #[must_use]
    pub fn after(&self, id: &SectionId) -> Option<&SectionId> {
        let idx = self.index_of(id)?;
        self.sections.get(idx + 1)
    }

    /// The section preceding `id` in list order, or `None` at the start.
    #[must_use]
    pub fn before(&self, id: &SectionId) -> Option<&SectionId> {
        let idx = self.index_of(id)?;
        idx.checked_sub(1).map(|i| &self.sections[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always `false`; kept for API completeness alongside `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionId> {
        self.sections.iter()
    }
}
