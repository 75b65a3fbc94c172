use tutor_core::model::SectionId;

/// UI side effects of a navigation transition.
///
/// The embedding page supplies the implementation (toggling section
/// visibility, menu highlighting, the progress bar). Navigation treats every
/// method as fire-and-forget: no return values, no failures.
pub trait SectionView: Send + Sync {
    /// Show the target section's content.
    fn activate(&self, section: &SectionId);

    /// Hide the section being left.
    fn deactivate(&self, section: &SectionId);

    /// Move the active-item indicator in the section menu.
    fn highlight_nav_item(&self, section: &SectionId);

    /// Mark a section's menu entry as visited.
    fn mark_completed(&self, section: &SectionId);

    /// Remove every visited mark (progress reset).
    fn clear_completed(&self);

    /// Republish the visited share, in `[0, 100]`.
    fn set_progress_percent(&self, percent: f64);

    /// Scroll the viewport back to the top of the page.
    fn scroll_to_top(&self);
}

/// The addressable location the active section is mirrored into, enabling
/// deep links to a specific section.
pub trait LocationBar: Send + Sync {
    /// The fragment present at load time, without the leading separator.
    fn fragment(&self) -> Option<String>;

    /// Reflect the active section into the address.
    fn set_fragment(&self, section: &SectionId);
}

/// View that ignores every call, for headless embedding and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl SectionView for NullView {
    fn activate(&self, _section: &SectionId) {}
    fn deactivate(&self, _section: &SectionId) {}
    fn highlight_nav_item(&self, _section: &SectionId) {}
    fn mark_completed(&self, _section: &SectionId) {}
    fn clear_completed(&self) {}
    fn set_progress_percent(&self, _percent: f64) {}
    fn scroll_to_top(&self) {}
}

/// Location with no fragment that swallows updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLocation;

impl LocationBar for NullLocation {
    fn fragment(&self) -> Option<String> {
        None
    }

    fn set_fragment(&self, _section: &SectionId) {}
}
