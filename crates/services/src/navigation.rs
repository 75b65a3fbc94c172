use std::sync::Arc;

use tracing::warn;

use storage::repository::{ProgressRecord, ProgressStore};
use tutor_core::Clock;
use tutor_core::model::{NavigationState, SectionId, SectionList, TutorialKey};

use crate::surface::{LocationBar, SectionView};

/// Section navigation for one tutorial page.
///
/// Owns the navigation state machine, mediates every transition's UI side
/// effects through [`SectionView`]/[`LocationBar`], and persists progress
/// after each successful navigation. Persistence is best-effort: a failing
/// store degrades to in-memory navigation with a logged warning, never to a
/// broken page.
pub struct NavigationController {
    tutorial: TutorialKey,
    sections: SectionList,
    state: NavigationState,
    clock: Clock,
    store: Arc<dyn ProgressStore>,
    view: Arc<dyn SectionView>,
    location: Arc<dyn LocationBar>,
}

impl NavigationController {
    /// Builds the controller and restores progress.
    ///
    /// Restore precedence, applied once here: a valid address fragment wins
    /// over everything; otherwise a persisted current section differing from
    /// the initial one is reopened; otherwise the tutorial stays on its
    /// initial section. A persisted current section *equal* to the initial
    /// one is indistinguishable from "no saved progress" and intentionally
    /// treated as such. Whichever branch wins, previously visited sections
    /// are re-marked in the view.
    pub async fn start(
        tutorial: TutorialKey,
        sections: SectionList,
        clock: Clock,
        store: Arc<dyn ProgressStore>,
        view: Arc<dyn SectionView>,
        location: Arc<dyn LocationBar>,
    ) -> Self {
        let persisted = match store.load(&tutorial).await {
            Ok(record) => record,
            Err(err) => {
                warn!(tutorial = %tutorial, error = %err, "failed to load saved progress");
                None
            }
        };

        let mut controller = Self {
            state: NavigationState::initial(&sections),
            tutorial,
            sections,
            clock,
            store,
            view,
            location,
        };
        controller.restore(persisted).await;
        controller
    }

    async fn restore(&mut self, persisted: Option<ProgressRecord>) {
        if let Some(record) = persisted {
            match NavigationState::from_persisted(
                &self.sections,
                &record.current_section,
                &record.visited,
            ) {
                Ok(state) => self.state = state,
                Err(err) => {
                    warn!(tutorial = %self.tutorial, error = %err, "ignoring saved progress");
                }
            }
        }
        self.view
            .set_progress_percent(self.state.percent_complete(&self.sections));

        let fragment = self.location.fragment();
        match fragment {
            Some(f) if self.sections.get(&f).is_some() => {
                self.navigate_to(&f).await;
            }
            _ => {
                let current = self.state.current().clone();
                if &current != self.sections.first() {
                    self.navigate_to(current.as_str()).await;
                }
            }
        }

        for id in self.state.visited().to_vec() {
            self.view.mark_completed(&id);
        }
    }

    /// Navigates to `section`, returning whether a transition happened.
    ///
    /// An unknown identifier is a logged no-op: the state machine, the view,
    /// and the persisted record all stay untouched.
    pub async fn navigate_to(&mut self, section: &str) -> bool {
        let Some(target) = self.sections.get(section).cloned() else {
            warn!(tutorial = %self.tutorial, section, "ignoring navigation to unknown section");
            return false;
        };

        let previous = self.state.current().clone();
        self.view.deactivate(&previous);
        self.view.activate(&target);
        self.view.highlight_nav_item(&target);

        self.state.enter(target.clone());
        self.view.mark_completed(&target);
        self.view
            .set_progress_percent(self.state.percent_complete(&self.sections));
        self.view.scroll_to_top();
        self.location.set_fragment(&target);

        self.persist().await;
        true
    }

    /// Moves to the following section; a no-op on the last one.
    pub async fn next(&mut self) -> bool {
        match self.sections.after(self.state.current()).cloned() {
            Some(target) => self.navigate_to(target.as_str()).await,
            None => false,
        }
    }

    /// Moves to the preceding section; a no-op on the first one.
    pub async fn previous(&mut self) -> bool {
        match self.sections.before(self.state.current()).cloned() {
            Some(target) => self.navigate_to(target.as_str()).await,
            None => false,
        }
    }

    /// Forgets all progress: visited collapses to the initial section, every
    /// completed indicator is cleared, and the tutorial reopens at the start.
    pub async fn reset_progress(&mut self) {
        self.state.reset(&self.sections);
        self.view.clear_completed();
        self.persist().await;

        let initial = self.sections.first().as_str().to_owned();
        self.navigate_to(&initial).await;
    }

    async fn persist(&self) {
        let record =
            ProgressRecord::from_state(self.tutorial.clone(), &self.state, self.clock.now());
        if let Err(err) = self.store.save(&record).await {
            warn!(tutorial = %self.tutorial, error = %err, "failed to save progress");
        }
    }

    #[must_use]
    pub fn current_section(&self) -> &SectionId {
        self.state.current()
    }

    #[must_use]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    #[must_use]
    pub fn sections(&self) -> &SectionList {
        &self.sections
    }

    #[must_use]
    pub fn percent_complete(&self) -> f64 {
        self.state.percent_complete(&self.sections)
    }
}
