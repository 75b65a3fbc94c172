mod continuous;
mod keys;
mod navigation;
mod section;
mod stepped;

pub use keys::{SectionId, TutorialKey};

pub use continuous::{ContinuousAnimation, ContinuousError, ContinuousFrame, CycleMode, Tick};
pub use navigation::{NavigationError, NavigationState};
pub use section::{SectionList, SectionListError};
pub use stepped::{SteppedAnimation, SteppedError, SteppedFrame};
