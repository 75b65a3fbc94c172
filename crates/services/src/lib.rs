#![forbid(unsafe_code)]

pub mod animation;
pub mod navigation;
pub mod surface;

pub use tutor_core::Clock;

pub use animation::{ContinuousPlayer, ContinuousRender, SteppedPlayer, SteppedRender};
pub use navigation::NavigationController;
pub use surface::{LocationBar, NullLocation, NullView, SectionView};
