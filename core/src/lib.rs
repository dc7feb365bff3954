pub mod carousel;
pub mod config;
pub mod input;
pub mod reveal;
pub mod rotation;
pub mod visibility;

pub use carousel::{
    CarouselController, CarouselError, CarouselState, NavigationIntent, SubmitOutcome, Submission,
    DEFAULT_COOLDOWN_MS,
};
pub use config::{CarouselSettings, ConfigError, PageConfig, BUNDLED_PAGE_TOML};
pub use input::{intent_from_dot, intent_from_swipe, intent_from_wheel, SwipeTracker, SWIPE_THRESHOLD_PX};
pub use reveal::{
    RevealConfig, RevealOnVisible, RevealState, RevealSurface, RevealTarget, VisibilityEntry,
    VisibilityObserver, DEFAULT_EDGE_MARGIN, DEFAULT_REVEAL_THRESHOLD,
};
pub use rotation::{BackgroundRotation, DEFAULT_BACKGROUND_INTERVAL_MS};
pub use visibility::{intersect, visible_fraction, EdgeMargin, Intersection, Rect};
