//! Host surface - the pieces a rendering platform would normally provide
//!
//! - `visibility`: region visibility observer capability
//! - `viewport`: snapping scroll container implementing that capability
//! - `media`: direct video element and embedded player locator

mod media;
mod viewport;
mod visibility;

pub use media::{embed_url, SimulatedVideo, VideoElement};
pub use viewport::SnapViewport;
pub use visibility::{
    visibility_channel, RegionId, VisibilityEvent, VisibilityObserver, VisibilitySink,
    VisibilityStream,
};
