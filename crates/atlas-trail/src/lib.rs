//! Cursor-trail engine: ephemeral fading polylines that follow the pointer
//! across the background of the scene.

pub mod engine;
pub mod surface;

pub use engine::{TrailConfig, TrailEngine};
pub use surface::{DrawSurface, PathId, RecordingSurface, StrokeStyle, path_data};
