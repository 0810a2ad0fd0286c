pub mod console;
pub mod describe;
pub mod id;
pub mod input;
pub mod layout;
pub mod model;
pub mod scene;
pub mod selector;
pub mod time;

pub use console::{EventLog, FragmentTicker, LogEntry, MessageId, MessageKind};
pub use describe::{InteractionDetails, describe, element_info, synthesize_selector};
pub use id::Atom;
pub use input::{InputEvent, Modifiers};
pub use layout::{Viewport, connection_endpoints, resolve_layout};
pub use model::{
    Connection, ConnectionId, ConnectionSet, PercentPos, Project, ProjectId, ProjectImage,
    ProjectLink,
};
pub use scene::{SceneDom, SceneElement, SceneQuery, SceneRef};
pub use selector::Selector;
pub use time::{BackgroundCycle, Clock, ManualClock, SystemClock, TimeOfDay};

// Re-export the geometry types that appear in this crate's public API.
pub use kurbo::{Point, Rect};
