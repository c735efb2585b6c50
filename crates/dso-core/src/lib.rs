pub mod cursor;
pub mod format;
pub mod mapper;
pub mod measure;
pub mod settings;
pub mod snapshot;
pub mod view;
pub mod zoom;

pub use cursor::{marker_vertices, CursorShape, ScopeCursor};
pub use mapper::{pixel_to_division, MarkerEvent, PointerTracker};
pub use settings::{Color, ScopeSettings, ViewSettings};
pub use snapshot::{CaptureSnapshot, ChannelTraces};
