pub mod models;
pub mod queries;
pub mod watch;

pub use models::{Participant, Segment, Space, SpaceKind, TranscriptionStatus};
pub use queries::{count_spaces_by_status, get_segments, get_space, list_spaces_by_status, space_exists};
pub use watch::watch_space;
