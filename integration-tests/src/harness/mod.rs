pub mod fixtures;
pub mod tracing;

pub use self::fixtures::{multipart_body, spool_upload, write_config};
pub use self::tracing::{CapturedEvent, capture_events};
