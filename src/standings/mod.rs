pub mod types;
pub mod ranking;
pub mod ticker;

pub use types::TeamRecord;
pub use ticker::LiveTicker;
