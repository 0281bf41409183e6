pub mod filter;
pub mod game_record;

pub use filter::{FilterCriteria, ValueRange};
pub use game_record::{GameRecord, ResultItem};
