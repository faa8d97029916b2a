pub mod change_event;
pub mod daily_record;
pub mod error;
pub mod location;
pub mod metric;
pub mod sample;
pub mod traits;
pub mod trend;
