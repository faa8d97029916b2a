pub mod any_date;
pub mod any_instant;
