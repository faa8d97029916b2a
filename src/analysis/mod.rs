pub mod change_detector;
pub mod trends;
