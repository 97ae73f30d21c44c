#![forbid(unsafe_code)]

pub mod bank;
pub mod model;
pub mod time;
pub mod timer;

pub use bank::QuestionBank;
pub use time::Clock;
