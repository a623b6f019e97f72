pub mod common;
pub mod config;
pub mod css;
pub mod day;
pub mod month;
pub mod watch;
