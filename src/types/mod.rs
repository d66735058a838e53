pub mod config;
pub mod round;
