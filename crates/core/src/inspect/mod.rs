//! Inspectors that explain a piece of structured text.

pub mod cron;
pub mod ip;
pub mod user_agent;
