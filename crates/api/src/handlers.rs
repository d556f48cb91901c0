pub mod contacts;
pub mod content;
pub mod dashboard;
pub mod schedule;
