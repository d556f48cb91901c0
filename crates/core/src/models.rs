pub mod contact;
pub mod content;
pub mod dashboard;
pub mod slot;
