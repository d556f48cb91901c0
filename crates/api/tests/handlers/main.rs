#[path = "../test_utils.rs"]
mod test_utils;

mod contacts_test;
mod content_test;
mod schedule_test;
