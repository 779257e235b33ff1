pub mod groups;
pub mod search;
pub mod sessions;
pub mod words;
