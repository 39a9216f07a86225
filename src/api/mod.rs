//! API module
//!
//! Contains HTTP request handlers for the listing endpoints

pub mod feed;
pub mod listings;
