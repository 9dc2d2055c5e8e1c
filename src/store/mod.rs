//! Persistence layer for site content.

pub mod content;

pub use content::ContentStore;
