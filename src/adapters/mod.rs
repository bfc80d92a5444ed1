pub mod breezy;
pub mod cache;
