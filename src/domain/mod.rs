pub mod cached_response;
pub mod listing;
