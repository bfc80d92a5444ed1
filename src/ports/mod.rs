pub mod cache;
pub mod positions_client;
