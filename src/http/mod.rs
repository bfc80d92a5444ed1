//! Inbound HTTP surface.
//!
//! ```text
//! any request
//!     → server.rs (axum fallback handler, TraceLayer)
//!     → service::PositionsService (cache lookup / upstream fetch / projection)
//!     → response.rs (JSON body or 500 diagnostic, CORS headers on both)
//! ```

pub mod response;
pub mod server;

pub use server::HttpServer;
