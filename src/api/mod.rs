// The request gateway: URL building, cookies, and error normalisation.
pub mod client;
pub mod endpoints;
pub mod error;

pub use client::*;
pub use endpoints::ApiRequest;
pub use error::ApiError;
