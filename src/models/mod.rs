// Wire models shared by the API client and the session store.
pub mod auth;
pub mod benchmark;
pub mod user;

pub use auth::*;
pub use benchmark::*;
pub use user::*;
