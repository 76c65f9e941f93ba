//! Client-side session: who is signed in, kept in sync with the backend.
pub mod base;
pub mod callback;
pub mod state;
pub mod store;

pub use base::{AuthApi, Navigator};
pub use callback::{CallbackParams, CallbackResult};
pub use state::Session;
pub use store::{Action, AuthOutcome, SessionStore};
