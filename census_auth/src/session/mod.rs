mod config;
mod errors;
mod flash;
mod store;

pub use errors::SessionError;
pub use flash::{FlashKind, FlashStore};
pub use store::SessionStore;
