mod errors;
mod resolver;

pub use errors::IdentityError;
pub use resolver::resolve_profile;
