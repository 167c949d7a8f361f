mod errors;
mod registry;
mod types;

pub use errors::OAuth2Error;
pub use registry::{ProviderConfig, ProviderRegistry};
pub use types::{ProfileEmail, ProfileName, ProviderProfile};
