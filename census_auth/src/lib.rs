//! census-auth - identity resolution and request-context derivation for a
//! multi-tenant census web application.
//!
//! Two stateless cores run inside the host's per-request pipeline:
//! profile-to-user resolution for OAuth2 logins ([`resolve_profile`]) and
//! per-request template context derivation ([`build_context`]). Everything
//! else here is their supporting cast: the user store, the provider
//! registry, and the session-scoped flash/user stores.

mod config;
mod context;
mod identity;
mod oauth2;
mod session;
mod storage;
mod userdb;

#[cfg(test)]
mod test_utils;

pub use context::{RequestContext, RequestInfo, UrlTemplate, build_context, scoped_path};
pub use identity::{IdentityError, resolve_profile};
pub use oauth2::{
    OAuth2Error, ProfileEmail, ProfileName, ProviderConfig, ProviderProfile, ProviderRegistry,
};
pub use session::{FlashKind, FlashStore, SessionError, SessionStore};
pub use userdb::{User, UserError, UserStore};

/// Initialize the backing stores. Call once at startup, before the first
/// request reaches the pipeline.
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    storage::init().await?;
    userdb::init().await?;
    Ok(())
}
