//! Profile-to-user resolution.
//!
//! Identities merge on email-set overlap: one shared address is enough to
//! treat a provider profile as an existing local user.

use uuid::Uuid;

use crate::oauth2::ProviderProfile;
use crate::userdb::{User, UserStore};

use super::errors::IdentityError;

/// Find or create the local user for a provider profile.
///
/// An existing user whose email set intersects the profile's gets the
/// provider link merged in (other providers preserved, a same-provider link
/// overwritten) and is returned. Otherwise a new user is created. A profile
/// without emails never matches anything, so it always creates a new user.
///
/// Store failures propagate to the caller; there is no retry.
pub async fn resolve_profile(
    profile: &ProviderProfile,
    provider: &str,
) -> Result<User, IdentityError> {
    let emails = profile.normalized_emails();

    match UserStore::find_user_by_any_email(&emails).await? {
        Some(mut user) => {
            user.link_provider(provider, &profile.id);
            let user = UserStore::upsert_user(user).await?;
            tracing::debug!("Linked {} identity to existing user {}", provider, user.id);
            Ok(user)
        }
        None => {
            let mut user = User::new(Uuid::new_v4().to_string(), emails);
            user.first_name = profile.name.given_name.clone();
            user.last_name = profile.name.family_name.clone();
            user.home_page = profile.profile_url.clone();
            user.link_provider(provider, &profile.id);

            let user = UserStore::upsert_user(user).await?;
            tracing::debug!("Created user {} for {} identity", user.id, provider);
            Ok(user)
        }
    }
}
