use std::sync::LazyLock;

/// How long unread flash messages survive, in seconds.
/// Flash semantics only need them until the next request; the TTL keeps
/// abandoned sessions from leaking entries.
pub(super) static FLASH_TTL: LazyLock<usize> = LazyLock::new(|| {
    std::env::var("SESSION_FLASH_TTL")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(600)
});

/// How long a persisted session user survives, in seconds
pub(super) static SESSION_USER_TTL: LazyLock<usize> = LazyLock::new(|| {
    std::env::var("SESSION_USER_TTL")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(86400)
});
