use std::collections::HashMap;

use crate::config::{
    AUTH_SUBDOMAIN, BASE_DOMAIN, DISCUSSION_FORUM, LOCALES, SURVEY_YEAR, SYS_ADMIN,
    SYSTEM_SUBDOMAIN, TEST_USER, TESTING, URL_TEMPLATE,
};
use crate::session::{FlashKind, FlashStore, SessionError};
use crate::userdb::User;

use super::urls::UrlTemplate;

/// Per-request state supplied by the hosting framework
#[derive(Debug, Clone, Default)]
pub struct RequestInfo {
    pub protocol: String,
    pub host: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub session_id: Option<String>,
    pub session_lang: Option<String>,
    pub user: Option<User>,
}

/// Values derived once per request for the rendering layer.
///
/// Created at the start of request handling and discarded after the
/// response is sent; never persisted or shared across requests.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub current_user: Option<User>,
    pub base_domain: String,
    pub auth_domain: String,
    pub system_domain: String,
    pub login_url: String,
    pub logout_url: String,
    pub profile_url: String,
    pub system_url: String,
    pub current_url: String,
    pub current_domain: String,
    pub url_query: HashMap<String, String>,
    pub locales: Vec<String>,
    pub current_locale: String,
    pub sys_admin: Option<String>,
    /// May be overwritten by later pipeline stages
    pub survey_year: i32,
    pub discussion_forum: Option<String>,
    pub error_messages: Vec<String>,
    pub info_messages: Vec<String>,
}

impl RequestContext {
    /// Resolve a symbolic route name to a concrete path.
    /// Unknown names resolve to None rather than an error.
    pub fn url_for(name: &str) -> Option<&'static str> {
        match name {
            "overview" => Some("/"),
            _ => None,
        }
    }
}

/// Derive the per-request context. Pipeline stage semantics: no terminal
/// handling happens here, downstream handlers consume the result.
pub async fn build_context(req: &RequestInfo) -> Result<RequestContext, SessionError> {
    let current_user = effective_user(req.user.clone(), *TESTING, TEST_USER.as_deref());

    let locales = LOCALES.clone();
    let current_locale = resolve_locale(req.session_lang.as_deref(), &locales);

    let template = UrlTemplate::new(&URL_TEMPLATE);
    let login_url = template.render(&req.protocol, &AUTH_SUBDOMAIN, &BASE_DOMAIN, "login");
    let logout_url = template.render(&req.protocol, &AUTH_SUBDOMAIN, &BASE_DOMAIN, "logout");
    let profile_url = template.render(&req.protocol, &AUTH_SUBDOMAIN, &BASE_DOMAIN, "profile");
    let system_url = template.render(&req.protocol, &SYSTEM_SUBDOMAIN, &BASE_DOMAIN, "");

    let current_domain = format!("{}://{}", req.protocol, req.host);
    let current_url = format!("{}{}", current_domain, req.path);

    let (error_messages, info_messages) = match req.session_id.as_deref() {
        Some(session_id) => (
            FlashStore::take(session_id, FlashKind::Error).await?,
            FlashStore::take(session_id, FlashKind::Info).await?,
        ),
        None => (Vec::new(), Vec::new()),
    };

    Ok(RequestContext {
        current_user,
        base_domain: BASE_DOMAIN.clone(),
        auth_domain: AUTH_SUBDOMAIN.clone(),
        system_domain: SYSTEM_SUBDOMAIN.clone(),
        login_url,
        logout_url,
        profile_url,
        system_url,
        current_url,
        current_domain,
        url_query: req.query.clone(),
        locales,
        current_locale,
        sys_admin: SYS_ADMIN.clone(),
        survey_year: *SURVEY_YEAR,
        discussion_forum: DISCUSSION_FORUM.clone(),
        error_messages,
        info_messages,
    })
}

/// Session language wins when it is a supported locale,
/// otherwise the first configured locale is the default.
fn resolve_locale(session_lang: Option<&str>, locales: &[String]) -> String {
    if let Some(lang) = session_lang {
        if locales.iter().any(|l| l == lang) {
            return lang.to_string();
        }
    }
    locales
        .first()
        .cloned()
        .unwrap_or_else(|| "en".to_string())
}

/// Test-harness escape hatch: with testing enabled and no authenticated
/// user, the configured test user becomes the effective identity.
fn effective_user(user: Option<User>, testing: bool, test_user_json: Option<&str>) -> Option<User> {
    if user.is_some() || !testing {
        return user;
    }
    match test_user_json {
        Some(raw) => match serde_json::from_str::<User>(raw) {
            Ok(test_user) => Some(test_user),
            Err(e) => {
                tracing::warn!("Ignoring unparseable test user: {}", e);
                None
            }
        },
        None => None,
    }
}
