use serde::{Deserialize, Serialize};

/// The identity payload a provider returns after a successful handshake.
///
/// Field names follow the wire format providers use, hence the camelCase
/// serde renames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderProfile {
    /// Provider-assigned subject identifier
    pub id: String,
    #[serde(default)]
    pub emails: Vec<ProfileEmail>,
    #[serde(default)]
    pub name: ProfileName,
    #[serde(rename = "profileUrl", default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileEmail {
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileName {
    #[serde(rename = "givenName", default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(rename = "familyName", default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
}

impl ProviderProfile {
    /// Flatten the email entries into an order-preserving, duplicate-free list
    pub fn normalized_emails(&self) -> Vec<String> {
        let mut emails: Vec<String> = Vec::with_capacity(self.emails.len());
        for entry in &self.emails {
            if !emails.iter().any(|e| e == &entry.value) {
                emails.push(entry.value.clone());
            }
        }
        emails
    }
}
