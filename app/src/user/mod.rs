use std::collections::HashMap;
use std::sync::Arc;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Fields use snake_case so profiles can be seeded from configuration files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub social_profiles: SocialProfiles,
    #[serde(default)]
    pub self_assessment: Option<SelfAssessment>,
    #[serde(default)]
    pub pdfs: Vec<String>,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialProfiles {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub medium: Option<String>,
    pub reddit: Option<String>,
}

impl SocialProfiles {
    pub fn connected_count(&self) -> usize {
        [&self.github, &self.linkedin, &self.twitter, &self.medium, &self.reddit]
            .iter()
            .filter(|p| p.as_deref().is_some_and(|v| !v.trim().is_empty()))
            .count()
    }
}

//forwarded to the model service in camelCase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct SelfAssessment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication_style: Option<String>,
    #[serde(default)]
    pub personality_traits: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writing_sample: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rater: String,
    pub rating: u8,
}

impl UserProfile {
    /// IANA zone of the user, `UTC` if unset or unknown.
    pub fn timezone(&self) -> Tz {
        match self.timezone.as_deref().map(str::trim) {
            None | Some("") => Tz::UTC,
            Some(name) => name.parse::<Tz>().unwrap_or_else(|e| {
                tracing::warn!("Unknown timezone {} of user {}, falling back to UTC: {}", name, self.username, e);
                Tz::UTC
            }),
        }
    }
}

/// Read-only view of the user records, keyed by username.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Arc<HashMap<String, UserProfile>>,
}

impl UserDirectory {
    pub fn new(users: Vec<UserProfile>) -> Self {
        let mut map = HashMap::new();

        for user in users {
            if map.contains_key(&user.username) {
                tracing::warn!("Duplicate user {} in directory, keeping the first entry", user.username);
                continue;
            }
            map.insert(user.username.clone(), user);
        }

        Self { users: Arc::new(map) }
    }

    pub fn find(&self, username: &str) -> Option<&UserProfile> {
        self.users.get(username)
    }

    pub fn all(&self) -> impl Iterator<Item = &UserProfile> {
        self.users.values()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }
}
