use serde::Serialize;

use crate::user::{UserDirectory, UserProfile};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub name: String,
    pub username: String,
    pub average_rating: f64,
    pub rating_count: usize,
    pub data_completeness_score: f64,
    pub credibility_score: f64,
}

impl LeaderboardEntry {
    pub fn for_user(user: &UserProfile) -> Self {
        let rating_count = user.ratings.len();
        let average_rating = average_rating(user);
        let data_completeness_score = data_completeness_score(user);

        Self {
            name: user.name.clone(),
            username: user.username.clone(),
            average_rating,
            rating_count,
            data_completeness_score,
            credibility_score: average_rating * rating_count as f64 + data_completeness_score,
        }
    }
}

pub fn average_rating(user: &UserProfile) -> f64 {
    if user.ratings.is_empty() {
        return 0.0;
    }

    let total: u32 = user.ratings.iter().map(|r| r.rating as u32).sum();
    total as f64 / user.ratings.len() as f64
}

/// Up to 25 points for how much source material a user has provided.
pub fn data_completeness_score(user: &UserProfile) -> f64 {
    let social = 2.0 * user.social_profiles.connected_count() as f64;
    let pdfs = user.pdfs.len().min(5) as f64;
    let images = (user.images.len() as f64 * 0.5).min(5.0);

    let assessment = match &user.self_assessment {
        Some(a) => {
            let mut score = 0.0;
            if a.communication_style.as_deref().is_some_and(|s| !s.is_empty()) {
                score += 1.0;
            }
            if !a.personality_traits.is_empty() {
                score += 1.0;
            }
            if a.writing_sample.as_deref().is_some_and(|s| !s.is_empty()) {
                score += 2.0;
            }
            if !a.interests.is_empty() {
                score += 1.0;
            }
            score
        }
        None => 0.0,
    };

    social + pdfs + images + assessment
}

/// Entries sorted by credibility, highest first.
pub fn rank(directory: &UserDirectory) -> Vec<LeaderboardEntry> {
    let mut users: Vec<&UserProfile> = directory.all().collect();
    //directory iteration order is arbitrary, ties are broken by username
    users.sort_by(|a, b| a.username.cmp(&b.username));

    let mut entries: Vec<LeaderboardEntry> = users.into_iter().map(LeaderboardEntry::for_user).collect();
    entries.sort_by(|a, b| b.credibility_score.total_cmp(&a.credibility_score));

    entries
}
