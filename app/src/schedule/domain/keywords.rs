const SCHEDULING_KEYWORDS: [&str; 16] = [
    "free",
    "available",
    "schedule",
    "meeting",
    "calendar",
    "tomorrow",
    "today",
    "week",
    "month",
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Lowercase words of a free-text query, split on every non-alphanumeric character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTokens {
    words: Vec<String>,
}

impl QueryTokens {
    pub fn parse(query: &str) -> Self {
        let words = query
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_owned)
            .collect();

        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn contains_phrase(&self, phrase: &[&str]) -> bool {
        if phrase.is_empty() || phrase.len() > self.words.len() {
            return false;
        }

        self.words
            .windows(phrase.len())
            .any(|window| window.iter().zip(phrase).all(|(w, p)| w == p))
    }

    pub fn is_scheduling_query(&self) -> bool {
        self.words.iter().any(|w| SCHEDULING_KEYWORDS.contains(&w.as_str()))
    }
}

pub fn is_scheduling_query(query: &str) -> bool {
    QueryTokens::parse(query).is_scheduling_query()
}
