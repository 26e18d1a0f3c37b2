//! Roster ranking by role priority
//!
//! People are ordered by the first role keyword (in list order) found in
//! their job title. The head role (index 0, "President" by default) is a
//! special case: it only matches when the title is not the "vice" form of
//! it, so "Vice President" ranks as Vice-President rather than President.
//!
//! Titles and keywords are compared lowercased with hyphens and runs of
//! whitespace folded into single spaces, so "Vice-President",
//! "vice president" and "Vice  President" are the same title. The folding
//! applies to every keyword, not only the head role: "Full-Stack Developer"
//! matches "Full Stack Developer" and "Co-ordinator" matches "Co ordinator",
//! which a plain case-insensitive substring test would not.

use crate::error::RosterError;
use crate::social::SocialLink;
use serde::{Deserialize, Serialize};

/// Priority assigned to titles matching no keyword
pub const UNRANKED: usize = 999;

/// Role keywords in display order
pub const DEFAULT_PRIORITY_ROLES: [&str; 18] = [
    "President",
    "Vice-President",
    "Technical Head",
    "Event Head",
    "Marketing Head",
    "Human Resource",
    "Graphic Designer",
    "Event Finance Manager",
    "PR Manager",
    "Business Planner",
    "Buisness Planner",
    "Full Stack Developer",
    "Content Designer",
    "Content Creator",
    "Content Writer",
    "Coordinator",
    "Co-ordinator",
    "Volunteer",
];

/// Ordered role keyword list; index is priority (0 = highest)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityRoles {
    keywords: Vec<String>,
    /// "vice <head>", which must not count as the head role
    head_exclusion: Option<String>,
}

impl PriorityRoles {
    /// Build from keywords in priority order
    #[must_use]
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = roles.into_iter().map(|r| normalize(r.as_ref())).collect();
        let head_exclusion = keywords
            .first()
            .filter(|head| !head.is_empty())
            .map(|head| format!("vice {head}"));
        Self {
            keywords,
            head_exclusion,
        }
    }

    /// Number of keywords
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Check if there are no keywords
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Index of a keyword in the list
    #[must_use]
    pub fn position(&self, keyword: &str) -> Option<usize> {
        let keyword = normalize(keyword);
        self.keywords.iter().position(|k| *k == keyword)
    }

    /// Priority of a job title
    ///
    /// Returns the index of the first matching keyword, or [`UNRANKED`].
    #[must_use]
    pub fn priority(&self, title: &str) -> usize {
        let title = normalize(title);
        if title.is_empty() {
            return UNRANKED;
        }

        if let (Some(head), Some(exclusion)) = (self.keywords.first(), &self.head_exclusion) {
            if title.contains(head.as_str()) && !title.contains(exclusion.as_str()) {
                return 0;
            }
        }

        self.keywords
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, keyword)| !keyword.is_empty() && title.contains(keyword.as_str()))
            .map_or(UNRANKED, |(index, _)| index)
    }
}

impl Default for PriorityRoles {
    fn default() -> Self {
        Self::new(DEFAULT_PRIORITY_ROLES)
    }
}

/// Lowercase, fold hyphens and whitespace runs into single spaces
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Person displayed on the team page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

impl RosterEntry {
    /// Create entry; name and title must be non-blank
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Result<Self, RosterError> {
        let name = name.into().trim().to_string();
        let title = title.into().trim().to_string();
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }
        if title.is_empty() {
            return Err(RosterError::EmptyTitle(name));
        }
        Ok(Self {
            name,
            title,
            image_url: image_url.into(),
            social_links: Vec::new(),
        })
    }

    /// With social links
    #[inline]
    #[must_use]
    pub fn with_links(mut self, links: Vec<SocialLink>) -> Self {
        self.social_links = links;
        self
    }
}

/// Order a roster by role priority
///
/// Priorities are computed once per entry, then stably sorted, so entries
/// with equal priority (including all unranked ones) keep their input
/// order. The input is not modified.
#[must_use]
pub fn rank_roster(entries: &[RosterEntry], roles: &PriorityRoles) -> Vec<RosterEntry> {
    let mut keyed: Vec<(usize, &RosterEntry)> = entries
        .iter()
        .map(|entry| (roles.priority(&entry.title), entry))
        .collect();
    keyed.sort_by_key(|(priority, _)| *priority);
    keyed.into_iter().map(|(_, entry)| entry.clone()).collect()
}
