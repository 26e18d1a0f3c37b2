//! Social profile links and display handles
//!
//! Raw profile URLs become short `@username` handles for the card grid, and
//! one link per person is picked as the card's click-through target.
//! Parsing never fails loudly: anything unusable degrades to an empty handle.

use crate::record::MemberSocialLink;
use serde::{Deserialize, Serialize};
use url::Url;

/// Social network a link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    LinkedIn,
    Instagram,
    /// Twitter / X
    Twitter,
    Facebook,
    GitHub,
    Other,
}

impl Platform {
    /// Route a link to a platform from its icon tag and URL
    ///
    /// Substring match on the lowercased URL or icon, checked in the order
    /// linkedin, instagram, twitter/x, facebook, github.
    #[must_use]
    pub fn detect(icon: &str, url: &str) -> Self {
        let url = url.to_lowercase();
        let icon = icon.to_lowercase();

        if url.contains("linkedin.com") || icon.contains("linkedin") {
            Self::LinkedIn
        } else if url.contains("instagram.com") || icon.contains("instagram") {
            Self::Instagram
        } else if url.contains("twitter.com") || url.contains("x.com") || icon.contains("twitter") {
            Self::Twitter
        } else if url.contains("facebook.com") || icon.contains("facebook") {
            Self::Facebook
        } else if url.contains("github.com") || icon.contains("github") {
            Self::GitHub
        } else {
            Self::Other
        }
    }

    /// Lowercase tag
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LinkedIn => "linkedin",
            Self::Instagram => "instagram",
            Self::Twitter => "twitter",
            Self::Facebook => "facebook",
            Self::GitHub => "github",
            Self::Other => "other",
        }
    }
}

/// Profile link with its resolved platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: Platform,
    pub url: String,
}

impl SocialLink {
    /// Create link
    #[inline]
    #[must_use]
    pub fn new(platform: Platform, url: impl Into<String>) -> Self {
        Self {
            platform,
            url: url.into(),
        }
    }
}

impl From<&MemberSocialLink> for SocialLink {
    fn from(row: &MemberSocialLink) -> Self {
        Self {
            platform: Platform::detect(&row.icon, &row.url),
            url: row.url.clone(),
        }
    }
}

/// Extract `@username` from a profile URL
///
/// - LinkedIn: the segment after `/in/`
/// - Instagram, Twitter/X: the first non-empty path segment
/// - anything else, unparseable input or `data:` URIs: empty string
///
/// Hostname routing is the caller's job (see [`Platform::detect`]).
#[must_use]
pub fn extract_handle(url: &str, platform: Platform) -> String {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return String::new();
    };
    if parsed.scheme() == "data" || parsed.cannot_be_a_base() {
        return String::new();
    }

    let username = match platform {
        Platform::LinkedIn => parsed.path_segments().and_then(|segments| {
            let segments: Vec<&str> = segments.collect();
            segments
                .windows(2)
                .find(|w| w[0] == "in" && !w[1].is_empty())
                .map(|w| w[1].to_string())
        }),
        Platform::Instagram | Platform::Twitter => parsed
            .path_segments()
            .and_then(|mut segments| segments.find(|s| !s.is_empty()))
            .map(str::to_string),
        Platform::Facebook | Platform::GitHub | Platform::Other => None,
    };

    username.map(|u| format!("@{u}")).unwrap_or_default()
}

/// Pick the card's click-through link
///
/// First LinkedIn link, else first Instagram link, else first Twitter/X
/// link, regardless of position in the list.
#[must_use]
pub fn select_primary_link(links: &[SocialLink]) -> Option<&SocialLink> {
    let find = |needles: &[&str]| {
        links.iter().find(|link| {
            let url = link.url.to_lowercase();
            needles.iter().any(|n| url.contains(n))
        })
    };

    find(&["linkedin.com"])
        .or_else(|| find(&["instagram.com"]))
        .or_else(|| find(&["twitter.com", "x.com"]))
}

/// Display handles for a card, at most one per platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialHandles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

impl SocialHandles {
    /// Resolve handles for a set of links
    ///
    /// Later links for the same platform overwrite earlier ones; empty
    /// extractions are skipped.
    #[must_use]
    pub fn resolve(links: &[SocialLink]) -> Self {
        let mut handles = Self::default();
        for link in links {
            let slot = match link.platform {
                Platform::LinkedIn => &mut handles.linkedin,
                Platform::Instagram => &mut handles.instagram,
                Platform::Twitter => &mut handles.twitter,
                _ => continue,
            };
            let handle = extract_handle(&link.url, link.platform);
            if !handle.is_empty() {
                *slot = Some(handle);
            }
        }
        handles
    }

    /// Check if no handle was resolved
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.linkedin.is_none() && self.instagram.is_none() && self.twitter.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn linkedin_profile_handle() {
        assert_eq!(
            extract_handle("https://linkedin.com/in/jane-doe", Platform::LinkedIn),
            "@jane-doe"
        );
        assert_eq!(
            extract_handle("https://www.linkedin.com/in/jane-doe/", Platform::LinkedIn),
            "@jane-doe"
        );
    }

    #[test]
    fn linkedin_without_in_segment_is_empty() {
        assert_eq!(
            extract_handle("https://linkedin.com/company/ecell", Platform::LinkedIn),
            ""
        );
    }

    #[test]
    fn instagram_and_twitter_take_first_segment() {
        assert_eq!(
            extract_handle("https://instagram.com/ecell.davv/", Platform::Instagram),
            "@ecell.davv"
        );
        assert_eq!(
            extract_handle("https://x.com/founder/status/1", Platform::Twitter),
            "@founder"
        );
        assert_eq!(
            extract_handle("https://twitter.com//late", Platform::Twitter),
            "@late"
        );
    }

    #[test]
    fn bare_host_has_no_handle() {
        assert_eq!(extract_handle("https://instagram.com/", Platform::Instagram), "");
        assert_eq!(extract_handle("https://instagram.com", Platform::Instagram), "");
    }

    #[test]
    fn malformed_input_is_empty() {
        assert_eq!(extract_handle("not a url", Platform::LinkedIn), "");
        assert_eq!(extract_handle("", Platform::Twitter), "");
        assert_eq!(
            extract_handle("data:image/png;base64,AAA", Platform::Instagram),
            ""
        );
        assert_eq!(extract_handle("mailto:someone@example.com", Platform::Instagram), "");
    }

    #[test]
    fn unsupported_platforms_are_empty() {
        assert_eq!(extract_handle("https://github.com/octocat", Platform::GitHub), "");
        assert_eq!(extract_handle("https://facebook.com/ecell", Platform::Facebook), "");
    }

    #[test]
    fn detect_by_url_or_icon() {
        assert_eq!(Platform::detect("", "https://LinkedIn.com/in/a"), Platform::LinkedIn);
        assert_eq!(Platform::detect("Instagram", "https://short.link/a"), Platform::Instagram);
        assert_eq!(Platform::detect("", "https://x.com/a"), Platform::Twitter);
        assert_eq!(Platform::detect("twitter", ""), Platform::Twitter);
        assert_eq!(Platform::detect("github", "https://github.com/a"), Platform::GitHub);
        assert_eq!(Platform::detect("globe", "https://example.org"), Platform::Other);
    }

    #[test]
    fn primary_link_prefers_linkedin_regardless_of_order() {
        let links = vec![
            SocialLink::new(Platform::Instagram, "https://instagram.com/x"),
            SocialLink::new(Platform::LinkedIn, "https://linkedin.com/in/y"),
        ];
        assert_eq!(
            select_primary_link(&links).map(|l| l.url.as_str()),
            Some("https://linkedin.com/in/y")
        );
    }

    #[test]
    fn primary_link_falls_through_tiers() {
        let links = vec![
            SocialLink::new(Platform::GitHub, "https://github.com/a"),
            SocialLink::new(Platform::Twitter, "https://x.com/b"),
        ];
        assert_eq!(
            select_primary_link(&links).map(|l| l.url.as_str()),
            Some("https://x.com/b")
        );

        let none = vec![SocialLink::new(Platform::GitHub, "https://github.com/a")];
        assert!(select_primary_link(&none).is_none());
        assert!(select_primary_link(&[]).is_none());
    }

    #[test]
    fn resolve_keeps_last_handle_per_platform() {
        let links = vec![
            SocialLink::new(Platform::Instagram, "https://instagram.com/first"),
            SocialLink::new(Platform::Instagram, "https://instagram.com/second"),
            SocialLink::new(Platform::LinkedIn, "https://linkedin.com/in/asha"),
            SocialLink::new(Platform::Twitter, "not a url"),
        ];

        let handles = SocialHandles::resolve(&links);
        assert_eq!(
            handles,
            SocialHandles {
                linkedin: Some("@asha".to_string()),
                instagram: Some("@second".to_string()),
                twitter: None,
            }
        );
        assert!(SocialHandles::resolve(&[]).is_empty());
    }

    #[test]
    fn from_member_row_detects_platform() {
        let row = MemberSocialLink {
            id: "1".to_string(),
            member_id: "m".to_string(),
            icon: "linkedin".to_string(),
            url: "https://lnkd.in/abc".to_string(),
        };
        assert_eq!(SocialLink::from(&row).platform, Platform::LinkedIn);
    }
}
