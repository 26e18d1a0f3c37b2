//! Typed records for each remote collection
//!
//! Rows arrive from the remote store as flat JSON objects. Each collection
//! has one struct here; decoding into it is the schema check the loader
//! performs at its boundary.

use crate::store::OrderBy;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named collections in the remote store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// People on the roster
    TeamMembers,
    /// Social profile links, keyed by `member_id`
    MemberSocialLinks,
    /// Event photos
    GalleryItems,
    /// Flagship initiatives
    Initiatives,
    /// Quotes from alumni and participants
    Testimonials,
    /// Announcements
    BulletinItems,
    /// Externally hosted blog posts
    BlogPosts,
    /// Admin console logins
    AdminCredentials,
}

impl Collection {
    /// Every collection, in declaration order
    pub const ALL: [Collection; 8] = [
        Self::TeamMembers,
        Self::MemberSocialLinks,
        Self::GalleryItems,
        Self::Initiatives,
        Self::Testimonials,
        Self::BulletinItems,
        Self::BlogPosts,
        Self::AdminCredentials,
    ];

    /// Table name in the remote store
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TeamMembers => "team_members",
            Self::MemberSocialLinks => "member_social_links",
            Self::GalleryItems => "gallery_items",
            Self::Initiatives => "initiatives",
            Self::Testimonials => "testimonials",
            Self::BulletinItems => "bulletin_items",
            Self::BlogPosts => "blog_posts",
            Self::AdminCredentials => "admin_credentials",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| format!("unknown collection: '{s}'"))
    }
}

/// A row type bound to one remote collection
pub trait ContentRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection this record is read from
    const COLLECTION: Collection;

    /// Stable unique id
    fn id(&self) -> &str;

    /// Ordering applied when the caller does not choose one
    fn default_order() -> OrderBy {
        OrderBy::desc("created_at")
    }
}

/// Person on the team roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    /// Job title, matched against the role priority list
    pub position: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub batch_year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ContentRecord for TeamMember {
    const COLLECTION: Collection = Collection::TeamMembers;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Raw social link row; `icon` is the admin-chosen platform tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSocialLink {
    #[serde(default)]
    pub id: String,
    pub member_id: String,
    #[serde(default)]
    pub icon: String,
    pub url: String,
}

impl ContentRecord for MemberSocialLink {
    const COLLECTION: Collection = Collection::MemberSocialLinks;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// ISO date of the event
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub image_url: String,
}

impl ContentRecord for GalleryItem {
    const COLLECTION: Collection = Collection::GalleryItems;

    fn id(&self) -> &str {
        &self.id
    }

    fn default_order() -> OrderBy {
        OrderBy::desc("date")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initiative {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ContentRecord for Initiative {
    const COLLECTION: Collection = Collection::Initiatives;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub message: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ContentRecord for Testimonial {
    const COLLECTION: Collection = Collection::Testimonials;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Announcement with an optional link, image or PDF attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletinItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub attachment_type: Option<String>,
    #[serde(default)]
    pub attachment_url: Option<String>,
}

impl ContentRecord for BulletinItem {
    const COLLECTION: Collection = Collection::BulletinItems;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub medium_url: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub published_date: String,
    #[serde(default)]
    pub featured_image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ContentRecord for BlogPost {
    const COLLECTION: Collection = Collection::BlogPosts;

    fn id(&self) -> &str {
        &self.id
    }

    fn default_order() -> OrderBy {
        OrderBy::desc("published_date")
    }
}

/// Admin console login row
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredential {
    #[serde(default)]
    pub id: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredential")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ContentRecord for AdminCredential {
    const COLLECTION: Collection = Collection::AdminCredentials;

    fn id(&self) -> &str {
        &self.id
    }
}
