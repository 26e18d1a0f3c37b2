//! Testing utilities for the E-Cell workspace
//!
//! Shared row fixtures and pre-seeded stores.

#![allow(missing_docs)]

use ecell_content::record::{Collection, TeamMember};
use ecell_content::roster::RosterEntry;
use ecell_content::social::{Platform, SocialLink};
use ecell_content::store::MemoryStore;
use serde_json::{json, Value};
use std::sync::Arc;

pub const BATCH: &str = "2024-25";

pub fn team_member_row(id: &str, name: &str, position: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "position": position,
        "image_url": format!("https://cdn.example/team/{id}.jpg"),
        "batch_year": BATCH,
        "created_at": created_at,
    })
}

pub fn social_link_row(id: &str, member_id: &str, icon: &str, url: &str) -> Value {
    json!({
        "id": id,
        "member_id": member_id,
        "icon": icon,
        "url": url,
    })
}

pub fn gallery_row(id: &str, title: &str, date: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "date": date,
        "image_url": format!("https://cdn.example/gallery/{id}.jpg"),
    })
}

pub fn team_member(id: &str, name: &str, position: &str) -> TeamMember {
    TeamMember {
        id: id.to_string(),
        name: name.to_string(),
        position: position.to_string(),
        image_url: String::new(),
        batch_year: BATCH.to_string(),
        created_at: None,
    }
}

pub fn roster_entry(name: &str, title: &str) -> RosterEntry {
    RosterEntry::new(name, title, "").unwrap()
}

pub fn roster_entry_with_links(name: &str, title: &str, links: &[(Platform, &str)]) -> RosterEntry {
    roster_entry(name, title).with_links(
        links
            .iter()
            .map(|(platform, url)| SocialLink::new(*platform, *url))
            .collect(),
    )
}

/// Current batch in insertion order (oldest first), with a few social links
pub fn seeded_team_store() -> Arc<MemoryStore> {
    Arc::new(
        MemoryStore::new()
            .with_rows(
                Collection::TeamMembers,
                vec![
                    team_member_row("m1", "Riya", "Volunteer", "2024-08-01T10:00:00Z"),
                    team_member_row("m2", "Kabir", "Technical Head", "2024-08-02T10:00:00Z"),
                    team_member_row("m3", "Meera", "Vice President", "2024-08-03T10:00:00Z"),
                    team_member_row("m4", "Arjun", "President", "2024-08-04T10:00:00Z"),
                    team_member_row("m5", "Tara", "Chief Mascot", "2024-08-05T10:00:00Z"),
                ],
            )
            .with_rows(
                Collection::MemberSocialLinks,
                vec![
                    social_link_row("l1", "m4", "instagram", "https://instagram.com/arjun.ecell"),
                    social_link_row("l2", "m4", "linkedin", "https://www.linkedin.com/in/arjun-s/"),
                    social_link_row("l3", "m3", "twitter", "https://x.com/meera"),
                    social_link_row("l4", "m2", "github", "https://github.com/kabir"),
                ],
            ),
    )
}

pub fn seeded_gallery_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new().with_rows(
        Collection::GalleryItems,
        vec![
            gallery_row("g1", "Ideathon", "2024-02-11"),
            gallery_row("g2", "E-Summit 2024", "2024-03-20"),
            gallery_row("g3", "Founders Meetup", "2024-01-05"),
        ],
    ))
}
