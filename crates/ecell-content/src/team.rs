//! Team page composition
//!
//! Loads a batch's members through the resilient loader, attaches each
//! member's social links, ranks the roster and turns it into cards.

use crate::defaults;
use crate::loader::{ContentLoader, FallbackTier, LoadOptions};
use crate::record::{Collection, MemberSocialLink, TeamMember};
use crate::roster::{rank_roster, PriorityRoles, RosterEntry};
use crate::social::{select_primary_link, SocialHandles, SocialLink};
use crate::store::{Filter, SelectQuery};
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

/// Batch shown by default
pub const CURRENT_BATCH: &str = "2024-25";

/// Members shown in the homepage preview
pub const PREVIEW_LIMIT: usize = 6;

/// Cache key for a batch; capped loads get their own entry
fn cache_key(batch: &str, limit: Option<usize>) -> String {
    match limit {
        Some(limit) => format!("{}.{batch}.top{limit}", Collection::TeamMembers),
        None => format!("{}.{batch}", Collection::TeamMembers),
    }
}

/// One card in the team grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterCard {
    pub name: String,
    pub title: String,
    pub image_url: String,
    pub handles: SocialHandles,
    /// Click-through target
    pub primary_url: Option<String>,
}

impl From<&RosterEntry> for RosterCard {
    fn from(entry: &RosterEntry) -> Self {
        Self {
            name: entry.name.clone(),
            title: entry.title.clone(),
            image_url: entry.image_url.clone(),
            handles: SocialHandles::resolve(&entry.social_links),
            primary_url: select_primary_link(&entry.social_links).map(|l| l.url.clone()),
        }
    }
}

/// Ranked cards plus where the member rows came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterView {
    pub cards: Vec<RosterCard>,
    pub used_fallback: FallbackTier,
    pub error: Option<String>,
}

/// Team page data source
#[derive(Debug, Clone)]
pub struct TeamDirectory {
    loader: ContentLoader,
    roles: PriorityRoles,
}

impl TeamDirectory {
    /// Create directory with the default role order
    #[inline]
    #[must_use]
    pub fn new(loader: ContentLoader) -> Self {
        Self {
            loader,
            roles: PriorityRoles::default(),
        }
    }

    /// With custom role order
    #[inline]
    #[must_use]
    pub fn with_roles(mut self, roles: PriorityRoles) -> Self {
        self.roles = roles;
        self
    }

    /// Full roster for a batch
    pub async fn load_roster(&self, batch: &str, defaults: Vec<TeamMember>) -> RosterView {
        self.load(batch, None, defaults).await
    }

    /// Homepage preview: newest members of the current batch
    ///
    /// Falls back to the placeholder leadership when nothing is cached.
    pub async fn load_preview(&self) -> RosterView {
        self.load(CURRENT_BATCH, Some(PREVIEW_LIMIT), defaults::team_members())
            .await
    }

    async fn load(&self, batch: &str, limit: Option<usize>, defaults: Vec<TeamMember>) -> RosterView {
        let mut options = LoadOptions::<TeamMember>::new()
            .with_filter(Filter::eq("batch_year", batch))
            .with_cache_key(cache_key(batch, limit))
            .with_defaults(defaults);
        if let Some(limit) = limit {
            options = options.with_limit(limit);
        }

        let outcome = self.loader.load(options).await;

        let links = join_all(outcome.rows.iter().map(|m| self.links_for(&m.id))).await;

        let entries: Vec<RosterEntry> = outcome
            .rows
            .iter()
            .zip(links)
            .filter_map(|(member, links)| {
                match RosterEntry::new(&member.name, &member.position, &member.image_url) {
                    Ok(entry) => Some(entry.with_links(links)),
                    Err(e) => {
                        warn!(member_id = %member.id, error = %e, "skipping roster entry");
                        None
                    }
                }
            })
            .collect();

        let cards = rank_roster(&entries, &self.roles)
            .iter()
            .map(RosterCard::from)
            .collect();

        RosterView {
            cards,
            used_fallback: outcome.used_fallback,
            error: outcome.error,
        }
    }

    /// Social links for one member; failures yield no links
    async fn links_for(&self, member_id: &str) -> Vec<SocialLink> {
        let query = SelectQuery::all(Collection::MemberSocialLinks)
            .filter(Filter::eq("member_id", member_id));

        let rows = match self.loader.store().select(&query).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(member_id, error = %e, "error fetching social links");
                return Vec::new();
            }
        };

        let links: Vec<SocialLink> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<MemberSocialLink>(row) {
                Ok(link) => Some(SocialLink::from(&link)),
                Err(e) => {
                    warn!(member_id, error = %e, "dropping malformed social link");
                    None
                }
            })
            .collect();

        debug!(member_id, links = links.len(), "attached social links");
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheStore;
    use crate::social::Platform;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn seeded() -> Arc<MemoryStore> {
        Arc::new(
            MemoryStore::new()
                .with_rows(
                    Collection::TeamMembers,
                    vec![
                        json!({"id": "1", "name": "Vol", "position": "Volunteer", "batch_year": "2024-25", "created_at": "2024-08-03"}),
                        json!({"id": "2", "name": "Pres", "position": "President", "batch_year": "2024-25", "created_at": "2024-08-01"}),
                        json!({"id": "3", "name": "VP", "position": "Vice President", "batch_year": "2024-25", "created_at": "2024-08-02"}),
                        json!({"id": "4", "name": "Old", "position": "President", "batch_year": "2023-24", "created_at": "2023-08-01"}),
                        json!({"id": "5", "name": " ", "position": "Volunteer", "batch_year": "2024-25", "created_at": "2024-08-04"}),
                    ],
                )
                .with_rows(
                    Collection::MemberSocialLinks,
                    vec![
                        json!({"id": "l1", "member_id": "2", "icon": "instagram", "url": "https://instagram.com/pres"}),
                        json!({"id": "l2", "member_id": "2", "icon": "linkedin", "url": "https://linkedin.com/in/pres-li"}),
                        json!({"id": "l3", "member_id": "3", "icon": "twitter", "url": "https://x.com/vp"}),
                    ],
                ),
        )
    }

    fn directory(store: Arc<MemoryStore>) -> TeamDirectory {
        TeamDirectory::new(ContentLoader::new(store, Arc::new(MemoryCacheStore::default())))
    }

    #[tokio::test]
    async fn roster_is_ranked_with_handles() {
        let view = directory(seeded()).load_roster("2024-25", Vec::new()).await;

        let names: Vec<_> = view.cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Pres", "VP", "Vol"]);
        assert_eq!(view.used_fallback, FallbackTier::None);

        let pres = &view.cards[0];
        assert_eq!(pres.primary_url.as_deref(), Some("https://linkedin.com/in/pres-li"));
        assert_eq!(pres.handles.linkedin.as_deref(), Some("@pres-li"));
        assert_eq!(pres.handles.instagram.as_deref(), Some("@pres"));

        let vp = &view.cards[1];
        assert_eq!(vp.handles.twitter.as_deref(), Some("@vp"));
        assert_eq!(vp.primary_url.as_deref(), Some("https://x.com/vp"));

        assert!(view.cards[2].handles.is_empty());
        assert_eq!(view.cards[2].primary_url, None);
    }

    #[tokio::test]
    async fn link_failure_leaves_members_without_links() {
        let store = seeded();
        store.set_collection_offline(Collection::MemberSocialLinks, true);

        let view = directory(store).load_roster("2024-25", Vec::new()).await;

        assert_eq!(view.cards.len(), 3);
        assert!(view.cards.iter().all(|c| c.handles.is_empty() && c.primary_url.is_none()));
        assert_eq!(view.error, None);
    }

    #[tokio::test]
    async fn outage_serves_cached_batch() {
        let store = seeded();
        let directory = directory(store.clone());
        let _ = directory.load_roster("2024-25", Vec::new()).await;

        store.set_offline(true);
        let view = directory.load_roster("2024-25", Vec::new()).await;

        assert_eq!(view.used_fallback, FallbackTier::Cache);
        assert_eq!(view.cards[0].name, "Pres");

        // A batch never loaded before has no cache of its own
        let other = directory.load_roster("2023-24", Vec::new()).await;
        assert_eq!(other.used_fallback, FallbackTier::Default);
        assert!(other.error.is_some());
    }

    fn large_batch() -> Arc<MemoryStore> {
        let titles = [
            "Volunteer",
            "Content Writer",
            "President",
            "Event Head",
            "Coordinator",
            "Vice President",
            "Technical Head",
            "Volunteer",
            "Graphic Designer",
            "Volunteer",
        ];
        let rows = titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                json!({
                    "id": format!("m{i}"),
                    "name": format!("Member {i}"),
                    "position": title,
                    "batch_year": CURRENT_BATCH,
                    "created_at": format!("2024-08-{:02}", i + 1),
                })
            })
            .collect();
        Arc::new(MemoryStore::new().with_rows(Collection::TeamMembers, rows))
    }

    #[tokio::test]
    async fn preview_takes_newest_then_ranks() {
        let view = directory(large_batch()).load_preview().await;

        assert_eq!(view.cards.len(), PREVIEW_LIMIT);
        // m4..m9 are the six newest; m0..m3 (including the President) are cut.
        // Tied volunteers keep newest-first order.
        let names: Vec<_> = view.cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Member 5", "Member 6", "Member 8", "Member 4", "Member 9", "Member 7"]
        );
    }

    #[tokio::test]
    async fn preview_does_not_replace_cached_roster() {
        let store = large_batch();
        let directory = directory(store.clone());

        let live = directory.load_roster(CURRENT_BATCH, Vec::new()).await;
        assert_eq!(live.cards.len(), 10);
        let _ = directory.load_preview().await;

        store.set_offline(true);
        let full = directory.load_roster(CURRENT_BATCH, Vec::new()).await;
        assert_eq!(full.used_fallback, FallbackTier::Cache);
        assert_eq!(full.cards.len(), 10);

        let preview = directory.load_preview().await;
        assert_eq!(preview.used_fallback, FallbackTier::Cache);
        assert_eq!(preview.cards.len(), PREVIEW_LIMIT);
    }

    #[tokio::test]
    async fn cold_preview_outage_shows_placeholder_leadership() {
        let store = seeded();
        store.set_offline(true);

        let view = directory(store).load_preview().await;

        assert_eq!(view.used_fallback, FallbackTier::Default);
        assert!(view.error.is_some());
        let titles: Vec<_> = view.cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["President", "Vice President", "Secretary"]);
    }

    #[test]
    fn card_from_entry() {
        let entry = RosterEntry::new("Asha", "Event Head", "https://cdn/a.jpg")
            .unwrap()
            .with_links(vec![SocialLink::new(Platform::Instagram, "https://instagram.com/asha")]);

        let card = RosterCard::from(&entry);
        assert_eq!(card.handles.instagram.as_deref(), Some("@asha"));
        assert_eq!(card.primary_url.as_deref(), Some("https://instagram.com/asha"));
    }
}
