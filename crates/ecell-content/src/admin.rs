//! Admin console operations
//!
//! Thin typed CRUD over the remote store. Unlike the loader there is no
//! fallback: every failure goes back to the caller, which shows it as a
//! notice.

use crate::error::AdminError;
use crate::record::{Collection, ContentRecord, MemberSocialLink, TeamMember};
use crate::store::{Filter, RemoteStore, SelectQuery};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// CRUD over every content collection
#[derive(Clone)]
pub struct AdminConsole {
    store: Arc<dyn RemoteStore>,
}

impl std::fmt::Debug for AdminConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConsole").finish_non_exhaustive()
    }
}

impl AdminConsole {
    /// Create console
    #[inline]
    #[must_use]
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    /// All rows of a collection in default order
    pub async fn list<R: ContentRecord>(&self) -> Result<Vec<R>, AdminError> {
        let query = SelectQuery::all(R::COLLECTION).order(R::default_order());
        let rows = self
            .store
            .select(&query)
            .await
            .map_err(|e| AdminError::store("list", e))?;

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(AdminError::from))
            .collect()
    }

    /// Insert a record; blank id and null fields are left to the store
    pub async fn create<R: ContentRecord>(&self, record: &R) -> Result<R, AdminError> {
        let payload = insert_payload(serde_json::to_value(record)?);
        let mut inserted = self
            .store
            .insert(R::COLLECTION, vec![payload])
            .await
            .map_err(|e| AdminError::store("create", e))?;

        let row = inserted.pop().ok_or(AdminError::MissingRow("create"))?;
        let created: R = serde_json::from_value(row)?;
        info!(collection = %R::COLLECTION, id = created.id(), "record created");
        Ok(created)
    }

    /// Overwrite a record's non-null fields by id
    pub async fn update<R: ContentRecord>(&self, record: &R) -> Result<usize, AdminError> {
        let mut patch = serde_json::to_value(record)?;
        if let Value::Object(map) = &mut patch {
            map.retain(|key, v| key != "id" && !v.is_null());
        }

        let updated = self
            .store
            .update(R::COLLECTION, &Filter::id(record.id()), patch)
            .await
            .map_err(|e| AdminError::store("update", e))?;

        info!(collection = %R::COLLECTION, id = record.id(), updated, "record updated");
        Ok(updated)
    }

    /// Delete a record by id
    pub async fn delete<R: ContentRecord>(&self, id: &str) -> Result<usize, AdminError> {
        let deleted = self
            .store
            .delete(R::COLLECTION, &Filter::id(id))
            .await
            .map_err(|e| AdminError::store("delete", e))?;

        info!(collection = %R::COLLECTION, id, deleted, "record deleted");
        Ok(deleted)
    }

    /// Insert a member, then their social links
    pub async fn add_member(
        &self,
        member: &TeamMember,
        links: &[MemberSocialLink],
    ) -> Result<TeamMember, AdminError> {
        let created = self.create(member).await?;
        self.insert_links(&created.id, links).await?;
        Ok(created)
    }

    /// Update a member and replace their social links
    pub async fn update_member(
        &self,
        member: &TeamMember,
        links: &[MemberSocialLink],
    ) -> Result<(), AdminError> {
        self.update(member).await?;

        let removed = self
            .store
            .delete(Collection::MemberSocialLinks, &Filter::eq("member_id", &member.id))
            .await
            .map_err(|e| AdminError::store("delete social links", e))?;
        debug!(member_id = %member.id, removed, "cleared social links");

        self.insert_links(&member.id, links).await
    }

    async fn insert_links(&self, member_id: &str, links: &[MemberSocialLink]) -> Result<(), AdminError> {
        let rows = links
            .iter()
            .filter(|link| !link.url.trim().is_empty())
            .map(|link| {
                let link = MemberSocialLink {
                    member_id: member_id.to_string(),
                    ..link.clone()
                };
                serde_json::to_value(link).map(insert_payload)
            })
            .collect::<Result<Vec<_>, _>>()?;

        if rows.is_empty() {
            return Ok(());
        }

        let count = rows.len();
        self.store
            .insert(Collection::MemberSocialLinks, rows)
            .await
            .map_err(|e| AdminError::store("insert social links", e))?;
        debug!(member_id, count, "inserted social links");
        Ok(())
    }
}

/// Drop a blank `id` and null fields so the store fills them
fn insert_payload(mut value: Value) -> Value {
    if let Value::Object(map) = &mut value {
        map.retain(|key, v| match v {
            Value::Null => false,
            Value::String(s) if key == "id" => !s.is_empty(),
            _ => true,
        });
    }
    value
}
