//! E-Cell content layer
//!
//! Everything the club site reads from or writes to its hosted backend,
//! independent of any rendering framework.
//!
//! # Core Operations
//!
//! - **Load**: [`load_collection`] reads a collection with live → cache →
//!   default degradation and never fails
//! - **Rank**: [`rank_roster`] orders people by role keyword priority
//! - **Resolve**: [`extract_handle`] and [`select_primary_link`] turn
//!   profile URLs into card handles and click-through targets
//! - **Administer**: [`AdminConsole`], [`AdminGate`] and [`ObjectStorage`]
//!   back the admin dashboard
//!
//! # Architecture
//!
//! ```text
//! RemoteStore ──▶ ContentLoader ──▶ TeamDirectory ──▶ RosterCard
//!      ▲               │                 │
//!      │          CacheStore        rank_roster + social handles
//! AdminConsole / AdminGate
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use ecell_content::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example(store: Arc<dyn RemoteStore>) {
//! let loader = ContentLoader::new(store, Arc::new(MemoryCacheStore::default()));
//!
//! let outcome = loader
//!     .load(LoadOptions::<GalleryItem>::new().with_defaults(defaults::gallery_items()))
//!     .await;
//!
//! if let Some(message) = &outcome.error {
//!     eprintln!("showing placeholder gallery: {message}");
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod admin;
pub mod auth;
pub mod cache;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod record;
pub mod roster;
pub mod social;
pub mod storage;
pub mod store;
pub mod team;

// Re-exports for convenience
pub use admin::AdminConsole;
pub use auth::{AdminGate, LoginOutcome};
pub use cache::{CacheStore, FileCacheStore, MemoryCacheStore};
pub use error::{
    AdminError, AuthError, CacheError, ContentError, RosterError, StorageError, StoreError,
};
pub use loader::{load_collection, ContentLoader, FallbackTier, LoadOptions, LoadOutcome};
pub use record::{Collection, ContentRecord};
pub use roster::{rank_roster, PriorityRoles, RosterEntry, DEFAULT_PRIORITY_ROLES, UNRANKED};
pub use social::{extract_handle, select_primary_link, Platform, SocialHandles, SocialLink};
pub use storage::{upload_path, MemoryObjectStorage, ObjectStorage};
pub use store::{Direction, Filter, MemoryStore, OrderBy, RemoteStore, SelectQuery};
pub use team::{RosterCard, RosterView, TeamDirectory};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for loading and ranking content
    pub use crate::cache::{CacheStore, FileCacheStore, MemoryCacheStore};
    pub use crate::defaults;
    pub use crate::loader::{ContentLoader, FallbackTier, LoadOptions, LoadOutcome};
    pub use crate::record::{
        BlogPost, BulletinItem, Collection, ContentRecord, GalleryItem, Initiative,
        MemberSocialLink, Testimonial, TeamMember,
    };
    pub use crate::roster::{rank_roster, PriorityRoles, RosterEntry};
    pub use crate::social::{Platform, SocialHandles, SocialLink};
    pub use crate::store::{Filter, OrderBy, RemoteStore, SelectQuery};
    pub use crate::team::{RosterCard, RosterView, TeamDirectory};
}
