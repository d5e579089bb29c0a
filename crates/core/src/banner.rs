//! Banner and revision domain types shared by the content repository,
//! the revision resolver and the HTTP layer.

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// A banner: one feature, one or more tags.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub id: DbId,
    pub feature_id: DbId,
    /// Sorted ascending, never empty.
    pub tag_ids: Vec<DbId>,
    pub created_at: Timestamp,
}

/// One content payload of a banner. At most one revision per banner has
/// `is_active = true`.
///
/// `feature_id` and `tag_ids` record where the banner was addressed when
/// this revision was written; a banner may move between writes.
#[derive(Debug, Clone, PartialEq)]
pub struct Revision {
    pub id: DbId,
    pub banner_id: DbId,
    pub feature_id: DbId,
    /// Sorted ascending.
    pub tag_ids: Vec<DbId>,
    pub content: serde_json::Value,
    pub is_active: bool,
    /// Whether non-privileged readers may see this revision.
    pub is_visible: bool,
    pub updated_at: Timestamp,
}

impl Revision {
    /// Whether this revision was written for `(feature_id, tag_id)`.
    pub fn addresses(&self, feature_id: DbId, tag_id: DbId) -> bool {
        self.feature_id == feature_id && self.tag_ids.binary_search(&tag_id).is_ok()
    }
}

/// A banner together with its full revision history, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct BannerHistory {
    pub banner: Banner,
    pub revisions: Vec<Revision>,
}

impl BannerHistory {
    pub fn active_revision(&self) -> Option<&Revision> {
        self.revisions.iter().find(|r| r.is_active)
    }
}

/// The externally visible shape of a banner at one revision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BannerView {
    pub banner_id: DbId,
    pub feature_id: DbId,
    pub tag_ids: Vec<DbId>,
    pub content: serde_json::Value,
    /// Visibility switch of the revision, named as banner clients expect.
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BannerView {
    /// Addressing comes from the revision, so an older revision is shown
    /// with the feature and tags it was written for.
    pub fn new(banner: &Banner, revision: &Revision) -> Self {
        Self {
            banner_id: banner.id,
            feature_id: revision.feature_id,
            tag_ids: revision.tag_ids.clone(),
            content: revision.content.clone(),
            is_active: revision.is_visible,
            created_at: banner.created_at,
            updated_at: revision.updated_at,
        }
    }
}

/// A reader's request for the banner at one `(feature, tag)` address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerLookup {
    pub feature_id: DbId,
    pub tag_id: DbId,
    /// `true` reads the active revision; `false` reads the settled one.
    pub use_last_revision: bool,
}

/// Validated input for creating or replacing a banner.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBanner {
    pub feature_id: DbId,
    /// Sorted, deduplicated, non-empty.
    pub tag_ids: Vec<DbId>,
    pub content: serde_json::Value,
    pub is_visible: bool,
}

/// Listing filter for `GetBanners`.
#[derive(Debug, Clone, PartialEq)]
pub struct BannerFilter {
    pub feature_id: Option<DbId>,
    /// Empty means "all tags"; otherwise a banner matches when it carries
    /// at least one of these tags.
    pub tag_ids: Vec<DbId>,
    pub limit: i64,
    pub offset: i64,
    /// Include banners whose active revision is hidden.
    pub include_hidden: bool,
}
