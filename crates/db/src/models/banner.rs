//! Rows from `banners`, `versions` and `banner_tag`.

use banner_core::banner::{Banner, BannerView, Revision};
use banner_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A banner row joined with its aggregated tag ids.
#[derive(Debug, Clone, FromRow)]
pub struct BannerRow {
    pub id: DbId,
    pub feature_id: DbId,
    pub tag_ids: Vec<DbId>,
    pub created_at: Timestamp,
}

impl From<BannerRow> for Banner {
    fn from(row: BannerRow) -> Self {
        let mut tag_ids = row.tag_ids;
        tag_ids.sort_unstable();
        Banner {
            id: row.id,
            feature_id: row.feature_id,
            tag_ids,
            created_at: row.created_at,
        }
    }
}

/// One row of the `versions` table.
#[derive(Debug, Clone, FromRow)]
pub struct RevisionRow {
    pub id: DbId,
    pub banner_id: DbId,
    pub feature_id: DbId,
    pub tag_ids: Vec<DbId>,
    pub data: serde_json::Value,
    pub is_active: bool,
    pub is_visible: bool,
    pub updated_at: Timestamp,
}

impl From<RevisionRow> for Revision {
    fn from(row: RevisionRow) -> Self {
        let mut tag_ids = row.tag_ids;
        tag_ids.sort_unstable();
        Revision {
            id: row.id,
            banner_id: row.banner_id,
            feature_id: row.feature_id,
            tag_ids,
            content: row.data,
            is_active: row.is_active,
            is_visible: row.is_visible,
            updated_at: row.updated_at,
        }
    }
}

/// A listing row: banner, tags and active revision in one shape.
#[derive(Debug, Clone, FromRow)]
pub struct BannerViewRow {
    pub banner_id: DbId,
    pub feature_id: DbId,
    pub tag_ids: Vec<DbId>,
    pub data: serde_json::Value,
    pub is_visible: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<BannerViewRow> for BannerView {
    fn from(row: BannerViewRow) -> Self {
        BannerView {
            banner_id: row.banner_id,
            feature_id: row.feature_id,
            tag_ids: row.tag_ids,
            content: row.data,
            is_active: row.is_visible,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
