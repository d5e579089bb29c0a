use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use banner_core::banner::{Banner, BannerFilter, BannerHistory, BannerView, NewBanner, Revision};
use banner_core::error::CoreError;
use banner_core::store::{ContentRepository, StoreResult};
use banner_core::types::DbId;
use chrono::Utc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    next_banner_id: DbId,
    next_revision_id: DbId,
    banners: BTreeMap<DbId, Banner>,
    /// Per banner, oldest first.
    revisions: HashMap<DbId, Vec<Revision>>,
    /// `(feature_id, tag_id)` to owning banner.
    pairs: HashMap<(DbId, DbId), DbId>,
}

impl Inner {
    fn ensure_pairs_free(&self, input: &NewBanner, except: Option<DbId>) -> StoreResult<()> {
        for &tag_id in &input.tag_ids {
            match self.pairs.get(&(input.feature_id, tag_id)) {
                Some(&owner) if Some(owner) != except => {
                    return Err(CoreError::Conflict(format!(
                        "feature {} with tag {tag_id} already belongs to another banner",
                        input.feature_id
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn push_revision(&mut self, banner_id: DbId, input: &NewBanner) {
        self.next_revision_id += 1;
        let revision = Revision {
            id: self.next_revision_id,
            banner_id,
            feature_id: input.feature_id,
            tag_ids: input.tag_ids.clone(),
            content: input.content.clone(),
            is_active: true,
            is_visible: input.is_visible,
            updated_at: Utc::now(),
        };
        self.revisions.entry(banner_id).or_default().push(revision);
    }

    fn history(&self, id: DbId) -> Option<BannerHistory> {
        let banner = self.banners.get(&id)?.clone();
        let mut revisions = self.revisions.get(&id).cloned().unwrap_or_default();
        revisions.reverse();
        Some(BannerHistory { banner, revisions })
    }
}

/// Banners, revisions and tag ownership kept in process memory.
#[derive(Clone, Default)]
pub struct MemoryContentRepo {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryContentRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentRepository for MemoryContentRepo {
    async fn add_banner(&self, input: &NewBanner) -> StoreResult<DbId> {
        let mut inner = self.inner.write().await;
        inner.ensure_pairs_free(input, None)?;

        inner.next_banner_id += 1;
        let id = inner.next_banner_id;
        inner.banners.insert(
            id,
            Banner {
                id,
                feature_id: input.feature_id,
                tag_ids: input.tag_ids.clone(),
                created_at: Utc::now(),
            },
        );
        for &tag_id in &input.tag_ids {
            inner.pairs.insert((input.feature_id, tag_id), id);
        }
        inner.push_revision(id, input);
        Ok(id)
    }

    async fn update_banner(&self, id: DbId, input: &NewBanner) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let Some(current) = inner.banners.get(&id).cloned() else {
            return Err(CoreError::not_found("banner", id));
        };
        inner.ensure_pairs_free(input, Some(id))?;

        if let Some(revisions) = inner.revisions.get_mut(&id) {
            for revision in revisions.iter_mut() {
                revision.is_active = false;
            }
        }
        inner.push_revision(id, input);

        for tag_id in &current.tag_ids {
            inner.pairs.remove(&(current.feature_id, *tag_id));
        }
        for &tag_id in &input.tag_ids {
            inner.pairs.insert((input.feature_id, tag_id), id);
        }
        if let Some(banner) = inner.banners.get_mut(&id) {
            banner.feature_id = input.feature_id;
            banner.tag_ids = input.tag_ids.clone();
        }
        Ok(())
    }

    async fn delete_banner(&self, id: DbId) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let Some(banner) = inner.banners.remove(&id) else {
            return Err(CoreError::not_found("banner", id));
        };
        inner.revisions.remove(&id);
        for tag_id in &banner.tag_ids {
            inner.pairs.remove(&(banner.feature_id, *tag_id));
        }
        Ok(())
    }

    async fn find_banner(&self, id: DbId) -> StoreResult<Option<BannerHistory>> {
        Ok(self.inner.read().await.history(id))
    }

    async fn find_by_feature_tag(
        &self,
        feature_id: DbId,
        tag_id: DbId,
    ) -> StoreResult<Option<BannerHistory>> {
        let inner = self.inner.read().await;
        Ok(inner
            .pairs
            .get(&(feature_id, tag_id))
            .and_then(|&id| inner.history(id)))
    }

    async fn list_banners(&self, filter: &BannerFilter) -> StoreResult<Vec<BannerView>> {
        let inner = self.inner.read().await;
        let offset = usize::try_from(filter.offset).unwrap_or(0);
        let limit = usize::try_from(filter.limit).unwrap_or(0);

        let views = inner
            .banners
            .values()
            .filter(|b| filter.feature_id.map_or(true, |f| b.feature_id == f))
            .filter(|b| {
                filter.tag_ids.is_empty() || b.tag_ids.iter().any(|t| filter.tag_ids.contains(t))
            })
            .filter_map(|b| {
                let active = inner.revisions.get(&b.id)?.iter().find(|r| r.is_active)?;
                (filter.include_hidden || active.is_visible).then(|| BannerView::new(b, active))
            })
            .skip(offset)
            .take(limit)
            .collect();
        Ok(views)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
