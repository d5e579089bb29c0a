//! Banner use-cases: revision-resolved reads, listing and admin writes.

use std::sync::Arc;

use banner_core::banner::{BannerFilter, BannerLookup, BannerView, NewBanner};
use banner_core::context::RequestContext;
use banner_core::error::CoreError;
use banner_core::resolver::ResolverPolicy;
use banner_core::store::ContentRepository;
use banner_core::types::DbId;
use chrono::Utc;

pub struct BannerService {
    repo: Arc<dyn ContentRepository>,
    policy: ResolverPolicy,
}

impl BannerService {
    pub fn new(repo: Arc<dyn ContentRepository>, policy: ResolverPolicy) -> Self {
        Self { repo, policy }
    }

    /// The banner a caller should see for `(feature_id, tag_id)`.
    ///
    /// No banner, no eligible revision, and a hidden revision for a
    /// non-admin caller are all `NotFound`. Only revisions written for the
    /// queried pair are eligible.
    pub async fn user_banner(
        &self,
        query: &BannerLookup,
        ctx: &RequestContext,
    ) -> Result<BannerView, CoreError> {
        let not_found = || {
            CoreError::not_found(
                "banner",
                format!("feature {} tag {}", query.feature_id, query.tag_id),
            )
        };

        let history = self
            .repo
            .find_by_feature_tag(query.feature_id, query.tag_id)
            .await?
            .ok_or_else(not_found)?;

        self.policy
            .resolve(&history, query, ctx.is_privileged(), Utc::now())
            .ok_or_else(not_found)
    }

    pub async fn list(&self, filter: &BannerFilter) -> Result<Vec<BannerView>, CoreError> {
        self.repo.list_banners(filter).await
    }

    pub async fn create(&self, input: &NewBanner) -> Result<DbId, CoreError> {
        let id = self.repo.add_banner(input).await?;
        tracing::info!(banner_id = id, feature_id = input.feature_id, "Banner created");
        Ok(id)
    }

    /// Replace the banner with a new active revision and return its view.
    pub async fn update(&self, id: DbId, input: &NewBanner) -> Result<BannerView, CoreError> {
        self.repo.update_banner(id, input).await?;
        tracing::info!(banner_id = id, feature_id = input.feature_id, "Banner updated");

        let history = self
            .repo
            .find_banner(id)
            .await?
            .ok_or_else(|| CoreError::not_found("banner", id))?;
        let revision = history
            .active_revision()
            .ok_or_else(|| CoreError::Internal(format!("banner {id} has no active revision")))?;
        Ok(BannerView::new(&history.banner, revision))
    }

    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        self.repo.delete_banner(id).await?;
        tracing::info!(banner_id = id, "Banner deleted");
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), CoreError> {
        self.repo.ping().await
    }
}
