//! Revision selection for `(feature, tag)` reads.
//!
//! Two read modes exist:
//!
//! - **latest** (`use_last_revision = true`): the revision currently marked
//!   active, visible immediately after a write.
//! - **settled** (`use_last_revision = false`): the revision that was active
//!   `staleness` ago. Every revision is active from the moment it is written
//!   until the next write, so this is the newest revision whose `updated_at`
//!   is at or before `now - staleness`. While a fresh update is still
//!   settling, readers keep seeing the previous content.
//!
//! Only revisions written for the requested address are candidates. When an
//! update moves a banner to another feature or tag set, the new address has
//! no settled content until the moving revision settles, and content written
//! for the old address is never served under the new one.
//!
//! Visibility is applied after selection: a hidden revision is only returned
//! to privileged callers.

use chrono::Duration;

use crate::banner::{BannerHistory, BannerLookup, BannerView, Revision};
use crate::types::Timestamp;

/// Default settle time for the settled read mode.
pub const DEFAULT_STALENESS_SECS: i64 = 300;

/// Upper bound for the settle time (30 days).
pub const MAX_STALENESS_SECS: i64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverPolicy {
    pub staleness: Duration,
}

impl Default for ResolverPolicy {
    fn default() -> Self {
        Self {
            staleness: Duration::seconds(DEFAULT_STALENESS_SECS),
        }
    }
}

impl ResolverPolicy {
    /// `secs` is clamped to `0..=MAX_STALENESS_SECS`.
    pub fn with_staleness_secs(secs: i64) -> Self {
        Self {
            staleness: Duration::seconds(secs.clamp(0, MAX_STALENESS_SECS)),
        }
    }

    /// Pick the revision a reader should see. `revisions` may be in any order.
    pub fn select<'a>(
        &self,
        revisions: &'a [Revision],
        lookup: &BannerLookup,
        now: Timestamp,
    ) -> Option<&'a Revision> {
        let addressed = revisions
            .iter()
            .filter(|r| r.addresses(lookup.feature_id, lookup.tag_id));

        if lookup.use_last_revision {
            return addressed
                .filter(|r| r.is_active)
                .max_by_key(|r| (r.updated_at, r.id));
        }

        let cutoff = now - self.staleness;
        addressed
            .filter(|r| r.updated_at <= cutoff)
            .max_by_key(|r| (r.updated_at, r.id))
    }

    /// Resolve the view of `history` for a caller, or `None` when nothing
    /// should be shown.
    pub fn resolve(
        &self,
        history: &BannerHistory,
        lookup: &BannerLookup,
        privileged: bool,
        now: Timestamp,
    ) -> Option<BannerView> {
        let revision = self.select(&history.revisions, lookup, now)?;
        if !revision.is_visible && !privileged {
            return None;
        }
        Some(BannerView::new(&history.banner, revision))
    }
}
