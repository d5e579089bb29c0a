//! Repository for `banners`, `versions` and `banner_tag`.
//!
//! Writes run in one transaction each. The `(feature_id, tag_id)` ownership
//! rule is checked inside the transaction for a readable error and is
//! backstopped by `uq_banner_tag_feature_tag` for concurrent writers.

use async_trait::async_trait;
use banner_core::banner::{BannerFilter, BannerHistory, BannerView, NewBanner};
use banner_core::error::CoreError;
use banner_core::store::{ContentRepository, StoreResult};
use banner_core::types::DbId;
use sqlx::PgConnection;

use crate::error::classify;
use crate::models::banner::{BannerRow, BannerViewRow, RevisionRow};
use crate::DbPool;

const BANNER_COLUMNS: &str = "b.id, b.feature_id, \
    ARRAY(SELECT t.tag_id FROM banner_tag t WHERE t.banner_id = b.id ORDER BY t.tag_id) AS tag_ids, \
    b.created_at";

const REVISION_COLUMNS: &str =
    "id, banner_id, feature_id, tag_ids, data, is_active, is_visible, updated_at";

#[derive(Clone)]
pub struct PgContentRepo {
    pool: DbPool,
}

impl PgContentRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load_history(&self, id: DbId) -> StoreResult<Option<BannerHistory>> {
        let query = format!("SELECT {BANNER_COLUMNS} FROM banners b WHERE b.id = $1");
        let Some(banner) = sqlx::query_as::<_, BannerRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
        else {
            return Ok(None);
        };

        let query = format!(
            "SELECT {REVISION_COLUMNS} FROM versions
             WHERE banner_id = $1
             ORDER BY updated_at DESC, id DESC"
        );
        let revisions = sqlx::query_as::<_, RevisionRow>(&query)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;

        Ok(Some(BannerHistory {
            banner: banner.into(),
            revisions: revisions.into_iter().map(Into::into).collect(),
        }))
    }
}

/// Fail with `Conflict` if another banner already owns one of the pairs.
async fn ensure_pairs_free(
    conn: &mut PgConnection,
    feature_id: DbId,
    tag_ids: &[DbId],
    except_banner: Option<DbId>,
) -> StoreResult<()> {
    let taken = sqlx::query_scalar::<_, DbId>(
        "SELECT tag_id FROM banner_tag
         WHERE feature_id = $1
           AND tag_id = ANY($2)
           AND ($3::BIGINT IS NULL OR banner_id <> $3)
         ORDER BY tag_id
         LIMIT 1",
    )
    .bind(feature_id)
    .bind(tag_ids)
    .bind(except_banner)
    .fetch_optional(&mut *conn)
    .await
    .map_err(classify)?;

    match taken {
        Some(tag_id) => Err(pair_taken(feature_id, tag_id)),
        None => Ok(()),
    }
}

fn pair_taken(feature_id: DbId, tag_id: DbId) -> CoreError {
    CoreError::Conflict(format!(
        "feature {feature_id} with tag {tag_id} already belongs to another banner"
    ))
}

/// Map a unique violation raised by a concurrent writer to a pair conflict.
fn classify_write(err: sqlx::Error, input: &NewBanner) -> CoreError {
    match classify(err) {
        CoreError::Conflict(_) => CoreError::Conflict(format!(
            "feature {} with one of tags {:?} already belongs to another banner",
            input.feature_id, input.tag_ids
        )),
        other => other,
    }
}

async fn insert_tags(conn: &mut PgConnection, banner_id: DbId, input: &NewBanner) -> StoreResult<()> {
    sqlx::query(
        "INSERT INTO banner_tag (banner_id, tag_id, feature_id)
         SELECT $1, UNNEST($2::BIGINT[]), $3",
    )
    .bind(banner_id)
    .bind(&input.tag_ids)
    .bind(input.feature_id)
    .execute(&mut *conn)
    .await
    .map_err(|e| classify_write(e, input))?;
    Ok(())
}

async fn insert_revision(
    conn: &mut PgConnection,
    banner_id: DbId,
    input: &NewBanner,
) -> StoreResult<()> {
    sqlx::query(
        "INSERT INTO versions (banner_id, feature_id, tag_ids, data, is_active, is_visible)
         VALUES ($1, $2, $3, $4, TRUE, $5)",
    )
    .bind(banner_id)
    .bind(input.feature_id)
    .bind(&input.tag_ids)
    .bind(&input.content)
    .bind(input.is_visible)
    .execute(&mut *conn)
    .await
    .map_err(classify)?;
    Ok(())
}

#[async_trait]
impl ContentRepository for PgContentRepo {
    async fn add_banner(&self, input: &NewBanner) -> StoreResult<DbId> {
        let mut tx = self.pool.begin().await.map_err(classify)?;

        ensure_pairs_free(&mut tx, input.feature_id, &input.tag_ids, None).await?;

        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO banners (feature_id) VALUES ($1) RETURNING id",
        )
        .bind(input.feature_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(classify)?;

        insert_tags(&mut tx, id, input).await?;
        insert_revision(&mut tx, id, input).await?;

        tx.commit().await.map_err(classify)?;
        tracing::debug!(banner_id = id, feature_id = input.feature_id, "Banner created");
        Ok(id)
    }

    async fn update_banner(&self, id: DbId, input: &NewBanner) -> StoreResult<()> {
        let mut tx = self.pool.begin().await.map_err(classify)?;

        sqlx::query_scalar::<_, DbId>("SELECT id FROM banners WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(classify)?
            .ok_or_else(|| CoreError::not_found("banner", id))?;

        ensure_pairs_free(&mut tx, input.feature_id, &input.tag_ids, Some(id)).await?;

        let deactivated =
            sqlx::query("UPDATE versions SET is_active = FALSE WHERE banner_id = $1 AND is_active")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(classify)?
                .rows_affected();
        if deactivated != 1 {
            tracing::warn!(banner_id = id, deactivated, "Unexpected active revision count");
        }

        insert_revision(&mut tx, id, input).await?;

        sqlx::query("UPDATE banners SET feature_id = $2 WHERE id = $1")
            .bind(id)
            .bind(input.feature_id)
            .execute(&mut *tx)
            .await
            .map_err(classify)?;

        sqlx::query("DELETE FROM banner_tag WHERE banner_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(classify)?;
        insert_tags(&mut tx, id, input).await?;

        tx.commit().await.map_err(classify)?;
        tracing::debug!(banner_id = id, feature_id = input.feature_id, "Banner updated");
        Ok(())
    }

    async fn delete_banner(&self, id: DbId) -> StoreResult<()> {
        let mut tx = self.pool.begin().await.map_err(classify)?;

        sqlx::query("DELETE FROM banner_tag WHERE banner_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(classify)?;
        sqlx::query("DELETE FROM versions WHERE banner_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(classify)?;
        let deleted = sqlx::query("DELETE FROM banners WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(classify)?
            .rows_affected();

        if deleted == 0 {
            return Err(CoreError::not_found("banner", id));
        }

        tx.commit().await.map_err(classify)?;
        tracing::debug!(banner_id = id, "Banner deleted");
        Ok(())
    }

    async fn find_banner(&self, id: DbId) -> StoreResult<Option<BannerHistory>> {
        self.load_history(id).await
    }

    async fn find_by_feature_tag(
        &self,
        feature_id: DbId,
        tag_id: DbId,
    ) -> StoreResult<Option<BannerHistory>> {
        let banner_id = sqlx::query_scalar::<_, DbId>(
            "SELECT banner_id FROM banner_tag WHERE feature_id = $1 AND tag_id = $2",
        )
        .bind(feature_id)
        .bind(tag_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        match banner_id {
            Some(id) => self.load_history(id).await,
            None => Ok(None),
        }
    }

    async fn list_banners(&self, filter: &BannerFilter) -> StoreResult<Vec<BannerView>> {
        let rows = sqlx::query_as::<_, BannerViewRow>(
            "SELECT b.id AS banner_id, b.feature_id,
                    ARRAY(SELECT t.tag_id FROM banner_tag t
                          WHERE t.banner_id = b.id ORDER BY t.tag_id) AS tag_ids,
                    v.data, v.is_visible, b.created_at, v.updated_at
             FROM banners b
             JOIN versions v ON v.banner_id = b.id AND v.is_active
             WHERE ($1::BIGINT IS NULL OR b.feature_id = $1)
               AND (cardinality($2::BIGINT[]) = 0 OR EXISTS (
                    SELECT 1 FROM banner_tag t
                    WHERE t.banner_id = b.id AND t.tag_id = ANY($2)))
               AND ($3 OR v.is_visible)
             ORDER BY b.id
             LIMIT $4 OFFSET $5",
        )
        .bind(filter.feature_id)
        .bind(&filter.tag_ids)
        .bind(filter.include_hidden)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(classify)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await.map_err(classify)
    }
}
