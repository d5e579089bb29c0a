//! Query-string and body types for the banner endpoints, and their strict
//! conversion into validated inputs.
//!
//! Query values arrive as raw strings so that a non-numeric `tag_id` and an
//! out-of-range one produce the same validation error.

use banner_core::banner::{BannerFilter, BannerLookup, NewBanner};
use banner_core::error::CoreError;
use banner_core::types::DbId;
use banner_core::validation::{
    normalize_tag_ids, validate_content, validate_limit, validate_offset, validate_positive_id,
};
use serde::Deserialize;

pub const DEFAULT_LIMIT: i64 = 10;

/// `GET /api/v1/user_banner?tag_id=&feature_id=&use_last_revision=`
#[derive(Debug, Default, Deserialize)]
pub struct UserBannerParams {
    pub tag_id: Option<String>,
    pub feature_id: Option<String>,
    pub use_last_revision: Option<String>,
}

impl UserBannerParams {
    pub fn parse(self) -> Result<BannerLookup, CoreError> {
        Ok(BannerLookup {
            tag_id: required_id("tag_id", self.tag_id.as_deref())?,
            feature_id: required_id("feature_id", self.feature_id.as_deref())?,
            use_last_revision: parse_flag("use_last_revision", self.use_last_revision.as_deref())?,
        })
    }
}

/// `GET /api/v1/banner?feature_id=&tag_id=1,2&limit=&offset=`
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub feature_id: Option<String>,
    /// Comma-separated tag ids.
    pub tag_id: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ListParams {
    /// Build the repository filter. `include_hidden` comes from the caller's role.
    pub fn into_filter(self, include_hidden: bool) -> Result<BannerFilter, CoreError> {
        let feature_id = match non_empty(self.feature_id.as_deref()) {
            Some(raw) => Some(parse_id("feature_id", raw)?),
            None => None,
        };

        let tag_ids = match non_empty(self.tag_id.as_deref()) {
            Some(raw) => {
                let mut ids = raw
                    .split(',')
                    .map(|part| parse_id("tag_id", part.trim()))
                    .collect::<Result<Vec<_>, _>>()?;
                ids.sort_unstable();
                ids.dedup();
                ids
            }
            None => Vec::new(),
        };

        let limit = match non_empty(self.limit.as_deref()) {
            Some(raw) => raw
                .parse()
                .map_err(|_| CoreError::Validation("Limit must be a positive number".into()))?,
            None => DEFAULT_LIMIT,
        };
        validate_limit(limit)?;

        let offset = match non_empty(self.offset.as_deref()) {
            Some(raw) => raw
                .parse()
                .map_err(|_| CoreError::Validation("Offset must be non-negative".into()))?,
            None => 0,
        };
        validate_offset(offset)?;

        Ok(BannerFilter {
            feature_id,
            tag_ids,
            limit,
            offset,
            include_hidden,
        })
    }
}

/// Body of `POST /api/v1/banner` and `PATCH /api/v1/banner/{id}`.
#[derive(Debug, Deserialize)]
pub struct BannerRequest {
    pub tag_ids: Vec<DbId>,
    pub feature_id: DbId,
    pub content: serde_json::Value,
    /// Whether non-admin readers may see this revision.
    #[serde(default = "default_visible")]
    pub is_active: bool,
}

fn default_visible() -> bool {
    true
}

impl BannerRequest {
    pub fn into_new_banner(self) -> Result<NewBanner, CoreError> {
        validate_positive_id("feature_id", self.feature_id)?;
        let tag_ids = normalize_tag_ids(&self.tag_ids)?;
        validate_content(&self.content)?;
        Ok(NewBanner {
            feature_id: self.feature_id,
            tag_ids,
            content: self.content,
            is_visible: self.is_active,
        })
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn required_id(field: &str, raw: Option<&str>) -> Result<DbId, CoreError> {
    let raw = non_empty(raw).ok_or_else(|| invalid(field))?;
    parse_id(field, raw)
}

fn parse_id(field: &str, raw: &str) -> Result<DbId, CoreError> {
    let id: DbId = raw.parse().map_err(|_| invalid(field))?;
    validate_positive_id(field, id)?;
    Ok(id)
}

/// Only the literals `true` and `false` are accepted; absent means `false`.
fn parse_flag(field: &str, raw: Option<&str>) -> Result<bool, CoreError> {
    match non_empty(raw) {
        None | Some("false") => Ok(false),
        Some("true") => Ok(true),
        Some(_) => Err(invalid(field)),
    }
}

fn invalid(field: &str) -> CoreError {
    CoreError::Validation(format!("invalid or missing '{field}' parameter"))
}
