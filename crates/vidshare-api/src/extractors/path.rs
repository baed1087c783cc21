//! Path parameter extractors
//!
//! Parse Snowflake IDs and subject kinds out of the URL, rejecting
//! malformed segments with a 400 before any handler runs.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::Deserialize;
use vidshare_core::{Snowflake, SubjectKind};

use crate::response::ApiError;

async fn raw_path<T, S>(parts: &mut Parts, state: &S) -> Result<T, ApiError>
where
    T: serde::de::DeserializeOwned + Send,
    S: Send + Sync,
{
    Path::<T>::from_request_parts(parts, state)
        .await
        .map(|Path(inner)| inner)
        .map_err(|e| ApiError::invalid_path(e.body_text()))
}

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// Single `{id}` segment
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub Snowflake);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for IdPath {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw: String = raw_path(parts, state).await?;
        Ok(Self(parse_id(&raw, "id")?))
    }
}

/// `{video_id}/{comment_id}` segments
#[derive(Debug, Clone, Copy)]
pub struct CommentPath {
    pub video_id: Snowflake,
    pub comment_id: Snowflake,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CommentPath {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let (video_id, comment_id): (String, String) = raw_path(parts, state).await?;
        Ok(Self {
            video_id: parse_id(&video_id, "video_id")?,
            comment_id: parse_id(&comment_id, "comment_id")?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawSubjectPath {
    kind: String,
    id: String,
}

/// `{kind}/{id}` segments of the generic reaction routes
#[derive(Debug, Clone, Copy)]
pub struct SubjectPath {
    pub kind: SubjectKind,
    pub id: Snowflake,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for SubjectPath {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw: RawSubjectPath = raw_path(parts, state).await?;
        Ok(Self {
            kind: raw
                .kind
                .parse()
                .map_err(|e: vidshare_core::UnknownSubjectKind| ApiError::invalid_path(e.to_string()))?,
            id: parse_id(&raw.id, "id")?,
        })
    }
}
