//! Video entity - uploaded video metadata plus its reactions

use chrono::{DateTime, Utc};

use crate::ledger::{HasReactions, ReactionSet};
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: Snowflake,
    pub uploader_id: Snowflake,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub video_url: String,
    pub category: String,
    pub tags: Vec<String>,
    pub views: i64,
    pub reactions: ReactionSet,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Metadata edit from the uploader.
///
/// Field precedence: a `Some` field overrides the stored value, a `None`
/// field keeps it. Identity, uploader, views, reactions, and upload time
/// are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl VideoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.thumbnail_url.is_none()
            && self.category.is_none()
            && self.tags.is_none()
    }
}

impl Video {
    pub fn new(id: Snowflake, uploader_id: Snowflake, title: String, video_url: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            uploader_id,
            title,
            description: String::new(),
            thumbnail_url: String::new(),
            video_url,
            category: String::new(),
            tags: Vec::new(),
            views: 0,
            reactions: ReactionSet::new(),
            uploaded_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_uploaded_by(&self, user_id: Snowflake) -> bool {
        self.uploader_id == user_id
    }

    /// Apply a patch; returns whether anything was present to apply.
    pub fn merge(&mut self, patch: VideoPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        let VideoPatch {
            title,
            description,
            thumbnail_url,
            category,
            tags,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(thumbnail_url) = thumbnail_url {
            self.thumbnail_url = thumbnail_url;
        }
        if let Some(category) = category {
            self.category = normalize_category(&category);
        }
        if let Some(tags) = tags {
            self.tags = normalize_tags(tags);
        }
        self.updated_at = Utc::now();
        true
    }
}

impl HasReactions for Video {
    fn reactions(&self) -> &ReactionSet {
        &self.reactions
    }

    fn reactions_mut(&mut self) -> &mut ReactionSet {
        &mut self.reactions
    }
}

/// Categories are matched case-insensitively when filtering.
pub fn normalize_category(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Trim, lowercase, drop blanks, dedupe while keeping first-seen order.
pub fn normalize_tags(raw: Vec<String>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}
