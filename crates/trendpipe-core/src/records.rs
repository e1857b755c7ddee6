//! Row shapes for the video-metadata feed.
//!
//! `VideoRow` models the landing-zone CSV exactly as it arrives: every cell
//! is raw text, addressed by header name. Typing happens later as an explicit
//! validation pass that produces typed-or-absent cells, so one bad cell never
//! takes down a row. `EnrichedRow` is the denormalized output shape; its
//! field order is the output column order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trending-video observation, as read from the landing CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoRow {
    pub video_id: String,
    /// Compact packed date token, e.g. `"17.14.06"`.
    pub trending_date: String,
    pub title: String,
    pub channel_title: String,
    /// Numeric category reference, kept as text for joining.
    pub category_id: String,
    /// ISO-like timestamp; only the leading date is used.
    pub publish_time: String,
    #[serde(default)]
    pub tags: String,
    pub views: String,
    pub likes: String,
    pub dislikes: String,
    pub comment_count: String,
    #[serde(default)]
    pub thumbnail_link: String,
    #[serde(default)]
    pub comments_disabled: String,
    #[serde(default)]
    pub ratings_disabled: String,
    #[serde(default)]
    pub video_error_or_removed: String,
    #[serde(default)]
    pub description: String,
}

/// A fully derived output row. Serde field order is the CSV column order,
/// so serializing with headers yields the fixed 21-column layout.
///
/// Absent cells (failed casts, unmatched joins) serialize as empty fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedRow {
    pub video_id: String,
    pub title: String,
    pub publish_time: Option<NaiveDate>,
    pub trending_date: Option<NaiveDate>,
    pub channel_title: String,
    pub category_id: String,
    pub category_name: Option<String>,
    pub tags: String,
    pub views: Option<i64>,
    pub likes: Option<i64>,
    pub dislikes: Option<i64>,
    pub comment_count: Option<i64>,
    pub thumbnail_link: String,
    pub comments_disabled: Option<bool>,
    pub ratings_disabled: Option<bool>,
    pub video_error_or_removed: Option<bool>,
    pub description: String,
    pub days_to_trend: Option<i64>,
    pub engagement_rate: Option<f64>,
    pub like_dislike_ratio: Option<f64>,
    pub popularity_level: String,
}
