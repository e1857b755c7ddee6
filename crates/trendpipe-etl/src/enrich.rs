//! Per-cell derivations and the row enrichment pass.
//!
//! Every function here is a total, deterministic mapping from raw cells to
//! typed-or-absent values: a cell that fails to parse becomes `None` without
//! affecting the rest of its row. The whole-row pass composes them and
//! resolves the category left join.

use std::collections::HashMap;

use chrono::NaiveDate;

use trendpipe_core::{EnrichedRow, VideoRow};

use crate::categories::normalize_category_id;

const HIGH_VIEWS: i64 = 1_000_000;
const MEDIUM_VIEWS: i64 = 100_000;

/// Reparse the packed trending-date token into a calendar date.
///
/// Fixed slice positions over the raw token: chars `0..2` are the two-digit
/// year (offset from 2000), `3..5` the day, `6..8` the month, so
/// `"17.14.06"` → 2017-06-14. Anything that does not slice and parse into a
/// real calendar date is absent.
#[must_use]
pub fn parse_trending_date(raw: &str) -> Option<NaiveDate> {
    let year = raw.get(0..2)?.parse::<i32>().ok()? + 2000;
    let day = raw.get(3..5)?.parse::<u32>().ok()?;
    let month = raw.get(6..8)?.parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Take the leading `YYYY-MM-DD` of a publish timestamp, discarding the
/// time of day. Returns `None` if the prefix is not a valid date.
#[must_use]
pub fn parse_publish_date(raw: &str) -> Option<NaiveDate> {
    let prefix = raw.get(0..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Cast a count cell to an integer; unparseable text is absent.
#[must_use]
pub fn parse_count(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Parse a boolean flag cell (`"True"`/`"False"` in the feed, case varies).
#[must_use]
pub fn parse_flag(raw: &str) -> Option<bool> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Whole-day difference between trending and publish dates. Negative values
/// are data inconsistencies, kept as-is.
#[must_use]
pub fn days_to_trend(trending: Option<NaiveDate>, publish: Option<NaiveDate>) -> Option<i64> {
    Some((trending? - publish?).num_days())
}

/// Engagement rate: `(likes + dislikes + comments) / views × 100`, rounded
/// to 4 decimals.
///
/// Defined as exactly `0` when `views == 0`, regardless of the other counts
/// (even absent ones). Otherwise absent if any operand is absent.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn engagement_rate(
    likes: Option<i64>,
    dislikes: Option<i64>,
    comments: Option<i64>,
    views: Option<i64>,
) -> Option<f64> {
    let views = views?;
    if views == 0 {
        return Some(0.0);
    }
    let reactions = likes? + dislikes? + comments?;
    Some(round4(reactions as f64 / views as f64 * 100.0))
}

/// Like/dislike ratio, rounded to 4 decimals: `likes` when `dislikes == 0`
/// (not infinity, not absent), otherwise `likes / dislikes`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn like_dislike_ratio(likes: Option<i64>, dislikes: Option<i64>) -> Option<f64> {
    let likes = likes?;
    let dislikes = dislikes?;
    if dislikes == 0 {
        Some(round4(likes as f64))
    } else {
        Some(round4(likes as f64 / dislikes as f64))
    }
}

/// Three-tier view-count classification, evaluated highest threshold first.
/// Absent views fall through to `"Low"`.
#[must_use]
pub fn popularity_level(views: Option<i64>) -> &'static str {
    match views {
        Some(v) if v >= HIGH_VIEWS => "High",
        Some(v) if v >= MEDIUM_VIEWS => "Medium",
        _ => "Low",
    }
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// Derive one output row from a raw input row and the category lookup.
///
/// The category join is left-preserving: an unmatched id leaves
/// `category_name` absent and keeps the row.
#[must_use]
pub fn enrich_row(row: &VideoRow, categories: &HashMap<String, String>) -> EnrichedRow {
    let trending_date = parse_trending_date(&row.trending_date);
    let publish_time = parse_publish_date(&row.publish_time);
    let views = parse_count(&row.views);
    let likes = parse_count(&row.likes);
    let dislikes = parse_count(&row.dislikes);
    let comment_count = parse_count(&row.comment_count);

    let category_id = normalize_category_id(&row.category_id);
    let category_name = categories.get(&category_id).cloned();

    EnrichedRow {
        video_id: row.video_id.clone(),
        title: row.title.clone(),
        publish_time,
        trending_date,
        channel_title: row.channel_title.clone(),
        category_id,
        category_name,
        tags: row.tags.clone(),
        views,
        likes,
        dislikes,
        comment_count,
        thumbnail_link: row.thumbnail_link.clone(),
        comments_disabled: parse_flag(&row.comments_disabled),
        ratings_disabled: parse_flag(&row.ratings_disabled),
        video_error_or_removed: parse_flag(&row.video_error_or_removed),
        description: row.description.clone(),
        days_to_trend: days_to_trend(trending_date, publish_time),
        engagement_rate: engagement_rate(likes, dislikes, comment_count, views),
        like_dislike_ratio: like_dislike_ratio(likes, dislikes),
        popularity_level: popularity_level(views).to_string(),
    }
}

/// Enrich every row. Output length always equals input length.
#[must_use]
pub fn enrich_all(rows: &[VideoRow], categories: &HashMap<String, String>) -> Vec<EnrichedRow> {
    rows.iter().map(|row| enrich_row(row, categories)).collect()
}
