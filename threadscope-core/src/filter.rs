//! Client-side post filtering.
//!
//! Each criterion is entered as free text. Text that does not start with an
//! integer leaves the criterion unset, and an unset criterion never rejects a
//! post. A post is visible only when it satisfies every criterion that is set.

use crate::types::ContentItem;
use chrono::Utc;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    MinScore,
    MinComments,
    MaxAgeDays,
}

impl std::str::FromStr for FilterField {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "score" | "upvotes" => Ok(FilterField::MinScore),
            "comments" => Ok(FilterField::MinComments),
            "age" => Ok(FilterField::MaxAgeDays),
            other => Err(crate::CoreError::InvalidInput {
                message: format!("unknown filter '{other}'"),
            }),
        }
    }
}

/// One numeric criterion: what the user typed plus the value it parsed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criterion {
    raw: String,
    value: Option<i64>,
}

impl Criterion {
    pub fn from_text(text: &str) -> Self {
        Self {
            raw: text.to_string(),
            value: parse_leading_int(text),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> Option<i64> {
        self.value
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    pub min_score: Criterion,
    pub min_comments: Criterion,
    pub max_age_days: Criterion,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: FilterField, text: &str) {
        let criterion = Criterion::from_text(text);
        match field {
            FilterField::MinScore => self.min_score = criterion,
            FilterField::MinComments => self.min_comments = criterion,
            FilterField::MaxAgeDays => self.max_age_days = criterion,
        }
    }

    pub fn get(&self, field: FilterField) -> &Criterion {
        match field {
            FilterField::MinScore => &self.min_score,
            FilterField::MinComments => &self.min_comments,
            FilterField::MaxAgeDays => &self.max_age_days,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_score.value.is_none()
            && self.min_comments.value.is_none()
            && self.max_age_days.value.is_none()
    }
}

/// Same semantics as JavaScript's `parseInt(text, 10)`: optional leading
/// whitespace and sign, then as many decimal digits as are present.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    // A digit run only fails to parse on overflow.
    let value = match rest[..digits_len].parse::<i64>() {
        Ok(magnitude) if negative => -magnitude,
        Ok(magnitude) => magnitude,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    };
    Some(value)
}

/// Evaluates the filter against the current wall clock.
pub fn passes(item: &ContentItem, filter: &FilterConfig, selected_sources: &[String]) -> bool {
    passes_at(item, filter, selected_sources, now_utc())
}

/// Evaluates the filter as of `now` (seconds since the epoch).
pub fn passes_at(
    item: &ContentItem,
    filter: &FilterConfig,
    selected_sources: &[String],
    now: f64,
) -> bool {
    if let Some(min_score) = filter.min_score.value {
        if item.score < min_score {
            return false;
        }
    }

    if let Some(min_comments) = filter.min_comments.value {
        if item.num_comments < min_comments {
            return false;
        }
    }

    if let Some(max_age) = filter.max_age_days.value {
        let age_days = (now - item.created_utc) / SECONDS_PER_DAY;
        if age_days > max_age as f64 {
            return false;
        }
    }

    selected_sources.is_empty() || selected_sources.iter().any(|s| *s == item.subreddit)
}

pub fn now_utc() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}
