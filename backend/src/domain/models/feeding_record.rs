use chrono::NaiveDate;
use shared::BarColorKey;

/// One feeding period of a dog on a specific food, ready for calendar layout
#[derive(Debug, Clone, PartialEq)]
pub struct FeedingRecord {
    pub id: String,
    pub dog_food_id: String,
    pub start_date: NaiveDate,
    /// `None` while the food is still being fed
    pub end_date: Option<NaiveDate>,
    pub label: String,
    pub color_key: BarColorKey,
}

impl FeedingRecord {
    /// Id used when the upstream evaluation has none of its own
    pub fn fallback_id(dog_food_id: &str, created_at_unix_seconds: i64) -> String {
        format!("{}:{}", dog_food_id, created_at_unix_seconds)
    }

    pub fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }

    /// End date used for layout: a missing end means "through today", and no
    /// period extends past today.
    pub fn effective_end(&self, today: NaiveDate) -> NaiveDate {
        self.end_date.unwrap_or(today).min(today)
    }

    /// Closed `[start, effective end]` interval. The start may lie after the end
    /// for future-dated records; such intervals intersect nothing.
    pub fn effective_interval(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        (self.start_date, self.effective_end(today))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("Invalid {field} '{value}' on evaluation {evaluation}")]
    InvalidDate {
        evaluation: String,
        field: &'static str,
        value: String,
    },
    #[error("Dog food '{0}' not found")]
    MissingFood(String),
}
