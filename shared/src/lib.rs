use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A calendar month without a day component
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1 = January ... 12 = December
    pub month: u32,
}

impl YearMonth {
    /// Build a month, returning `None` when `month` is outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First calendar day of the month, `None` if chrono cannot represent it
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Last calendar day of the month
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.offset(1).first_day()?.pred_opt()
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month {
            2 => {
                if is_leap_year(self.year) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Move by `months` whole months (negative moves backwards)
    pub fn offset(&self, months: i32) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(months);
        let year = index.div_euclid(12).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        let month = index.rem_euclid(12) as u32 + 1;
        Self { year, month }
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    pub fn previous(&self) -> Self {
        self.offset(-1)
    }

    /// Whether `date` falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl Default for YearMonth {
    fn default() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Type of calendar day for explicit rendering logic
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CalendarDayType {
    /// Trailing day of the previous month used to align the first week
    PaddingBefore,
    /// Actual day within the displayed month
    MonthDay,
    /// Leading day of the next month used to complete the last week
    PaddingAfter,
}

/// A single cell of the month grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Day of month shown in the cell (1-31)
    pub day: u32,
    pub day_type: CalendarDayType,
    pub is_today: bool,
}

/// Bar color palette stored on an evaluation as `bar_color_key`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarColorKey {
    #[default]
    Beige,
    Blue,
    Green,
    Orange,
    Purple,
}

impl BarColorKey {
    pub const ALL: [BarColorKey; 5] = [
        BarColorKey::Beige,
        BarColorKey::Blue,
        BarColorKey::Green,
        BarColorKey::Orange,
        BarColorKey::Purple,
    ];

    /// Parse a stored key, `None` when it is not part of the palette
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == key.trim())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BarColorKey::Beige => "beige",
            BarColorKey::Blue => "blue",
            BarColorKey::Green => "green",
            BarColorKey::Orange => "orange",
            BarColorKey::Purple => "purple",
        }
    }
}

/// The part of a feeding period bar that fits inside one grid row (week)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BarSegment {
    /// Stable id of the form `{record}_r{row}_c{start}-{end}`
    pub id: String,
    /// Source record, used for tap-to-open
    pub record_id: String,
    pub row: usize,
    pub col_start: usize,
    pub col_end: usize,
    pub lane: usize,
    pub label: String,
    pub color_key: BarColorKey,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

impl BarSegment {
    /// Number of day cells this segment covers
    pub fn span_count(&self) -> usize {
        self.col_end - self.col_start + 1
    }
}

/// Pixel rectangle of a bar segment inside a month page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BarFrame {
    pub segment_id: String,
    pub record_id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Everything the UI needs to draw one month page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthLayout {
    pub month: YearMonth,
    pub title: String,
    pub days: Vec<CalendarDay>,
    pub row_count: usize,
    pub segments: Vec<BarSegment>,
}

/// The three side-by-side pages the month pager slides between
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarPages {
    pub previous: MonthLayout,
    pub current: MonthLayout,
    pub next: MonthLayout,
    pub lane_count: usize,
}

/// A review of a dog food written for one dog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub dog_id: String,
    #[serde(default)]
    pub dog_name: String,
    #[serde(default)]
    pub breed: String,
    pub dog_food_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub overall: i32,
    #[serde(default)]
    pub dog_satisfaction: i32,
    #[serde(default)]
    pub owner_satisfaction: i32,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub is_review_public: Option<bool>,
    /// Creation time (RFC 3339)
    pub timestamp: String,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    #[serde(default)]
    pub feeding_start_date: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`; absent while still feeding
    #[serde(default)]
    pub feeding_end_date: Option<String>,
    #[serde(default)]
    pub ratings: HashMap<String, i32>,
    #[serde(default)]
    pub bar_color_key: Option<String>,
    #[serde(default)]
    pub size_category: Option<String>,
}

/// Dog food catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DogFood {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub image_path: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Free-text ingredient list as printed on the package
    #[serde(default)]
    pub ingredients: Option<String>,
    /// Allergy-relevant ingredients the food contains
    #[serde(default)]
    pub allergens: Vec<Ingredient>,
}

impl DogFood {
    /// Trimmed brand name, empty when unset
    pub fn brand_display(&self) -> &str {
        self.brand.as_deref().map(str::trim).unwrap_or("")
    }

    pub fn contains(&self, ingredient: Ingredient) -> bool {
        self.allergens.contains(&ingredient)
    }
}

/// Allergy-relevant ingredients used by the search exclusion filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ingredient {
    Chicken,
    Beef,
    Pork,
    Lamb,
    Fish,
    Egg,
    Dairy,
    Wheat,
    Corn,
    Soy,
}

impl Ingredient {
    pub const ALL: [Ingredient; 10] = [
        Ingredient::Chicken,
        Ingredient::Beef,
        Ingredient::Pork,
        Ingredient::Lamb,
        Ingredient::Fish,
        Ingredient::Egg,
        Ingredient::Dairy,
        Ingredient::Wheat,
        Ingredient::Corn,
        Ingredient::Soy,
    ];
}

/// Mean scores across all evaluations of one food
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationAverage {
    pub overall: f64,
    pub dog_satisfaction: f64,
    pub owner_satisfaction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DogFoodRanking {
    pub dog_food_id: String,
    pub dog_food: DogFood,
    pub average_rating: f64,
    pub review_count: usize,
}

/// Review block shown on a food's detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub dog_food_id: String,
    pub average: Option<EvaluationAverage>,
    pub total_count: usize,
    pub top_reviews: Vec<Evaluation>,
}
