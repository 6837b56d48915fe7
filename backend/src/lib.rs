//! # Dogfood Calendar Backend
//!
//! Synchronous services behind the feeding calendar and the food review
//! screens. Data arrives already fetched (evaluations and foods); this crate
//! turns it into calendar layouts, paging transitions and review aggregates.
//!
//! - `domain`: calendar grid, lanes, segments, paging, review and catalog logic
//! - `io`: mapping of fetched evaluations onto domain records
//! - `config`: YAML tunables for paging and bar geometry

use anyhow::Result;
use chrono::NaiveDate;
use log::info;
use shared::{CalendarPages, DogFood, Evaluation, YearMonth};

pub mod config;
pub mod domain;
pub mod io;

pub use config::{CalendarConfig, ConfigError};
pub use domain::models::{EvaluationWithFood, FeedingRecord, RecordError};

use io::mappers::FeedingRecordMapper;

/// Main backend struct that orchestrates all services
pub struct Backend {
    pub calendar_service: domain::CalendarService,
    pub layout_service: domain::CalendarLayoutService,
    pub review_service: domain::ReviewService,
    pub catalog_service: domain::CatalogService,
    paging_settings: domain::PagingSettings,
    config: CalendarConfig,
}

impl Backend {
    pub fn new(config: CalendarConfig) -> Self {
        Self {
            calendar_service: domain::CalendarService::new(),
            layout_service: domain::CalendarLayoutService::new(config.clone()),
            review_service: domain::ReviewService::new(),
            catalog_service: domain::CatalogService::new(),
            paging_settings: config.paging_settings(),
            config,
        }
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Feeding records for a dog's evaluations, oldest first.
    ///
    /// Evaluations for unknown foods or with malformed dates are left out.
    pub fn feeding_records(
        &self,
        evaluations: Vec<Evaluation>,
        foods: &[DogFood],
    ) -> Vec<FeedingRecord> {
        let joined = FeedingRecordMapper::join_with_foods(evaluations, foods);
        FeedingRecordMapper::to_domain_list(&joined, self.config.default_color_key)
    }

    /// Previous, displayed and next month pages for a dog's evaluations
    pub fn calendar_pages(
        &self,
        evaluations: Vec<Evaluation>,
        foods: &[DogFood],
        displayed: YearMonth,
        today: NaiveDate,
    ) -> CalendarPages {
        let records = self.feeding_records(evaluations, foods);
        self.layout_service.layout_pages(displayed, &records, today)
    }

    /// Advance the month pager with the configured threshold and timing
    pub fn handle_paging_event(
        &self,
        state: domain::PagingState,
        event: domain::PagingEvent,
    ) -> (domain::PagingState, Vec<domain::PagingEffect>) {
        domain::PagingReducer::reduce(state, event, &self.paging_settings)
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::new(CalendarConfig::default())
    }
}

/// Build a backend, validating the supplied config first
pub fn initialize_backend(config: CalendarConfig) -> Result<Backend> {
    config.validate()?;
    info!(
        "🚀 Backend initialized (commit threshold {}, default color {})",
        config.commit_threshold_fraction,
        config.default_color_key.as_str()
    );
    Ok(Backend::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn food(id: &str, name: &str) -> DogFood {
        DogFood {
            id: Some(id.to_string()),
            name: name.to_string(),
            brand: None,
            image_path: String::new(),
            description: String::new(),
            summary: String::new(),
            keywords: Vec::new(),
            ingredients: None,
            allergens: Vec::new(),
        }
    }

    fn evaluation(id: &str, food_id: &str, start: &str, end: Option<&str>) -> Evaluation {
        Evaluation {
            id: Some(id.to_string()),
            dog_id: "dog-1".to_string(),
            dog_name: "Kuro".to_string(),
            breed: "Shiba".to_string(),
            dog_food_id: food_id.to_string(),
            user_id: "user-1".to_string(),
            overall: 4,
            dog_satisfaction: 4,
            owner_satisfaction: 4,
            comment: None,
            is_review_public: None,
            timestamp: format!("{}T09:00:00+09:00", start),
            feeding_start_date: Some(start.to_string()),
            feeding_end_date: end.map(str::to_string),
            ratings: HashMap::new(),
            bar_color_key: None,
            size_category: None,
        }
    }

    #[test]
    fn test_initialize_backend_rejects_invalid_config() {
        let config = CalendarConfig {
            commit_threshold_fraction: 0.0,
            ..CalendarConfig::default()
        };
        assert!(initialize_backend(config).is_err());
        assert!(initialize_backend(CalendarConfig::default()).is_ok());
    }

    #[test]
    fn test_calendar_pages_from_evaluations() {
        let backend = Backend::default();
        let foods = vec![food("f1", "Chicken Mix")];
        let evaluations = vec![
            evaluation("e1", "f1", "2024-03-01", Some("2024-03-10")),
            evaluation("e2", "f1", "2024-03-05", Some("2024-03-08")),
            evaluation("orphan", "unknown", "2024-03-02", None),
        ];

        let pages = backend.calendar_pages(
            evaluations,
            &foods,
            YearMonth::new(2024, 3).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
        );
        assert_eq!(pages.lane_count, 2);
        assert!(pages.current.segments.iter().all(|s| s.record_id != "orphan"));
        let labels: Vec<_> = pages.current.segments.iter().map(|s| s.label.as_str()).collect();
        assert!(labels.contains(&"Chicken Mix 3/1~3/10"));
    }

    #[test]
    fn test_handle_paging_event_uses_configured_threshold() {
        let config = CalendarConfig {
            commit_threshold_fraction: 0.5,
            ..CalendarConfig::default()
        };
        let backend = Backend::new(config);
        let march = YearMonth::new(2024, 3).unwrap();
        let (state, _) = backend.handle_paging_event(
            domain::PagingState::new(march),
            domain::PagingEvent::PageWidthChanged(400.0),
        );
        let (state, _) = backend.handle_paging_event(state, domain::PagingEvent::DragStarted);

        // 150 is past the default quarter threshold but not past half the page
        let released = domain::PagingEvent::DragEnded { translation: -150.0 };
        let (state, effects) = backend.handle_paging_event(state, released);
        assert!(!state.is_committing());
        assert_eq!(state.displayed_month, march);
        assert!(effects
            .iter()
            .all(|effect| !matches!(effect, domain::PagingEffect::MonthChanged(_))));
    }
}
