use log::warn;
use shared::{BarColorKey, DogFood, Evaluation};
use std::collections::HashMap;

use crate::domain::dates::{format_period, parse_calendar_day, parse_timestamp};
use crate::domain::models::{EvaluationWithFood, FeedingRecord, RecordError};

/// Maps evaluations and their foods onto calendar feeding records
pub struct FeedingRecordMapper;

impl FeedingRecordMapper {
    /// Join evaluations to the foods they review by `dog_food_id`.
    ///
    /// Evaluations whose food is missing from `foods` are dropped, as are
    /// evaluations without an id whose timestamp cannot be parsed. The result
    /// is ordered by evaluation timestamp, oldest first.
    pub fn join_with_foods(
        evaluations: Vec<Evaluation>,
        foods: &[DogFood],
    ) -> Vec<EvaluationWithFood> {
        let foods_by_id: HashMap<&str, &DogFood> = foods
            .iter()
            .filter_map(|food| food.id.as_deref().map(|id| (id, food)))
            .collect();

        let mut joined: Vec<EvaluationWithFood> = evaluations
            .into_iter()
            .filter_map(|evaluation| {
                let joined = Self::find_food(&foods_by_id, &evaluation.dog_food_id)
                    .and_then(|food| EvaluationWithFood::new(evaluation, food.clone()));
                match joined {
                    Ok(item) => Some(item),
                    Err(e) => {
                        warn!("⚠️ {}, dropping evaluation", e);
                        None
                    }
                }
            })
            .collect();

        joined.sort_by_key(|item| parse_timestamp(&item.evaluation.timestamp));
        joined
    }

    fn find_food<'a>(
        foods_by_id: &HashMap<&str, &'a DogFood>,
        dog_food_id: &str,
    ) -> Result<&'a DogFood, RecordError> {
        foods_by_id
            .get(dog_food_id)
            .copied()
            .ok_or_else(|| RecordError::MissingFood(dog_food_id.to_string()))
    }

    /// Convert one joined evaluation into a feeding record
    pub fn to_domain(
        item: &EvaluationWithFood,
        default_color: BarColorKey,
    ) -> Result<FeedingRecord, RecordError> {
        let evaluation = &item.evaluation;
        let invalid = |field: &'static str, value: &str| RecordError::InvalidDate {
            evaluation: item.id.clone(),
            field,
            value: value.to_string(),
        };

        let start_date = match evaluation.feeding_start_date.as_deref() {
            Some(start) => {
                parse_calendar_day(start).ok_or_else(|| invalid("feeding_start_date", start))?
            }
            None => parse_calendar_day(&evaluation.timestamp)
                .ok_or_else(|| invalid("timestamp", &evaluation.timestamp))?,
        };
        let end_date = match evaluation.feeding_end_date.as_deref() {
            Some(end) => {
                Some(parse_calendar_day(end).ok_or_else(|| invalid("feeding_end_date", end))?)
            }
            None => None,
        };

        let color_key = evaluation
            .bar_color_key
            .as_deref()
            .and_then(BarColorKey::parse)
            .unwrap_or(default_color);

        Ok(FeedingRecord {
            id: item.id.clone(),
            dog_food_id: evaluation.dog_food_id.clone(),
            start_date,
            end_date,
            label: format!("{} {}", item.dog_food.name, format_period(start_date, end_date)),
            color_key,
        })
    }

    /// Convert joined evaluations, leaving out any with malformed dates
    pub fn to_domain_list(
        items: &[EvaluationWithFood],
        default_color: BarColorKey,
    ) -> Vec<FeedingRecord> {
        items
            .iter()
            .filter_map(|item| match Self::to_domain(item, default_color) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Excluding evaluation from calendar: {}", e);
                    None
                }
            })
            .collect()
    }
}
