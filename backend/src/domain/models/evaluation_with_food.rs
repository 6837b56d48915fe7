use shared::{DogFood, Evaluation};

use super::feeding_record::{FeedingRecord, RecordError};
use crate::domain::dates::parse_timestamp;

/// An evaluation joined with the dog food it reviews
#[derive(Debug, Clone)]
pub struct EvaluationWithFood {
    /// Stable id: the evaluation's own id, or `{dog_food_id}:{unix seconds}`
    pub id: String,
    pub evaluation: Evaluation,
    pub dog_food: DogFood,
}

impl EvaluationWithFood {
    /// Join an evaluation with its food.
    ///
    /// Without an id of its own the evaluation is keyed by its timestamp, so
    /// an unparseable timestamp is rejected rather than collapsing onto a
    /// shared id.
    pub fn new(evaluation: Evaluation, dog_food: DogFood) -> Result<Self, RecordError> {
        let id = match evaluation.id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                let created_at = parse_timestamp(&evaluation.timestamp).ok_or_else(|| {
                    RecordError::InvalidDate {
                        evaluation: format!("{}:?", evaluation.dog_food_id),
                        field: "timestamp",
                        value: evaluation.timestamp.clone(),
                    }
                })?;
                FeedingRecord::fallback_id(&evaluation.dog_food_id, created_at.timestamp())
            }
        };
        Ok(Self {
            id,
            evaluation,
            dog_food,
        })
    }
}

impl PartialEq for EvaluationWithFood {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
