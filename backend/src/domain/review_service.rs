//! Review aggregation: per-food averages, rankings and top reviews.
//!
//! These operate on evaluations already fetched by the caller.

use log::{debug, warn};
use shared::{DogFood, DogFoodRanking, Evaluation, EvaluationAverage, ReviewSummary};
use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;

use super::dates::parse_timestamp;

/// Number of reviews shown on a food's detail page
pub const DEFAULT_TOP_REVIEW_LIMIT: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct ReviewService;

impl ReviewService {
    pub fn new() -> Self {
        Self
    }

    /// Mean scores over every evaluation of `dog_food_id`, `None` without any
    pub fn average_for_food(
        &self,
        evaluations: &[Evaluation],
        dog_food_id: &str,
    ) -> Option<EvaluationAverage> {
        let matching: Vec<&Evaluation> = evaluations
            .iter()
            .filter(|evaluation| evaluation.dog_food_id == dog_food_id)
            .collect();
        if matching.is_empty() {
            return None;
        }

        let count = matching.len() as f64;
        let mean = |score: fn(&Evaluation) -> i32| {
            matching.iter().map(|evaluation| f64::from(score(evaluation))).sum::<f64>() / count
        };
        Some(EvaluationAverage {
            overall: mean(|e| e.overall),
            dog_satisfaction: mean(|e| e.dog_satisfaction),
            owner_satisfaction: mean(|e| e.owner_satisfaction),
        })
    }

    /// Foods ranked by mean overall rating, best first.
    ///
    /// With a `size_category`, only evaluations for that dog size count.
    /// Evaluations without a food id and foods missing from `foods` are left
    /// out. Equal averages are ordered by food name.
    pub fn rank_foods(
        &self,
        evaluations: &[Evaluation],
        foods: &[DogFood],
        size_category: Option<&str>,
    ) -> Vec<DogFoodRanking> {
        let foods_by_id: HashMap<&str, &DogFood> = foods
            .iter()
            .filter_map(|food| food.id.as_deref().map(|id| (id, food)))
            .collect();

        let mut ratings_by_food: HashMap<&str, Vec<i32>> = HashMap::new();
        for evaluation in evaluations {
            if evaluation.dog_food_id.is_empty() {
                continue;
            }
            if let Some(size) = size_category {
                if evaluation.size_category.as_deref() != Some(size) {
                    continue;
                }
            }
            ratings_by_food
                .entry(evaluation.dog_food_id.as_str())
                .or_default()
                .push(evaluation.overall);
        }

        let mut rankings: Vec<DogFoodRanking> = ratings_by_food
            .into_iter()
            .filter_map(|(dog_food_id, ratings)| {
                let Some(food) = foods_by_id.get(dog_food_id) else {
                    warn!("⚠️ no dogFood found for ID: {}", dog_food_id);
                    return None;
                };
                let total: f64 = ratings.iter().map(|r| f64::from(*r)).sum();
                let average_rating = total / ratings.len() as f64;
                Some(DogFoodRanking {
                    dog_food_id: dog_food_id.to_string(),
                    dog_food: (*food).clone(),
                    average_rating,
                    review_count: ratings.len(),
                })
            })
            .collect();

        rankings.sort_by(|a, b| {
            b.average_rating
                .partial_cmp(&a.average_rating)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.dog_food.name.cmp(&b.dog_food.name))
        });
        debug!("Ranked {} foods (size filter: {:?})", rankings.len(), size_category);
        rankings
    }

    /// Newest evaluations of a food, at most `limit`
    pub fn top_reviews(
        &self,
        evaluations: &[Evaluation],
        dog_food_id: &str,
        limit: usize,
    ) -> Vec<Evaluation> {
        let mut matching: Vec<&Evaluation> = evaluations
            .iter()
            .filter(|evaluation| evaluation.dog_food_id == dog_food_id)
            .collect();
        // unparseable timestamps sort last
        matching.sort_by_key(|evaluation| Reverse(parse_timestamp(&evaluation.timestamp)));
        matching.into_iter().take(limit).cloned().collect()
    }

    pub fn review_count(&self, evaluations: &[Evaluation], dog_food_id: &str) -> usize {
        evaluations
            .iter()
            .filter(|evaluation| evaluation.dog_food_id == dog_food_id)
            .count()
    }

    /// Average, count and newest reviews for a food's detail page
    pub fn review_summary(
        &self,
        evaluations: &[Evaluation],
        dog_food_id: &str,
        limit: usize,
    ) -> ReviewSummary {
        ReviewSummary {
            dog_food_id: dog_food_id.to_string(),
            average: self.average_for_food(evaluations, dog_food_id),
            total_count: self.review_count(evaluations, dog_food_id),
            top_reviews: self.top_reviews(evaluations, dog_food_id, limit),
        }
    }
}
