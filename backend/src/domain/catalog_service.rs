//! Dog food catalog queries: text search with allergen exclusion, brand
//! listings and favorites.

use log::debug;
use shared::{DogFood, Ingredient};
use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct CatalogService;

impl CatalogService {
    pub fn new() -> Self {
        Self
    }

    /// Foods matching a search.
    ///
    /// `search_text` is trimmed and matched case-insensitively against the
    /// name and brand; an empty text matches everything. Foods containing any
    /// of the `excluded` ingredients are left out.
    pub fn filter_foods<'a>(
        &self,
        foods: &'a [DogFood],
        search_text: &str,
        excluded: &HashSet<Ingredient>,
    ) -> Vec<&'a DogFood> {
        let needle = search_text.trim().to_lowercase();

        let matches: Vec<&DogFood> = foods
            .iter()
            .filter(|food| {
                needle.is_empty()
                    || food.name.to_lowercase().contains(&needle)
                    || food
                        .brand
                        .as_deref()
                        .is_some_and(|brand| brand.to_lowercase().contains(&needle))
            })
            .filter(|food| !excluded.iter().any(|ingredient| food.contains(*ingredient)))
            .collect();

        debug!(
            "Search '{}' excluding {:?}: {} of {} foods",
            needle,
            excluded,
            matches.len(),
            foods.len()
        );
        matches
    }

    /// Distinct trimmed brand names, sorted case-insensitively
    pub fn all_brands(&self, foods: &[DogFood]) -> Vec<String> {
        let unique: BTreeSet<&str> = foods
            .iter()
            .map(DogFood::brand_display)
            .filter(|brand| !brand.is_empty())
            .collect();

        let mut brands: Vec<String> = unique.into_iter().map(str::to_string).collect();
        brands.sort_by_cached_key(|brand| brand.to_lowercase());
        brands
    }

    /// Number of foods per trimmed brand name; foods without a brand are not counted
    pub fn brand_counts(&self, foods: &[DogFood]) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for brand in foods.iter().map(DogFood::brand_display) {
            if brand.is_empty() {
                continue;
            }
            *counts.entry(brand.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Foods whose id is in `favorite_ids`, in catalog order
    pub fn favorite_foods<'a>(
        &self,
        foods: &'a [DogFood],
        favorite_ids: &HashSet<String>,
    ) -> Vec<&'a DogFood> {
        foods
            .iter()
            .filter(|food| favorite_ids.contains(food.id.as_deref().unwrap_or("")))
            .collect()
    }
}
