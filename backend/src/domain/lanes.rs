//! Lane assignment for feeding period bars.
//!
//! Bars whose periods overlap are stacked on separate horizontal lanes inside
//! each day cell. Records are visited by start date and each takes the lowest
//! lane that is already free, so the result is greedy first-fit rather than a
//! globally minimal coloring.

use chrono::NaiveDate;
use log::{debug, warn};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::models::FeedingRecord;

/// Record id -> lane index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LaneAssignment {
    lanes: HashMap<String, usize>,
    lane_count: usize,
}

impl LaneAssignment {
    pub fn get(&self, record_id: &str) -> Option<usize> {
        self.lanes.get(record_id).copied()
    }

    /// Number of records with a lane
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Number of distinct lanes in use
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.lanes.iter().map(|(id, lane)| (id.as_str(), *lane))
    }
}

/// Assign every record a lane so that overlapping periods never share one.
///
/// Periods are the closed `[start, effective end]` intervals; a lane is free
/// for a record only when its last end date is strictly before the record's
/// start, so periods that merely touch still go to different lanes. Equal
/// start dates keep their input order.
///
/// Record ids must be unique. A repeated id is skipped with a warning and
/// only its first occurrence in `records` gets a lane.
pub fn assign_lanes(records: &[FeedingRecord], today: NaiveDate) -> LaneAssignment {
    let mut seen = HashSet::with_capacity(records.len());
    let mut ranges: Vec<(&str, NaiveDate, NaiveDate)> = records
        .iter()
        .filter(|record| {
            let first = seen.insert(record.id.as_str());
            if !first {
                warn!("⚠️ duplicate record id {}, skipping lane assignment", record.id);
            }
            first
        })
        .map(|record| {
            let (start, end) = record.effective_interval(today);
            (record.id.as_str(), start, end)
        })
        .collect();
    ranges.sort_by_key(|(_, start, _)| *start);

    // last occupied day of each lane
    let mut lane_end_dates: Vec<NaiveDate> = Vec::new();
    let mut lanes = HashMap::with_capacity(ranges.len());

    for (id, start, end) in ranges {
        let lane = match lane_end_dates.iter().position(|lane_end| *lane_end < start) {
            Some(lane) => {
                lane_end_dates[lane] = end;
                lane
            }
            None => {
                lane_end_dates.push(end);
                lane_end_dates.len() - 1
            }
        };
        debug!("Record {} ({} to {}) assigned lane {}", id, start, end, lane);
        lanes.insert(id.to_string(), lane);
    }

    LaneAssignment {
        lanes,
        lane_count: lane_end_dates.len(),
    }
}
