//! Splits feeding periods into week-local bar segments.

use chrono::NaiveDate;
use log::{debug, warn};
use shared::BarSegment;
use std::collections::HashSet;

use super::calendar::DayGrid;
use super::lanes::LaneAssignment;
use super::models::FeedingRecord;

/// Decompose each record into one segment per grid row it touches.
///
/// The record's effective interval is clamped to the grid's visible range;
/// records entirely outside the grid produce nothing. A segment never crosses
/// a row, and every segment of a record carries that record's lane. Only the
/// first record with a given id is drawn.
pub fn decompose_segments(
    grid: &DayGrid,
    records: &[FeedingRecord],
    lanes: &LaneAssignment,
    today: NaiveDate,
) -> Vec<BarSegment> {
    let (Some(visible_start), Some(visible_end)) = (grid.first(), grid.last()) else {
        return Vec::new();
    };
    let index_by_day = grid.index_by_day();
    let days = grid.days();

    let mut result = Vec::new();
    let mut seen = HashSet::with_capacity(records.len());

    for record in records {
        if !seen.insert(record.id.as_str()) {
            warn!("⚠️ duplicate record id {}, not drawing it twice", record.id);
            continue;
        }
        let Some(lane) = lanes.get(&record.id) else {
            warn!("Record {} has no lane assignment, skipping", record.id);
            continue;
        };

        let (start, end) = record.effective_interval(today);
        if end < visible_start || start > visible_end {
            continue;
        }

        let clamped_start = start.max(visible_start);
        let clamped_end = end.min(visible_end);
        let (Some(&start_index), Some(&end_index)) =
            (index_by_day.get(&clamped_start), index_by_day.get(&clamped_end))
        else {
            continue;
        };

        let mut current = start_index;
        while current <= end_index {
            let row = current / 7;
            let row_end_index = end_index.min(row * 7 + 6);
            let col_start = current % 7;
            let col_end = row_end_index % 7;

            result.push(BarSegment {
                id: format!("{}_r{}_c{}-{}", record.id, row, col_start, col_end),
                record_id: record.id.clone(),
                row,
                col_start,
                col_end,
                lane,
                label: record.label.clone(),
                color_key: record.color_key,
                first_day: days[current],
                last_day: days[row_end_index],
            });

            current = row_end_index + 1;
        }
    }

    debug!(
        "Decomposed {} records into {} segments for {}",
        records.len(),
        result.len(),
        grid.month()
    );
    result
}
