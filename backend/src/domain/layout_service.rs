//! Calendar layout service.
//!
//! Combines the day grid, lane assignment and segment decomposition into the
//! view models the calendar page renders, and derives bar rectangles for a
//! measured page size.

use chrono::NaiveDate;
use log::info;
use shared::{BarFrame, CalendarPages, MonthLayout, YearMonth};

use super::calendar::CalendarService;
use super::lanes::{assign_lanes, LaneAssignment};
use super::models::FeedingRecord;
use super::segments::decompose_segments;
use crate::config::CalendarConfig;

#[derive(Debug, Clone)]
pub struct CalendarLayoutService {
    config: CalendarConfig,
    calendar_service: CalendarService,
}

impl CalendarLayoutService {
    pub fn new(config: CalendarConfig) -> Self {
        Self {
            config,
            calendar_service: CalendarService::new(),
        }
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Lay out a single month page using a precomputed lane assignment
    pub fn layout_month(
        &self,
        month: YearMonth,
        records: &[FeedingRecord],
        lanes: &LaneAssignment,
        today: NaiveDate,
    ) -> MonthLayout {
        let grid = self.calendar_service.day_grid(month);
        let segments = decompose_segments(&grid, records, lanes, today);

        MonthLayout {
            month,
            title: self.calendar_service.month_title(month),
            days: self.calendar_service.calendar_days(&grid, today),
            row_count: grid.row_count(),
            segments,
        }
    }

    /// Lay out the previous, displayed and next month pages.
    ///
    /// Lanes are assigned once over all records so a record keeps its lane
    /// while sliding between pages.
    pub fn layout_pages(
        &self,
        displayed: YearMonth,
        records: &[FeedingRecord],
        today: NaiveDate,
    ) -> CalendarPages {
        let lanes = assign_lanes(records, today);
        let pages = CalendarPages {
            previous: self.layout_month(displayed.previous(), records, &lanes, today),
            current: self.layout_month(displayed, records, &lanes, today),
            next: self.layout_month(displayed.next(), records, &lanes, today),
            lane_count: lanes.lane_count(),
        };
        info!(
            "🗓️ Calendar pages around {}: {} records, {} lanes, {} segments shown",
            displayed,
            records.len(),
            pages.lane_count,
            pages.current.segments.len()
        );
        pages
    }

    /// Rectangles of each bar segment for a page of the given size
    pub fn bar_frames(
        &self,
        layout: &MonthLayout,
        page_width: f64,
        page_height: f64,
    ) -> Vec<BarFrame> {
        if layout.row_count == 0 || page_width <= 0.0 || page_height <= 0.0 {
            return Vec::new();
        }
        let cell_width = page_width / 7.0;
        let cell_height = page_height / layout.row_count as f64;
        let bar_height = self.config.bar_height;

        layout
            .segments
            .iter()
            .map(|segment| BarFrame {
                segment_id: segment.id.clone(),
                record_id: segment.record_id.clone(),
                x: segment.col_start as f64 * cell_width,
                y: segment.row as f64 * cell_height
                    + self.config.bar_top_inset
                    + segment.lane as f64 * (bar_height + self.config.lane_spacing),
                width: segment.span_count() as f64 * cell_width,
                height: bar_height,
            })
            .collect()
    }

    /// Record under a tap at `(x, y)`, topmost frame first
    pub fn record_at<'a>(&self, frames: &'a [BarFrame], x: f64, y: f64) -> Option<&'a str> {
        frames
            .iter()
            .rev()
            .find(|frame| {
                let inside_x = x >= frame.x && x < frame.x + frame.width;
                inside_x && y >= frame.y && y < frame.y + frame.height
            })
            .map(|frame| frame.record_id.as_str())
    }
}

impl Default for CalendarLayoutService {
    fn default() -> Self {
        Self::new(CalendarConfig::default())
    }
}
