//! # Domain Layer
//!
//! Calendar layout and review logic for the feeding calendar. Everything here
//! is synchronous and free of storage concerns: callers hand in evaluations
//! and foods, and get back layouts, paging transitions or aggregates.
//!
//! ## Layout pipeline
//!
//! - [`calendar`] builds the Sunday-first day grid for a month
//! - [`lanes`] assigns every feeding record a vertical lane
//! - [`segments`] splits records into per-week bar segments
//! - [`layout_service`] ties the three together for the three visible pages
//!
//! [`paging`] drives month navigation as a pure reducer,
//! [`review_service`] aggregates ratings for food detail and ranking views,
//! and [`catalog_service`] answers search, brand and favorites queries.

pub mod calendar;
pub mod catalog_service;
pub mod dates;
pub mod lanes;
pub mod layout_service;
pub mod models;
pub mod paging;
pub mod review_service;
pub mod segments;

pub use calendar::{generate_day_grid, CalendarError, CalendarService, DayGrid};
pub use catalog_service::CatalogService;
pub use lanes::{assign_lanes, LaneAssignment};
pub use layout_service::CalendarLayoutService;
pub use paging::{
    PagingEffect, PagingEvent, PagingPhase, PagingReducer, PagingSettings, PagingState,
    SlideDirection,
};
pub use review_service::ReviewService;
pub use segments::decompose_segments;
