//! Month paging state machine.
//!
//! The calendar shows three pages side by side (previous, displayed, next)
//! and slides between them. Paging is driven by discrete events fed through
//! [`PagingReducer::reduce`], which returns the next state plus the effects
//! the host must carry out (start an animation, schedule the commit timer).
//!
//! A drag or button press arriving while a commit is in flight is ignored;
//! the pending commit always completes first.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use shared::YearMonth;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideDirection {
    /// Towards the next month (content slides left)
    Forward,
    /// Towards the previous month (content slides right)
    Backward,
}

impl SlideDirection {
    pub fn month_delta(self) -> i32 {
        match self {
            SlideDirection::Forward => 1,
            SlideDirection::Backward => -1,
        }
    }

    /// Offset the page strip ends at once the slide completes
    fn target_offset(self, page_width: f64) -> f64 {
        match self {
            SlideDirection::Forward => -page_width,
            SlideDirection::Backward => page_width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PagingPhase {
    Idle,
    Dragging,
    Committing(SlideDirection),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PagingState {
    pub displayed_month: YearMonth,
    /// Horizontal offset of the page strip relative to the centered page
    pub drag_offset: f64,
    pub phase: PagingPhase,
    /// Measured container width; 0 until the first layout pass
    pub page_width: f64,
}

impl PagingState {
    pub fn new(displayed_month: YearMonth) -> Self {
        Self {
            displayed_month,
            drag_offset: 0.0,
            phase: PagingPhase::Idle,
            page_width: 0.0,
        }
    }

    /// Same state shown `months` months later (earlier when negative)
    pub fn move_month(self, months: i32) -> Self {
        Self {
            displayed_month: self.displayed_month.offset(months),
            ..self
        }
    }

    pub fn is_committing(&self) -> bool {
        matches!(self.phase, PagingPhase::Committing(_))
    }
}

impl Default for PagingState {
    fn default() -> Self {
        Self::new(YearMonth::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PagingEvent {
    PageWidthChanged(f64),
    DragStarted,
    /// Raw horizontal translation since the drag began
    DragChanged { translation: f64 },
    DragEnded { translation: f64 },
    NextTapped,
    PreviousTapped,
    /// The slide scheduled by [`PagingEffect::ScheduleCommit`] has elapsed
    AnimationFinished,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PagingEffect {
    AnimateOffset { target: f64, duration: Duration },
    /// Deliver [`PagingEvent::AnimationFinished`] after `after`
    ScheduleCommit { after: Duration },
    /// Layouts for the new month must be recomputed
    MonthChanged(YearMonth),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagingSettings {
    /// Fraction of the page width a drag must exceed to change month
    pub commit_threshold_fraction: f64,
    pub animation_duration: Duration,
}

impl Default for PagingSettings {
    fn default() -> Self {
        Self {
            commit_threshold_fraction: 0.25,
            animation_duration: Duration::from_millis(250),
        }
    }
}

pub struct PagingReducer;

impl PagingReducer {
    pub fn reduce(
        state: PagingState,
        event: PagingEvent,
        settings: &PagingSettings,
    ) -> (PagingState, Vec<PagingEffect>) {
        let passes_through_commit = matches!(
            event,
            PagingEvent::AnimationFinished | PagingEvent::PageWidthChanged(_)
        );
        if state.is_committing() && !passes_through_commit {
            debug!("Ignoring {:?} while a month change is in flight", event);
            return (state, Vec::new());
        }

        match event {
            PagingEvent::PageWidthChanged(width) => {
                let next = PagingState {
                    page_width: width.max(0.0),
                    ..state
                };
                (next, Vec::new())
            }
            PagingEvent::DragStarted => {
                let next = PagingState {
                    phase: PagingPhase::Dragging,
                    drag_offset: 0.0,
                    ..state
                };
                (next, Vec::new())
            }
            PagingEvent::DragChanged { translation } => {
                let next = PagingState {
                    phase: PagingPhase::Dragging,
                    drag_offset: translation,
                    ..state
                };
                (next, Vec::new())
            }
            PagingEvent::DragEnded { translation } => {
                let threshold = state.page_width * settings.commit_threshold_fraction;
                if translation < -threshold {
                    Self::commit(state, SlideDirection::Forward, settings)
                } else if translation > threshold {
                    Self::commit(state, SlideDirection::Backward, settings)
                } else {
                    Self::snap_back(state, settings)
                }
            }
            PagingEvent::NextTapped => Self::commit(state, SlideDirection::Forward, settings),
            PagingEvent::PreviousTapped => Self::commit(state, SlideDirection::Backward, settings),
            PagingEvent::AnimationFinished => match state.phase {
                PagingPhase::Committing(direction) => Self::finish(state, direction),
                _ => (state, Vec::new()),
            },
        }
    }

    fn commit(
        state: PagingState,
        direction: SlideDirection,
        settings: &PagingSettings,
    ) -> (PagingState, Vec<PagingEffect>) {
        // width not measured yet: nothing to animate
        if state.page_width <= 0.0 {
            return Self::finish(state, direction);
        }

        let target = direction.target_offset(state.page_width);
        let next = PagingState {
            phase: PagingPhase::Committing(direction),
            drag_offset: target,
            ..state
        };
        let effects = vec![
            PagingEffect::AnimateOffset {
                target,
                duration: settings.animation_duration,
            },
            PagingEffect::ScheduleCommit {
                after: settings.animation_duration,
            },
        ];
        (next, effects)
    }

    fn snap_back(
        state: PagingState,
        settings: &PagingSettings,
    ) -> (PagingState, Vec<PagingEffect>) {
        let next = PagingState {
            phase: PagingPhase::Idle,
            drag_offset: 0.0,
            ..state
        };
        let effects = vec![PagingEffect::AnimateOffset {
            target: 0.0,
            duration: settings.animation_duration,
        }];
        (next, effects)
    }

    fn finish(state: PagingState, direction: SlideDirection) -> (PagingState, Vec<PagingEffect>) {
        let moved = state.move_month(direction.month_delta());
        info!(
            "📅 Calendar moved from {} to {}",
            state.displayed_month, moved.displayed_month
        );
        let next = PagingState {
            phase: PagingPhase::Idle,
            drag_offset: 0.0,
            ..moved
        };
        (next, vec![PagingEffect::MonthChanged(next.displayed_month)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march() -> YearMonth {
        YearMonth::new(2024, 3).unwrap()
    }

    fn measured(width: f64) -> PagingState {
        let settings = PagingSettings::default();
        let (state, _) = PagingReducer::reduce(
            PagingState::new(march()),
            PagingEvent::PageWidthChanged(width),
            &settings,
        );
        state
    }

    fn run(mut state: PagingState, events: &[PagingEvent]) -> (PagingState, Vec<PagingEffect>) {
        let settings = PagingSettings::default();
        let mut all_effects = Vec::new();
        for event in events {
            let (next, effects) = PagingReducer::reduce(state, *event, &settings);
            state = next;
            all_effects.extend(effects);
        }
        (state, all_effects)
    }

    #[test]
    fn test_move_month_round_trip() {
        let state = PagingState::new(march());
        assert_eq!(state.move_month(1).move_month(-1), state);
        assert_eq!(state.move_month(10).displayed_month, YearMonth::new(2025, 1).unwrap());
    }

    #[test]
    fn test_drag_tracks_translation() {
        let (state, effects) = run(
            measured(400.0),
            &[PagingEvent::DragStarted, PagingEvent::DragChanged { translation: -42.0 }],
        );
        assert_eq!(state.phase, PagingPhase::Dragging);
        assert_eq!(state.drag_offset, -42.0);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_drag_past_threshold_commits_forward() {
        let (state, effects) = run(
            measured(400.0),
            &[
                PagingEvent::DragStarted,
                PagingEvent::DragChanged { translation: -150.0 },
                PagingEvent::DragEnded { translation: -150.0 },
            ],
        );
        assert_eq!(state.phase, PagingPhase::Committing(SlideDirection::Forward));
        assert_eq!(state.drag_offset, -400.0);
        assert_eq!(state.displayed_month, march());
        assert_eq!(
            effects,
            vec![
                PagingEffect::AnimateOffset {
                    target: -400.0,
                    duration: Duration::from_millis(250),
                },
                PagingEffect::ScheduleCommit { after: Duration::from_millis(250) },
            ]
        );

        let (state, effects) = run(state, &[PagingEvent::AnimationFinished]);
        assert_eq!(state.phase, PagingPhase::Idle);
        assert_eq!(state.drag_offset, 0.0);
        assert_eq!(state.displayed_month, YearMonth::new(2024, 4).unwrap());
        assert_eq!(effects, vec![PagingEffect::MonthChanged(YearMonth::new(2024, 4).unwrap())]);
    }

    #[test]
    fn test_drag_past_threshold_commits_backward() {
        let (state, _) = run(
            measured(400.0),
            &[
                PagingEvent::DragStarted,
                PagingEvent::DragEnded { translation: 101.0 },
                PagingEvent::AnimationFinished,
            ],
        );
        assert_eq!(state.displayed_month, YearMonth::new(2024, 2).unwrap());
        assert_eq!(state.phase, PagingPhase::Idle);
    }

    #[test]
    fn test_short_drag_snaps_back() {
        let (state, effects) = run(
            measured(400.0),
            &[
                PagingEvent::DragStarted,
                PagingEvent::DragChanged { translation: -100.0 },
                PagingEvent::DragEnded { translation: -100.0 },
            ],
        );
        // exactly at the threshold does not commit
        assert_eq!(state.phase, PagingPhase::Idle);
        assert_eq!(state.drag_offset, 0.0);
        assert_eq!(state.displayed_month, march());
        assert_eq!(
            effects,
            vec![PagingEffect::AnimateOffset { target: 0.0, duration: Duration::from_millis(250) }]
        );
    }

    #[test]
    fn test_buttons_use_full_width_slide() {
        let (state, effects) = run(measured(320.0), &[PagingEvent::PreviousTapped]);
        assert_eq!(state.phase, PagingPhase::Committing(SlideDirection::Backward));
        assert_eq!(state.drag_offset, 320.0);
        assert_eq!(effects.len(), 2);

        let (state, _) = run(
            state,
            &[
                PagingEvent::AnimationFinished,
                PagingEvent::NextTapped,
                PagingEvent::AnimationFinished,
            ],
        );
        assert_eq!(state.displayed_month, march());
    }

    #[test]
    fn test_unmeasured_width_changes_month_immediately() {
        let (state, effects) = run(PagingState::new(march()), &[PagingEvent::NextTapped]);
        assert_eq!(state.phase, PagingPhase::Idle);
        assert_eq!(state.drag_offset, 0.0);
        assert_eq!(state.displayed_month, YearMonth::new(2024, 4).unwrap());
        assert_eq!(effects, vec![PagingEffect::MonthChanged(YearMonth::new(2024, 4).unwrap())]);
    }

    #[test]
    fn test_events_during_commit_are_ignored() {
        let (committing, _) = run(measured(400.0), &[PagingEvent::NextTapped]);
        let (state, effects) = run(
            committing,
            &[
                PagingEvent::DragStarted,
                PagingEvent::DragChanged { translation: 30.0 },
                PagingEvent::PreviousTapped,
            ],
        );
        assert_eq!(state, committing);
        assert!(effects.is_empty());

        let (state, _) = run(state, &[PagingEvent::AnimationFinished]);
        assert_eq!(state.displayed_month, YearMonth::new(2024, 4).unwrap());
    }

    #[test]
    fn test_stray_animation_finished_is_a_no_op() {
        let idle = measured(400.0);
        let (state, effects) = run(idle, &[PagingEvent::AnimationFinished]);
        assert_eq!(state, idle);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_year_boundary() {
        let december = PagingState::new(YearMonth::new(2024, 12).unwrap());
        let (state, _) = run(december, &[PagingEvent::NextTapped]);
        assert_eq!(state.displayed_month, YearMonth::new(2025, 1).unwrap());
    }
}
