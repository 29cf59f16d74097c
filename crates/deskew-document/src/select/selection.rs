// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner selection state machine. The UI translates its own events into
// `PickerInput` messages; this type owns the collected points.

use deskew_core::error::{DeskewError, Result};
use deskew_core::{Corner, Point};
use tracing::{debug, info};

/// Number of corners a complete selection holds.
pub const CORNER_COUNT: usize = 4;

/// A discrete input from whatever surface the operator interacts with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickerInput {
    /// Primary button pressed at a source-image pixel coordinate.
    Click(Point),
    /// Operator gave up (Escape, or the window was closed).
    Cancel,
}

/// Where the selection is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// Still accepting clicks; holds the number collected so far (0..=3).
    Collecting(usize),
    /// Four corners collected.
    Complete,
    /// Cancelled before four corners were collected.
    Cancelled,
}

impl SelectionState {
    /// Complete and Cancelled absorb all further input.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Collecting(_))
    }
}

/// What a single input did to the selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// The point was appended as the `index`-th corner (1-based).
    Accepted { index: usize, point: Point },
    /// The input arrived after the selection reached a terminal state.
    Ignored,
    /// The selection was cancelled by this input.
    Cancelled,
}

/// Up to four picked points, in click order (LT, RT, RB, LB).
///
/// Points are stored as given: no deduplication and no bounds check.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerSelection {
    points: Vec<Point>,
    cancelled: bool,
}

impl Default for CornerSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl CornerSelection {
    pub fn new() -> Self {
        Self {
            points: Vec::with_capacity(CORNER_COUNT),
            cancelled: false,
        }
    }

    pub fn state(&self) -> SelectionState {
        if self.points.len() == CORNER_COUNT {
            SelectionState::Complete
        } else if self.cancelled {
            SelectionState::Cancelled
        } else {
            SelectionState::Collecting(self.points.len())
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_terminal()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The corner the next click will be assigned to, if any.
    pub fn next_corner(&self) -> Option<Corner> {
        match self.state() {
            SelectionState::Collecting(n) => Some(Corner::ALL[n]),
            _ => None,
        }
    }

    /// Feed one input through the state machine.
    pub fn apply(&mut self, input: PickerInput) -> Transition {
        if self.is_finished() {
            debug!(?input, "Selection already finished; input ignored");
            return Transition::Ignored;
        }
        match input {
            PickerInput::Click(point) => {
                self.points.push(point);
                let index = self.points.len();
                info!(index, x = point.x, y = point.y, "Selected point {index}: {point}");
                Transition::Accepted { index, point }
            }
            PickerInput::Cancel => {
                self.cancelled = true;
                debug!(selected = self.points.len(), "Selection cancelled");
                Transition::Cancelled
            }
        }
    }

    /// The four corners in LT, RT, RB, LB order, or an error if the selection
    /// never reached four points.
    pub fn corners(&self) -> Result<[Point; CORNER_COUNT]> {
        <[Point; CORNER_COUNT]>::try_from(self.points.as_slice()).map_err(|_| {
            DeskewError::IncompleteSelection {
                selected: self.points.len(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(x: f64, y: f64) -> PickerInput {
        PickerInput::Click(Point::new(x, y))
    }

    #[test]
    fn four_clicks_complete_the_selection() {
        let mut selection = CornerSelection::new();
        assert_eq!(selection.state(), SelectionState::Collecting(0));
        assert_eq!(selection.next_corner(), Some(Corner::LeftTop));

        for (i, (x, y)) in [(10.0, 10.0), (990.0, 10.0), (990.0, 1410.0)]
            .into_iter()
            .enumerate()
        {
            let transition = selection.apply(click(x, y));
            assert_eq!(
                transition,
                Transition::Accepted {
                    index: i + 1,
                    point: Point::new(x, y)
                }
            );
        }
        assert_eq!(selection.state(), SelectionState::Collecting(3));
        assert_eq!(selection.next_corner(), Some(Corner::LeftBottom));

        selection.apply(click(10.0, 1410.0));
        assert_eq!(selection.state(), SelectionState::Complete);
        assert!(selection.is_finished());
        assert_eq!(selection.next_corner(), None);
        assert_eq!(selection.corners().unwrap()[3], Point::new(10.0, 1410.0));
    }

    #[test]
    fn fifth_click_is_ignored() {
        let mut selection = CornerSelection::new();
        for i in 0..4 {
            selection.apply(click(f64::from(i), 0.0));
        }
        assert_eq!(selection.apply(click(50.0, 50.0)), Transition::Ignored);
        assert_eq!(selection.len(), 4);
    }

    #[test]
    fn cancel_with_three_points_is_terminal_and_incomplete() {
        let mut selection = CornerSelection::new();
        for i in 0..3 {
            selection.apply(click(f64::from(i), 1.0));
        }
        assert_eq!(selection.apply(PickerInput::Cancel), Transition::Cancelled);
        assert_eq!(selection.state(), SelectionState::Cancelled);
        assert_eq!(selection.apply(click(9.0, 9.0)), Transition::Ignored);
        assert!(matches!(
            selection.corners(),
            Err(DeskewError::IncompleteSelection { selected: 3 })
        ));
    }

    #[test]
    fn cancel_after_completion_keeps_the_selection() {
        let mut selection = CornerSelection::new();
        for i in 0..4 {
            selection.apply(click(f64::from(i), 2.0));
        }
        assert_eq!(selection.apply(PickerInput::Cancel), Transition::Ignored);
        assert_eq!(selection.state(), SelectionState::Complete);
    }

    #[test]
    fn out_of_bounds_and_duplicate_clicks_are_kept_verbatim() {
        let mut selection = CornerSelection::new();
        selection.apply(click(-20.0, 5000.0));
        selection.apply(click(-20.0, 5000.0));
        assert_eq!(
            selection.points(),
            &[Point::new(-20.0, 5000.0), Point::new(-20.0, 5000.0)]
        );
    }
}
