// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner selection — the pick state machine and the on-screen feedback drawn
// for each accepted point.

pub mod annotate;
pub mod selection;

pub use annotate::Annotator;
pub use selection::{CORNER_COUNT, CornerSelection, PickerInput, SelectionState, Transition};
