//! Reusable widgets.

pub mod sequence_canvas;
