//! Valuation signals.
//!
//! The P/E versus volume divergence signal compares how the trailing P/E
//! moved over the last three weeks against how traded volume moved, then maps
//! the ratio through a log curve.

mod pe_volume;

pub use pe_volume::{CurveBranch, PeVolumeBreakdown, PeVolumeConfig, PeVolumeDivergence, log_curve};
