//! Per-trace calc transformers and the pipeline driver.

pub mod box_plot;
pub mod enrich;
pub mod funnel;
pub mod pipeline;

pub use box_plot::{BoxCalc, BoxPoint, BoxStats, calc_box};
pub use funnel::{FunnelCalc, FunnelPoint, calc_funnel};
pub use pipeline::CalcPipeline;

use serde::{Deserialize, Serialize};

/// Non-fatal data-quality notes attached to calc output.
///
/// Degraded inputs never fail a transform and never change how the calc
/// data is built; warnings exist so callers can surface what was silently
/// repaired instead of guessing from the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalcWarning {
    /// Paired arrays had different lengths; output truncated to the shorter.
    LengthMismatch { expected: usize, actual: usize },
    /// A negative funnel size was treated as missing.
    NegativeSize { index: usize },
    /// No valid values were available for color-domain resolution.
    EmptyColorDomain,
}
