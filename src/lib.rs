//! tracecalc: calc-data pipeline for Plotly-style trace specifications.
//!
//! This crate turns merged trace objects (raw coordinate arrays plus the
//! styling options that matter numerically) into normalized, render-ready
//! calc data: ordered per-point records enriched with derived fields, and
//! resolved color-domain bounds. Rendering, layout, and attribute-schema
//! machinery are out of scope; a renderer consumes the produced values.

pub mod calc;
pub mod color;
pub mod core;
pub mod error;
pub mod telemetry;

pub use calc::{CalcPipeline, CalcWarning};
pub use error::{CalcError, CalcResult};
