pub mod aggregate;
pub mod axis;
pub mod json_contract;
pub mod num;
pub mod trace;

pub use axis::{Axis, AxisKind, RawValue};
pub use num::CalcNum;
pub use trace::{BoxMean, BoxPoints, BoxTrace, FunnelTrace, Marker, Orientation};
