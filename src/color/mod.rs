pub mod axis;
pub mod domain;
pub mod scale;

pub use axis::ColorAxis;
pub use domain::{ColorDomainSettings, ResolvedColorDomain, resolve_color_domain};
pub use scale::{ColorScale, ColorScaleDefaults, ColorStop};
