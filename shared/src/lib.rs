pub mod entity;
pub mod format;
pub mod metric;
pub mod scale;
pub mod source;
pub mod topology;

pub use entity::{Country, County, Entity, Metro, State, Summary};
pub use format::tooltip_text;
pub use metric::{MetricSelector, extract};
pub use scale::{NO_DATA, Rgb, color_for, rgb_css, scale_for};
pub use source::{CaseSource, FeatureIdScheme, MapConfig, NavTarget};
pub use topology::{MapFeature, Topology, parse_topology};
