pub mod axis;
pub mod dataset;
pub mod element;
pub mod primitives;
pub mod time_unit;
pub mod time_window;
pub mod types;

pub use axis::{AxisGeometry, AxisId, AxisOrientation};
pub use dataset::{ActiveElement, Dataset, DatasetMeta, DatasetValue, StyleValue};
pub use element::{
    AxisBinding, AxisBindings, ElementProperty, PropertyAnimation, RenderedElement,
    X_TRANSITION_PROPERTIES, Y_TRANSITION_PROPERTIES,
};
pub use time_unit::{TimeUnit, UnitInterval, iso_weekday, start_of_week};
pub use time_window::TimeWindow;
pub use types::{AxisDimension, DataPoint, PixelRect};
