//! Chart aggregate: scales, geometry, axes, tooltip and the render surface.

pub mod axis;
pub mod geometry;
pub mod scale;
pub mod scene;
pub mod tooltip;
pub mod value_objects;

pub use axis::*;
pub use geometry::*;
pub use scale::*;
pub use scene::*;
pub use tooltip::*;
pub use value_objects::*;
