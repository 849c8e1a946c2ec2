//! Reference ellipsoid, geodetic coordinate conversion, and the observer's local
//! right/forward/up frame.
//!
//! All positions are Earth-centered Cartesian `DVec3` values in meters unless a
//! type says otherwise. Angles inside [`Cartographic`] are radians.

mod cartographic;
mod ellipsoid;
mod local_frame;

pub use cartographic::Cartographic;
pub use ellipsoid::Ellipsoid;
pub use local_frame::{FrameError, LocalFrame, LocalFrameBuilder};
