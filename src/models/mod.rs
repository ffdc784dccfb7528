pub mod coordinates;
pub mod exposure;
pub mod route;

pub use coordinates::Coordinates;
pub use exposure::ExposureReading;
pub use route::{round_2dp, RouteGeometry, ScoredRoute, Step};
