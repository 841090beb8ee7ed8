mod bounding_box;
mod intersect;
mod wire_points;

pub use bounding_box::Aabb;
pub use intersect::WireWireIntersect;
pub use wire_points::WirePoints;
