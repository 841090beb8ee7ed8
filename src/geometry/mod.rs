pub mod curve;

pub use curve::{Arc, Curve, Line};
