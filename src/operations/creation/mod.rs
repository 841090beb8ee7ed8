mod make_edge;
mod make_wire;
mod render_wire;

pub use make_edge::MakeEdge;
pub use make_wire::MakeWire;
pub use render_wire::RenderWire;
