mod component;
mod layout;
mod render;
mod state;
mod svg;

pub use component::SankeyCanvas;
pub use layout::{SankeyConfig, compute_layout};
pub use svg::render_svg;
