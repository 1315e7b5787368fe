mod component;
mod render;
mod scene;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use scene::build_scene;
pub use types::CanvasEvent;
