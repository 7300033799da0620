//! Rendering
//!
//! Scenes are built as backend-agnostic [`DrawList`]s. The wgpu pipeline
//! tessellates them into flat-colored triangles; the software path paints
//! them onto a [`crate::raster::Canvas`].

pub mod draw_list;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod software;
pub mod vertex;

pub use draw_list::{DrawList, Letterbox, Shape};
pub use pipeline::RenderState;
pub use scene::{dxball_scene, eggs_scene, falling_scene};
pub use shapes::tessellate;
