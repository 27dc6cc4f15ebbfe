//! WebGPU rendering module
//!
//! The scene builder turns game state into flat-colored triangles on the CPU;
//! the pipeline maps them to clip space and draws them in one pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod sprites;
pub mod tiles;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Controls, Frame, Scene};
pub use tiles::{TileContext, TilePainter, TileRegistry};
pub use vertex::Vertex;
