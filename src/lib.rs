//! shoal
//!
//! A small hierarchical scene-graph renderer built on wgpu. The crate keeps
//! a deliberately narrow surface: a tree of named nodes with local
//! transforms, lights and textured materials, a deterministic closed-form
//! animation layer, and a renderer that walks the tree once per frame and
//! submits one draw per visible node.
//!
//! High-level modules
//! - `math`: transform matrix construction (scale, rotation, translation, projection)
//! - `camera`: camera position and perspective projection state
//! - `data_structures`: scene tree, meshes, textures and uniform payloads
//! - `animation`: closed-form per-frame scene choreography
//! - `context`: central GPU and window context that owns device/queue/surface
//! - `pipelines`: render pipeline and shader contract
//! - `renderer`: resource registries and per-frame draw submission
//! - `resources`: helpers to load meshes and textures from asset files
//! - `app`: the frame-driving event loop
//!

pub mod animation;
pub mod app;
pub mod camera;
pub mod context;
pub mod data_structures;
pub mod math;
pub mod pipelines;
pub mod renderer;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
