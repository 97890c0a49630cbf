//! Engine data structures: models, textures and the scene graph.
//!
//! This module contains the core data types for scene representation:
//!
//! - `model` contains mesh definitions and GPU resources for 3D models
//! - `texture` contains the GPU texture wrapper and creation utilities
//! - `scene_graph` holds the hierarchical scene tree and draw emission

pub mod model;
pub mod scene_graph;
pub mod texture;
