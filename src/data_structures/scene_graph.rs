//! Scene graph and hierarchical scene organization.
//!
//! A [`Scene`] is a tree of named [`Node`]s, each carrying a local transform
//! and optionally a mesh with a textured [`Material`]. Every frame the tree
//! is walked depth-first, parent transforms are composed into world
//! transforms, and one [`DrawCall`] is emitted per drawable node together
//! with its packed uniform blocks.

use std::sync::Arc;

use cgmath::{Matrix4, Point3, SquareMatrix, Vector3};

use crate::{
    camera::{Camera, Projection},
    math,
};

/// Opaque handle to a mesh registered with the renderer.
pub type MeshId = u64;
/// Opaque handle to a 2D texture registered with the renderer.
pub type TextureId = u64;

/// Number of point lights in a scene. The shader contract bakes this in.
pub const MAX_LIGHTS: usize = 3;

/// A point light, set once at scene build.
#[derive(Clone, Copy, Debug)]
pub struct Light {
    pub world_position: Vector3<f32>,
    pub color: Vector3<f32>,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            world_position: Vector3::new(0.0, 0.0, 0.0),
            color: Vector3::new(0.0, 0.0, 0.0),
        }
    }
}

/// Surface shading parameters, shared between nodes via [`Arc`] and
/// immutable after scene build.
///
/// A material without a base color texture keeps every node referencing it
/// out of draw emission.
#[derive(Clone, Debug)]
pub struct Material {
    pub specular_color: Vector3<f32>,
    pub specular_power: f32,
    pub base_color_texture: Option<TextureId>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            specular_color: Vector3::new(1.0, 1.0, 1.0),
            specular_power: 1.0,
            base_color_texture: None,
        }
    }
}

/// One element of the scene hierarchy.
///
/// A node exclusively owns its children; the tree never contains cycles.
/// There is no parent back-reference: the traversal hands each node its
/// parent's accumulated world transform instead.
#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub local_transform: Matrix4<f32>,
    pub mesh: Option<MeshId>,
    pub material: Arc<Material>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local_transform: Matrix4::identity(),
            mesh: None,
            material: Arc::new(Material::default()),
            children: Vec::new(),
        }
    }

    /// A node carrying drawable content.
    pub fn with_mesh(name: impl Into<String>, mesh: MeshId, material: Arc<Material>) -> Self {
        Self {
            name: name.into(),
            local_transform: Matrix4::identity(),
            mesh: Some(mesh),
            material,
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// First node named `name` in pre-order, this node included.
    ///
    /// Names are not enforced unique; with a fixed child order the match is
    /// deterministic.
    pub fn find(&self, name: &str) -> Option<&Node> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Node> {
        if self.name == name {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(name))
    }
}

/// The scene: a root node named `"Root"`, an ambient term and three point
/// lights.
#[derive(Clone, Debug)]
pub struct Scene {
    pub root: Node,
    pub ambient_light_color: Vector3<f32>,
    pub lights: [Light; MAX_LIGHTS],
}

impl Scene {
    pub fn new() -> Self {
        Self {
            root: Node::new("Root"),
            ambient_light_color: Vector3::new(0.0, 0.0, 0.0),
            lights: [Light::default(); MAX_LIGHTS],
        }
    }

    pub fn find_node(&self, name: &str) -> Option<&Node> {
        self.root.find(name)
    }

    pub fn find_node_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.root.find_mut(name)
    }

    /// Walk the tree in pre-order and emit one draw call per node that has
    /// both a mesh and a textured material.
    ///
    /// World transforms are recomputed from scratch on every call; with the
    /// scene sizes this crate targets that is cheaper than tracking dirty
    /// state.
    pub fn draw_calls(&self, frame: &FrameContext) -> Vec<DrawCall> {
        let mut calls = Vec::new();
        self.collect(&self.root, Matrix4::identity(), frame, &mut calls);
        calls
    }

    fn collect(
        &self,
        node: &Node,
        parent_world: Matrix4<f32>,
        frame: &FrameContext,
        out: &mut Vec<DrawCall>,
    ) {
        let world = parent_world * node.local_transform;
        if let (Some(mesh), Some(texture)) = (node.mesh, node.material.base_color_texture) {
            out.push(DrawCall {
                mesh,
                texture,
                vertex_uniforms: VertexUniforms::new(world, frame),
                fragment_uniforms: FragmentUniforms::new(&node.material, frame, self),
            });
        }
        for child in &node.children {
            self.collect(child, world, frame, out);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame inputs threaded through traversal instead of living as
/// long-lived renderer state, so emission is a pure function of
/// `(scene, frame)`.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext {
    pub time: f32,
    pub camera_world_position: Point3<f32>,
    pub view_matrix: Matrix4<f32>,
    pub projection_matrix: Matrix4<f32>,
}

impl FrameContext {
    pub fn new(time: f32, camera: &Camera, projection: &Projection) -> Self {
        Self {
            time,
            camera_world_position: camera.position,
            view_matrix: camera.view_matrix(),
            projection_matrix: projection.matrix(),
        }
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix * self.view_matrix
    }
}

/// One rendered object: a mesh handle plus the uniform payload for it.
#[derive(Clone, Copy, Debug)]
pub struct DrawCall {
    pub mesh: MeshId,
    pub texture: TextureId,
    pub vertex_uniforms: VertexUniforms,
    pub fragment_uniforms: FragmentUniforms,
}

/**
 * The raw uniform blocks below are the exact bytes handed to the shader.
 * Field order and padding are part of the shader contract: vec3 fields are
 * padded to 16 bytes and mat3x3 columns are stored vec4-aligned.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VertexUniforms {
    pub model_matrix: [[f32; 4]; 4],
    pub view_projection_matrix: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 3],
}

impl VertexUniforms {
    fn new(world: Matrix4<f32>, frame: &FrameContext) -> Self {
        let normal = math::normal_matrix(&world);
        Self {
            model_matrix: world.into(),
            view_projection_matrix: frame.view_projection().into(),
            normal_matrix: [
                [normal.x.x, normal.x.y, normal.x.z, 0.0],
                [normal.y.x, normal.y.y, normal.y.z, 0.0],
                [normal.z.x, normal.z.y, normal.z.z, 0.0],
            ],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    // Uniforms require 16 byte (4 float) spacing, hence the padding fields
    pub _padding: u32,
    pub color: [f32; 3],
    pub _padding2: u32,
}

impl From<&Light> for LightUniform {
    fn from(light: &Light) -> Self {
        Self {
            position: light.world_position.into(),
            _padding: 0,
            color: light.color.into(),
            _padding2: 0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FragmentUniforms {
    pub camera_world_position: [f32; 3],
    pub _padding: u32,
    pub ambient_light_color: [f32; 3],
    pub _padding2: u32,
    pub specular_color: [f32; 3],
    // Packs into the fourth float after the vec3, no extra padding
    pub specular_power: f32,
    pub lights: [LightUniform; MAX_LIGHTS],
}

impl FragmentUniforms {
    fn new(material: &Material, frame: &FrameContext, scene: &Scene) -> Self {
        Self {
            camera_world_position: frame.camera_world_position.into(),
            _padding: 0,
            ambient_light_color: scene.ambient_light_color.into(),
            _padding2: 0,
            specular_color: material.specular_color.into(),
            specular_power: material.specular_power,
            lights: scene.lights.map(|light| LightUniform::from(&light)),
        }
    }
}
