//! GPU mesh data: vertex layout, indexed sub-meshes and draw helpers.

/// Types that describe their own vertex buffer layout to the pipeline.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/**
 * As vertex data is stored directly in GPU memory we need to tell the
 * pipeline what the bytes refer to: position, texture coordinates and
 * normal, tightly packed per vertex.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    // corresponds to the @location in the shader file.
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// One indexed sub-mesh with its GPU buffers. Indices are `u32`, topology is
/// always a triangle list.
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

/// A loaded asset: the sub-meshes of one imported file.
#[derive(Debug)]
pub struct Model {
    pub meshes: Vec<Mesh>,
}

pub trait DrawModel {
    /// Draw every sub-mesh of `model` with the given uniform and texture
    /// bindings.
    fn draw_model(
        &mut self,
        model: &Model,
        uniforms_bind_group: &wgpu::BindGroup,
        texture_bind_group: &wgpu::BindGroup,
    );
}

impl DrawModel for wgpu::RenderPass<'_> {
    fn draw_model(
        &mut self,
        model: &Model,
        uniforms_bind_group: &wgpu::BindGroup,
        texture_bind_group: &wgpu::BindGroup,
    ) {
        for mesh in &model.meshes {
            self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            self.set_bind_group(0, uniforms_bind_group, &[]);
            self.set_bind_group(1, texture_bind_group, &[]);
            self.draw_indexed(0..mesh.num_elements, 0, 0..1);
        }
    }
}
