//! Frame rendering: resource registries, per-draw uniform buffers and the
//! render pass.
//!
//! The renderer owns every GPU-side resource the scene refers to by handle.
//! Rendering a frame is: build a [`FrameContext`], ask the scene for its
//! draw calls (pre-order, deterministic), upload each call's uniform blocks
//! into a pooled buffer pair and replay the calls into a single render pass.

use std::{collections::HashMap, iter, mem};

use cgmath::Deg;

use crate::{
    camera::{Camera, Projection},
    context::Context,
    data_structures::{
        model::{DrawModel, Model},
        scene_graph::{FragmentUniforms, FrameContext, MeshId, Scene, TextureId, VertexUniforms},
        texture::Texture,
    },
    pipelines::basic,
    resources,
};

/// A registered base color texture together with its bind group.
#[derive(Debug)]
pub struct TextureResources {
    pub texture: Texture,
    pub bind_group: wgpu::BindGroup,
}

/// Uniform buffer pair and bind group for a single draw call, reused across
/// frames.
#[derive(Debug)]
struct DrawResources {
    vertex_buffer: wgpu::Buffer,
    fragment_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct Renderer {
    pipeline: wgpu::RenderPipeline,
    uniforms_layout: wgpu::BindGroupLayout,
    base_color_layout: wgpu::BindGroupLayout,
    meshes: HashMap<MeshId, Model>,
    textures: HashMap<TextureId, TextureResources>,
    draw_resources: Vec<DrawResources>,
    next_mesh_id: MeshId,
    next_texture_id: TextureId,
    pub camera: Camera,
    pub projection: Projection,
}

impl Renderer {
    pub fn new(ctx: &Context) -> Self {
        let uniforms_layout = basic::uniforms_layout(&ctx.device);
        let base_color_layout = basic::base_color_layout(&ctx.device);
        let pipeline = basic::mk_scene_pipeline(
            &ctx.device,
            &ctx.config,
            &uniforms_layout,
            &base_color_layout,
        );

        Self {
            pipeline,
            uniforms_layout,
            base_color_layout,
            meshes: HashMap::new(),
            textures: HashMap::new(),
            draw_resources: Vec::new(),
            next_mesh_id: 0,
            next_texture_id: 0,
            camera: Camera::new((0.0, 0.0, 2.0)),
            projection: Projection::new(ctx.config.width, ctx.config.height, Deg(60.0), 0.1, 100.0),
        }
    }

    /// Register a loaded model and hand back its opaque handle.
    pub fn add_model(&mut self, model: Model) -> MeshId {
        let id = self.next_mesh_id;
        self.next_mesh_id += 1;
        self.meshes.insert(id, model);
        id
    }

    /// Register a texture, building its bind group, and hand back its
    /// opaque handle.
    pub fn add_texture(&mut self, ctx: &Context, texture: Texture) -> TextureId {
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.base_color_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
            label: Some("base_color_bind_group"),
        });
        let id = self.next_texture_id;
        self.next_texture_id += 1;
        self.textures
            .insert(id, TextureResources { texture, bind_group });
        id
    }

    /// Import an OBJ asset and register it.
    pub fn load_mesh(&mut self, ctx: &Context, file_name: &str) -> anyhow::Result<MeshId> {
        let model = resources::load_model_obj(file_name, &ctx.device)?;
        Ok(self.add_model(model))
    }

    /// Load an image asset and register it as a base color texture.
    pub fn load_texture(&mut self, ctx: &Context, file_name: &str) -> anyhow::Result<TextureId> {
        let texture = resources::texture::load_texture(file_name, &ctx.device, &ctx.queue)?;
        Ok(self.add_texture(ctx, texture))
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.projection.resize(width, height);
        }
    }

    /// Render one frame of `scene` at scene time `time`.
    ///
    /// Draws are submitted in the traversal's pre-order; nothing here
    /// reorders them.
    pub fn render(
        &mut self,
        ctx: &Context,
        scene: &Scene,
        time: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = FrameContext::new(time, &self.camera, &self.projection);
        let draw_calls = scene.draw_calls(&frame);

        self.reserve_draw_resources(ctx, draw_calls.len());
        for (call, resources) in draw_calls.iter().zip(&self.draw_resources) {
            ctx.queue.write_buffer(
                &resources.vertex_buffer,
                0,
                bytemuck::cast_slice(&[call.vertex_uniforms]),
            );
            ctx.queue.write_buffer(
                &resources.fragment_buffer,
                0,
                bytemuck::cast_slice(&[call.fragment_uniforms]),
            );
        }

        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(ctx.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            for (call, resources) in draw_calls.iter().zip(&self.draw_resources) {
                let Some(model) = self.meshes.get(&call.mesh) else {
                    log::warn!("draw call references unregistered mesh {}", call.mesh);
                    continue;
                };
                let Some(texture) = self.textures.get(&call.texture) else {
                    log::warn!("draw call references unregistered texture {}", call.texture);
                    continue;
                };
                render_pass.draw_model(model, &resources.bind_group, &texture.bind_group);
            }
        }

        ctx.queue.submit(iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Grow the per-draw uniform pool to at least `count` entries. Existing
    /// entries keep their buffers; they are rewritten every frame anyway.
    fn reserve_draw_resources(&mut self, ctx: &Context, count: usize) {
        while self.draw_resources.len() < count {
            let vertex_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Draw Vertex Uniform Buffer"),
                size: mem::size_of::<VertexUniforms>() as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let fragment_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Draw Fragment Uniform Buffer"),
                size: mem::size_of::<FragmentUniforms>() as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &self.uniforms_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: vertex_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: fragment_buffer.as_entire_binding(),
                    },
                ],
                label: Some("draw_uniforms_bind_group"),
            });
            self.draw_resources.push(DrawResources {
                vertex_buffer,
                fragment_buffer,
                bind_group,
            });
        }
    }
}
