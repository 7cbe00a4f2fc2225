//! Full-frame shader processor with synchronous readback.
//!
//! A [`ShaderProcessor`] compiles a kernel-specific fragment stage against a
//! fixed fullscreen-quad vertex stage once at construction, then runs one
//! complete upload → render → readback round trip per [`process`] call.
//! Texture, render target, readback buffer and bind group are recreated only
//! when the frame dimensions change; this resource cache is keyed by
//! `(width, height)` and is independent of the pipeline's identity cache.
//!
//! [`process`]: ShaderProcessor::process

use wgpu::{BindGroup, Buffer, RenderPipeline, Sampler, Texture, TextureView};

use super::context::{GpuContext, GpuError};
use crate::frame::Frame;

const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// One vertex of the reusable full-screen quad.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct QuadVertex {
    position: [f32; 2],
    uv: [f32; 2],
}

/// Two triangles covering clip space, UVs with the origin at the top left so
/// readback rows come out in frame order.
const QUAD: &[QuadVertex] = &[
    QuadVertex { position: [-1.0, -1.0], uv: [0.0, 1.0] },
    QuadVertex { position: [1.0, -1.0], uv: [1.0, 1.0] },
    QuadVertex { position: [-1.0, 1.0], uv: [0.0, 0.0] },
    QuadVertex { position: [-1.0, 1.0], uv: [0.0, 0.0] },
    QuadVertex { position: [1.0, -1.0], uv: [1.0, 1.0] },
    QuadVertex { position: [1.0, 1.0], uv: [1.0, 0.0] },
];

/// Per-size resources, recreated when the incoming frame dimensions change.
struct FrameResources {
    width: u32,
    height: u32,
    input: Texture,
    target: Texture,
    target_view: TextureView,
    readback: Buffer,
    padded_row_bytes: u32,
    bind_group: BindGroup,
}

/// GPU-resident renderer for one effect kernel.
pub struct ShaderProcessor {
    ctx: GpuContext,
    pipeline: RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: Sampler,
    uniform_buffer: Buffer,
    quad_buffer: Buffer,
    resources: Option<FrameResources>,
    label: &'static str,
}

impl ShaderProcessor {
    /// Compile the kernel and allocate frame-size-independent resources.
    /// Creates its own GPU context; failure here is fatal for the owner.
    pub fn new(
        label: &'static str,
        fragment_wgsl: &str,
        uniform_size: u64,
    ) -> Result<Self, GpuError> {
        let ctx = GpuContext::new_blocking()?;
        let device = &ctx.device;

        let vertex_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("fullscreen_vertex"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/fullscreen.wgsl").into()),
        });
        let fragment_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(fragment_wgsl.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("kernel_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("kernel_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<QuadVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                        wgpu::VertexAttribute {
                            offset: 8,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("kernel_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kernel_uniforms"),
            size: uniform_size.max(16),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let quad_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fullscreen_quad"),
            size: std::mem::size_of_val(QUAD) as u64,
            usage: wgpu::BufferUsages::VERTEX,
            mapped_at_creation: true,
        });
        quad_buffer
            .slice(..)
            .get_mapped_range_mut()
            .copy_from_slice(bytemuck::cast_slice(QUAD));
        quad_buffer.unmap();

        Ok(Self {
            ctx,
            pipeline,
            bind_group_layout,
            sampler,
            uniform_buffer,
            quad_buffer,
            resources: None,
            label,
        })
    }

    /// Info about the adapter this processor renders on.
    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.ctx.adapter_info()
    }

    fn ensure_resources(&mut self, width: u32, height: u32) {
        if let Some(res) = &self.resources {
            if res.width == width && res.height == height {
                return;
            }
            log::debug!(
                "{}: resizing GPU resources {}x{} -> {}x{}",
                self.label,
                res.width,
                res.height,
                width,
                height
            );
        }
        let device = &self.ctx.device;
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let input = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("kernel_input"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("kernel_target"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let target_view = target.create_view(&wgpu::TextureViewDescriptor::default());

        let unpadded_row_bytes = width * 4;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_row_bytes = unpadded_row_bytes.div_ceil(align) * align;
        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kernel_readback"),
            size: (padded_row_bytes * height) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let input_view = input.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("kernel_bind_group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&input_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
            ],
        });

        self.resources = Some(FrameResources {
            width,
            height,
            input,
            target,
            target_view,
            readback,
            padded_row_bytes,
            bind_group,
        });
    }

    /// Run the kernel over one frame and read the result back.
    ///
    /// The input is canonicalized to RGBA (opaque alpha for 3-channel frames)
    /// before upload; the returned frame is always 4-channel. Blocks until
    /// the GPU round trip completes.
    pub fn process(&mut self, frame: &Frame, uniforms: &[u8]) -> Result<Frame, GpuError> {
        let rgba = frame.to_rgba();
        let (width, height) = (rgba.width(), rgba.height());
        self.ensure_resources(width, height);
        let res = self.resources.as_ref().ok_or(GpuError::Readback)?;

        self.ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &res.input,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba.data(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.ctx.queue.write_buffer(&self.uniform_buffer, 0, uniforms);

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("kernel_encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(self.label),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &res.target_view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &res.bind_group, &[]);
            pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
            pass.draw(0..QUAD.len() as u32, 0..1);
        }

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &res.target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &res.readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(res.padded_row_bytes),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.ctx.queue.submit(std::iter::once(encoder.finish()));

        let buffer_slice = res.readback.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        self.ctx
            .device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|_| GpuError::Readback)?;
        receiver
            .recv()
            .map_err(|_| GpuError::Readback)?
            .map_err(|_| GpuError::Readback)?;

        let pixels = {
            let data = buffer_slice.get_mapped_range();
            let unpadded_row_bytes = (width * 4) as usize;
            let mut pixels = Vec::with_capacity(unpadded_row_bytes * height as usize);
            for row in 0..height {
                let start = (row * res.padded_row_bytes) as usize;
                pixels.extend_from_slice(&data[start..start + unpadded_row_bytes]);
            }
            pixels
        };
        res.readback.unmap();

        Frame::new(width, height, 4, pixels).map_err(|_| GpuError::Readback)
    }
}
