use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::coords::{GpuVertex, Viewport};
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::paint::Color;
use crate::scene::PrimitiveKind;
use crate::shader::{LinkedProgram, FRAGMENT_ENTRY, VERTEX_ENTRY};

use super::{DrawCall, FrameOutcome, GeometryId, ProgramId, RenderBackend};

/// One render pipeline per primitive kind, indexed by `PrimitiveKind::index`.
struct WgpuProgram {
    pipelines: Vec<wgpu::RenderPipeline>,
}

struct WgpuGeometry {
    buffer: wgpu::Buffer,
}

/// [`RenderBackend`] implemented with wgpu.
///
/// Owns the GPU context for one window. A "program" becomes a set of render
/// pipelines (wgpu bakes topology into the pipeline), all sharing one vertex
/// shader module per distinct vertex source.
pub struct WgpuBackend<'w> {
    window: &'w Window,
    gpu: Gpu<'w>,
    viewport: Viewport,

    pipeline_layout: wgpu::PipelineLayout,
    vertex_modules: HashMap<String, wgpu::ShaderModule>,
    programs: Vec<WgpuProgram>,
    geometries: Vec<WgpuGeometry>,
}

impl<'w> WgpuBackend<'w> {
    /// Creates the GPU context for `window`.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let gpu = Gpu::new(window, init).await?;
        let size = gpu.size();

        let pipeline_layout = gpu
            .device()
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("facade pipeline layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

        Ok(Self {
            window,
            gpu,
            viewport: Viewport::from_size(size.width, size.height),
            pipeline_layout,
            vertex_modules: HashMap::new(),
            programs: Vec::new(),
            geometries: Vec::new(),
        })
    }

    pub fn gpu(&self) -> &Gpu<'w> {
        &self.gpu
    }

    fn vertex_module(&mut self, program: &LinkedProgram) -> wgpu::ShaderModule {
        let device = self.gpu.device();
        self.vertex_modules
            .entry(program.vertex.source.clone())
            .or_insert_with(|| {
                device.create_shader_module(wgpu::ShaderModuleDescriptor {
                    label: Some(&program.vertex.label),
                    source: wgpu::ShaderSource::Wgsl(program.vertex.source.as_str().into()),
                })
            })
            .clone()
    }

    fn create_pipeline(
        &self,
        label: &str,
        vertex: &wgpu::ShaderModule,
        fragment: &wgpu::ShaderModule,
        primitive: PrimitiveKind,
    ) -> wgpu::RenderPipeline {
        let polygon_mode = if primitive.is_polygon() {
            self.gpu.polygon_mode()
        } else {
            wgpu::PolygonMode::Fill
        };

        self.gpu
            .device()
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(&format!("facade {label} {} pipeline", primitive.label())),
                layout: Some(&self.pipeline_layout),

                vertex: wgpu::VertexState {
                    module: vertex,
                    entry_point: Some(VERTEX_ENTRY),
                    compilation_options: Default::default(),
                    buffers: &[GpuVertex::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: fragment,
                    entry_point: Some(FRAGMENT_ENTRY),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.gpu.surface_format(),
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: primitive.topology(),
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode,
                    unclipped_depth: false,
                    conservative: false,
                },

                // Painter's algorithm: no depth test.
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
    }

    /// Viewport clamped to the current surface so the render pass never
    /// addresses pixels outside its target.
    fn clamped_viewport(&self) -> Viewport {
        let size = self.gpu.size();
        let x = self.viewport.x.min(size.width);
        let y = self.viewport.y.min(size.height);
        Viewport::new(
            x,
            y,
            self.viewport.width.min(size.width - x),
            self.viewport.height.min(size.height - y),
        )
    }
}

impl RenderBackend for WgpuBackend<'_> {
    fn create_program(&mut self, program: &LinkedProgram) -> Result<ProgramId> {
        let vertex = self.vertex_module(program);
        let fragment = self
            .gpu
            .device()
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&program.fragment.label),
                source: wgpu::ShaderSource::Wgsl(program.fragment.source.as_str().into()),
            });

        let pipelines = PrimitiveKind::ALL
            .iter()
            .map(|&kind| self.create_pipeline(&program.label, &vertex, &fragment, kind))
            .collect();

        let id = ProgramId(
            u32::try_from(self.programs.len()).context("too many shader programs")?,
        );
        self.programs.push(WgpuProgram { pipelines });
        Ok(id)
    }

    fn create_geometry(&mut self, label: &str, vertices: &[GpuVertex]) -> Result<GeometryId> {
        if vertices.is_empty() {
            bail!("geometry `{label}` has no vertices");
        }

        let buffer = self
            .gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let id = GeometryId(
            u32::try_from(self.geometries.len()).context("too many vertex buffers")?,
        );
        self.geometries.push(WgpuGeometry { buffer });
        Ok(id)
    }

    fn resize_framebuffer(&mut self, width: u32, height: u32) {
        self.gpu.resize(winit::dpi::PhysicalSize::new(width, height));
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn render(&mut self, clear: Color, draws: &[DrawCall]) -> Result<FrameOutcome> {
        // Validate handles up front; the render pass cannot fail midway.
        for d in draws {
            if d.program.index() >= self.programs.len() {
                bail!("draw call references unknown program {:?}", d.program);
            }
            if d.geometry.index() >= self.geometries.len() {
                bail!("draw call references unknown geometry {:?}", d.geometry);
            }
        }

        let viewport = self.clamped_viewport();
        if viewport.is_empty() {
            return Ok(FrameOutcome::Skipped);
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::debug!("surface error: {err}");
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => bail!("surface is unrecoverable (out of memory)"),
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        Ok(FrameOutcome::Skipped)
                    }
                };
            }
        };

        // Render pass is dropped before the encoder is moved into submit().
        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("facade scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_viewport(
                viewport.x as f32,
                viewport.y as f32,
                viewport.width as f32,
                viewport.height as f32,
                0.0,
                1.0,
            );

            for d in draws {
                let program = &self.programs[d.program.index()];
                let geometry = &self.geometries[d.geometry.index()];

                rpass.set_pipeline(&program.pipelines[d.primitive.index()]);
                rpass.set_vertex_buffer(0, geometry.buffer.slice(..));
                rpass.draw(0..d.vertex_count, 0..1);
            }
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);

        Ok(FrameOutcome::Presented)
    }

    fn release_all(&mut self) {
        for g in self.geometries.drain(..) {
            g.buffer.destroy();
        }
        self.programs.clear();
        self.vertex_modules.clear();
    }
}
