use crate::config::LifeConfig;
use crate::constants::{
    BACKGROUND_COLOR, CHECKBOX_INSET, GRID_LINE_COLOR, GRID_LINE_THICKNESS, LIVE_CELL_COLOR,
    PANEL_COLOR, WIDGET_FILL_COLOR, WIDGET_TRACK_COLOR,
};
use crate::grid::Grid;
use crate::interaction::{CONTROLS_PANEL, GRID_CHECKBOX, Rect, STEP_RATE_SLIDER};
use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::{dpi::PhysicalSize, window::Window};

// --- GPU Data Structures ---

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct CanvasUniforms {
    canvas_size: [f32; 2],
    _padding: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct Vertex {
    corner: [f32; 2],
}

impl Vertex {
    fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            }],
        }
    }
}

const QUAD_VERTICES: &[Vertex] = &[
    Vertex { corner: [0.0, 0.0] },
    Vertex { corner: [1.0, 0.0] },
    Vertex { corner: [1.0, 1.0] },
    Vertex { corner: [0.0, 1.0] },
];
const QUAD_INDICES: &[u16] = &[0, 1, 2, 0, 2, 3];

/// One filled rectangle, in canvas pixels.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RectInstance {
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
}

impl RectInstance {
    fn new(position: Vec2, size: Vec2, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            size: size.to_array(),
            color,
        }
    }

    fn from_rect(rect: Rect, color: [f32; 4]) -> Self {
        Self::new(rect.min, rect.size, color)
    }

    fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<RectInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

// --- Frame Data ---
pub struct FrameView<'a> {
    pub grid: &'a Grid,
    pub cell_size: Vec2,
    pub show_grid_lines: bool,
    pub show_controls: bool,
    pub step_rate: u32,
    pub min_step_rate: u32,
    pub max_step_rate: u32,
}

pub fn max_instances(grid_width: usize, grid_height: usize) -> usize {
    (grid_width + 1) + (grid_height + 1) + grid_width * grid_height + 5
}

/// Fills `out` with the frame's rectangles in draw order: grid lines, live cells, controls.
pub fn build_instances(view: &FrameView, out: &mut Vec<RectInstance>) {
    out.clear();
    let (w, h) = (view.grid.width(), view.grid.height());
    let canvas = Vec2::new(w as f32 * view.cell_size.x, h as f32 * view.cell_size.y);

    if view.show_grid_lines {
        for row in 0..=h {
            out.push(RectInstance::new(
                Vec2::new(0.0, row as f32 * view.cell_size.y),
                Vec2::new(canvas.x, GRID_LINE_THICKNESS),
                GRID_LINE_COLOR,
            ));
        }
        for col in 0..=w {
            out.push(RectInstance::new(
                Vec2::new(col as f32 * view.cell_size.x, 0.0),
                Vec2::new(GRID_LINE_THICKNESS, canvas.y),
                GRID_LINE_COLOR,
            ));
        }
    }

    out.extend(view.grid.live_cells().map(|(x, y)| {
        RectInstance::new(
            Vec2::new(x as f32, y as f32) * view.cell_size,
            view.cell_size,
            LIVE_CELL_COLOR,
        )
    }));

    if view.show_controls {
        out.push(RectInstance::from_rect(CONTROLS_PANEL, PANEL_COLOR));
        out.push(RectInstance::from_rect(STEP_RATE_SLIDER, WIDGET_TRACK_COLOR));
        let span = view.max_step_rate.saturating_sub(view.min_step_rate).max(1) as f32;
        let t = (view.step_rate.saturating_sub(view.min_step_rate) as f32 / span).clamp(0.0, 1.0);
        if t > 0.0 {
            out.push(RectInstance::new(
                STEP_RATE_SLIDER.min,
                Vec2::new(STEP_RATE_SLIDER.size.x * t, STEP_RATE_SLIDER.size.y),
                WIDGET_FILL_COLOR,
            ));
        }
        out.push(RectInstance::from_rect(GRID_CHECKBOX, WIDGET_TRACK_COLOR));
        if view.show_grid_lines {
            out.push(RectInstance::new(
                GRID_CHECKBOX.min + Vec2::splat(CHECKBOX_INSET),
                GRID_CHECKBOX.size - Vec2::splat(CHECKBOX_INSET * 2.0),
                WIDGET_FILL_COLOR,
            ));
        }
    }
}

// --- Status Title ---
pub fn status_title(
    base: &str,
    generation: u64,
    step_rate: u32,
    running: bool,
    fps: Option<f64>,
) -> String {
    let paused_text = if running { "" } else { " [PAUSED]" };
    match fps {
        Some(fps) => format!(
            "{} - Gen: {} - Rate: {}/s - FPS: {:.1}{}",
            base, generation, step_rate, fps, paused_text
        ),
        None => format!(
            "{} - Gen: {} - Rate: {}/s{}",
            base, generation, step_rate, paused_text
        ),
    }
}

// --- Renderer ---
pub struct Renderer<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    instance_data: Vec<RectInstance>,
    max_instances: usize,
    uniform_bind_group: wgpu::BindGroup,
}

impl<'a> Renderer<'a> {
    pub async fn new(
        window: Arc<Window>,
        life_config: &LifeConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let size = window.inner_size();
        let size = PhysicalSize::new(size.width.max(1), size.height.max(1));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or("Failed to find an appropriate adapter")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or("Surface reports no supported formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Rect Shader Module"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        // The canvas is addressed in logical pixels so the picture is independent of DPI.
        let canvas = life_config.canvas_size();
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Canvas Uniform Buffer"),
            contents: bytemuck::cast_slice(&[CanvasUniforms {
                canvas_size: canvas.to_array(),
                _padding: [0.0; 2],
            }]),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Canvas Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Canvas Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Rect Render Pipeline Layout"),
                bind_group_layouts: &[&uniform_bind_group_layout],
                push_constant_ranges: &[],
            });
        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Rect Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::desc(), RectInstance::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
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
            multiview: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let max_instances = max_instances(life_config.grid_width, life_config.grid_height);
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (max_instances * std::mem::size_of::<RectInstance>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        log::info!(
            "Renderer ready: {:?} surface {}x{}, {} instance slots",
            surface_format,
            size.width,
            size.height,
            max_instances
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            render_pipeline,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            instance_data: Vec::with_capacity(max_instances),
            max_instances,
            uniform_bind_group,
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let new_size = PhysicalSize::new(new_size.width.max(1), new_size.height.max(1));
        if new_size != self.size {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            log::debug!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, view: &FrameView) -> Result<(), wgpu::SurfaceError> {
        let output_texture = self.surface.get_current_texture()?;
        let texture_view = output_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        build_instances(view, &mut self.instance_data);
        let current_instance_count = self.instance_data.len();
        if current_instance_count > self.max_instances {
            let new_max_instances = current_instance_count.next_power_of_two();
            log::warn!(
                "Resizing instance buffer from {} to {} instances",
                self.max_instances,
                new_max_instances
            );
            self.instance_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Instance Buffer (Resized)"),
                size: (new_max_instances * std::mem::size_of::<RectInstance>())
                    as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.max_instances = new_max_instances;
        }
        if current_instance_count > 0 {
            self.queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&self.instance_data),
            );
        }

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(BACKGROUND_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if current_instance_count > 0 {
                let used_bytes = (current_instance_count * std::mem::size_of::<RectInstance>())
                    as wgpu::BufferAddress;
                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..used_bytes));
                render_pass
                    .set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(
                    0..QUAD_INDICES.len() as u32,
                    0,
                    0..current_instance_count as u32,
                );
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output_texture.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(grid: &Grid, show_grid_lines: bool, show_controls: bool) -> FrameView<'_> {
        FrameView {
            grid,
            cell_size: Vec2::new(10.0, 10.0),
            show_grid_lines,
            show_controls,
            step_rate: 50,
            min_step_rate: 0,
            max_step_rate: 100,
        }
    }

    #[test]
    fn live_cells_become_cell_sized_rects() {
        let mut grid = Grid::new(8, 6);
        grid.set(2, 3, true);
        let mut out = Vec::new();
        build_instances(&view(&grid, false, false), &mut out);
        assert_eq!(
            out,
            vec![RectInstance {
                position: [20.0, 30.0],
                size: [10.0, 10.0],
                color: LIVE_CELL_COLOR,
            }]
        );
    }

    #[test]
    fn grid_lines_precede_cells() {
        let mut grid = Grid::new(8, 6);
        grid.set(0, 0, true);
        let mut out = Vec::new();
        build_instances(&view(&grid, true, false), &mut out);
        // 7 horizontal + 9 vertical lines, then the cell.
        assert_eq!(out.len(), 7 + 9 + 1);
        assert!(out[..16].iter().all(|r| r.color == GRID_LINE_COLOR));
        assert_eq!(out[6].position, [0.0, 60.0]);
        assert_eq!(out[6].size, [80.0, GRID_LINE_THICKNESS]);
        assert_eq!(out[15].position, [80.0, 0.0]);
        assert_eq!(out[16].color, LIVE_CELL_COLOR);
    }

    #[test]
    fn controls_panel_shows_slider_fill_and_checkbox() {
        let grid = Grid::new(8, 6);
        let mut out = Vec::new();
        build_instances(&view(&grid, true, true), &mut out);
        let widgets = &out[7 + 9..];
        assert_eq!(widgets.len(), 5);
        assert_eq!(widgets[0], RectInstance::from_rect(CONTROLS_PANEL, PANEL_COLOR));
        assert_eq!(widgets[2].size, [STEP_RATE_SLIDER.size.x * 0.5, STEP_RATE_SLIDER.size.y]);
        assert_eq!(widgets[4].color, WIDGET_FILL_COLOR);

        build_instances(&view(&grid, false, true), &mut out);
        // Unchecked box has no fill.
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn instance_bound_covers_full_frame() {
        let mut grid = Grid::new(8, 6);
        for y in 0..6 {
            for x in 0..8 {
                grid.set(x, y, true);
            }
        }
        let mut out = Vec::new();
        build_instances(&view(&grid, true, true), &mut out);
        assert_eq!(out.len(), max_instances(8, 6));
    }

    #[test]
    fn title_shows_fps_only_when_given() {
        let with_fps = status_title("Life", 12, 60, true, Some(59.94));
        assert_eq!(with_fps, "Life - Gen: 12 - Rate: 60/s - FPS: 59.9");
        let paused = status_title("Life", 0, 5, false, None);
        assert_eq!(paused, "Life - Gen: 0 - Rate: 5/s [PAUSED]");
    }
}
