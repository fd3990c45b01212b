//! Desk Scene - a small real-time 3D renderer
//!
//! Generates a cup, handle, pen, ground plane and paper sheets
//! procedurally at startup, textures them, lights them with a fixed Phong
//! rig and lets the user fly a camera around. Uses wgpu for GPU rendering
//! and egui for the HUD.

mod camera;
mod config;
mod lighting;
mod mesh;
mod scene;
mod state;
mod texture;
mod ui;

use camera::CameraUniform;
use config::{hex_to_rgb, CONFIG};
use lighting::LightingUniform;
use mesh::{MeshData, Vertex};
use scene::{build_scene, TextureSlot};
use state::AppState;
use texture::Texture;
use ui::{render_hud, FpsCounter, HudInfo};

use egui_wgpu::ScreenDescriptor;
use glam::Mat4;
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use wgpu::util::DeviceExt;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowAttributes, WindowId},
};

/// Model uniform buffer data for per-object transforms
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelUniform {
    model: [[f32; 4]; 4],
    /// Inverse-transpose of `model`, for normals
    normal: [[f32; 4]; 4],
}

impl ModelUniform {
    fn from_matrix(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal: model.inverse().transpose().to_cols_array_2d(),
        }
    }
}

/// GPU mesh handle
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    /// Index count when indexed, vertex count otherwise
    num_elements: u32,
}

impl GpuMesh {
    fn from_mesh_data(device: &wgpu::Device, data: &MeshData, name: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Vertex Buffer")),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = data.is_indexed().then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{name} Index Buffer")),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        let num_elements = if data.is_indexed() {
            data.index_count()
        } else {
            data.vertex_count()
        } as u32;

        Self {
            vertex_buffer,
            index_buffer,
            num_elements,
        }
    }

    fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        match &self.index_buffer {
            Some(index_buffer) => {
                render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..self.num_elements, 0, 0..1);
            }
            None => render_pass.draw(0..self.num_elements, 0..1),
        }
    }
}

/// A scene object uploaded to the GPU
struct DrawItem {
    mesh: GpuMesh,
    model_bind_group: wgpu::BindGroup,
    texture: TextureSlot,
}

/// Main application
struct App {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    render_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    lighting_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    depth_texture: wgpu::TextureView,
    draw_items: Vec<DrawItem>,
    texture_bind_groups: HashMap<TextureSlot, wgpu::BindGroup>,
    lighting: LightingUniform,
    state: AppState,
    fps: FpsCounter,
    // Egui integration
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl App {
    async fn new(window: Arc<Window>) -> Result<Self, Box<dyn std::error::Error>> {
        let size = window.inner_size();
        let aspect = size.width.max(1) as f32 / size.height.max(1) as f32;

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface
        let surface = instance.create_surface(window.clone())?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or("Failed to find an appropriate adapter")?;

        let adapter_info = adapter.get_info();
        info!("Using adapter {} ({:?})", adapter_info.name, adapter_info.backend);

        // Create device and queue
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

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Create shader module
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        // Create camera uniform buffer
        let camera_uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // Create lighting uniform buffer
        let lighting = LightingUniform::from_config(&CONFIG.lighting);
        let lighting_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lighting Buffer"),
            contents: bytemuck::cast_slice(&[lighting]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // Create camera/lighting bind group layout (group 0)
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
                label: Some("camera_bind_group_layout"),
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lighting_buffer.as_entire_binding(),
                },
            ],
            label: Some("camera_bind_group"),
        });

        // Create model bind group layout for per-object transforms (group 1)
        let model_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
                label: Some("model_bind_group_layout"),
            });

        // Texture bind group layout (group 2)
        let texture_bind_group_layout = Texture::bind_group_layout(&device);

        // Create render pipeline
        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[
                    &camera_bind_group_layout,
                    &model_bind_group_layout,
                    &texture_bind_group_layout,
                ],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        // Create depth texture
        let depth_texture = Self::create_depth_texture(&device, &config);

        // Load textures; failures fall back to a blank texel
        let textures = &CONFIG.textures;
        let texture_bind_groups = TextureSlot::all()
            .into_iter()
            .map(|slot| {
                let file = match slot {
                    TextureSlot::Marble => &textures.marble,
                    TextureSlot::Wood => &textures.wood,
                    TextureSlot::Paper => &textures.paper,
                    TextureSlot::Pen => &textures.pen,
                };
                let texture = Texture::load(&device, &queue, &textures.path(file));
                (slot, texture.bind_group(&device, &texture_bind_group_layout))
            })
            .collect();

        // Generate and upload static meshes
        let draw_items = build_scene()
            .into_iter()
            .map(|object| {
                info!(
                    "Generated {}: {} vertices, {} indices, {} triangles",
                    object.name,
                    object.mesh.vertex_count(),
                    object.mesh.index_count(),
                    object.mesh.triangle_count()
                );
                let mesh = GpuMesh::from_mesh_data(&device, &object.mesh, object.name);
                let model_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Model Buffer"),
                    contents: bytemuck::cast_slice(&[ModelUniform::from_matrix(object.model)]),
                    usage: wgpu::BufferUsages::UNIFORM,
                });
                let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &model_bind_group_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: model_buffer.as_entire_binding(),
                    }],
                    label: Some("model_bind_group"),
                });
                DrawItem {
                    mesh,
                    model_bind_group,
                    texture: object.texture,
                }
            })
            .collect();

        let state = AppState::new(&CONFIG, aspect, Instant::now());

        // Initialize egui
        let egui_ctx = egui::Context::default();
        egui_ctx.set_visuals(egui::Visuals::dark());

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(&device, config.format, None, 1, false);

        let mut app = Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            render_pipeline,
            camera_buffer,
            lighting_buffer,
            camera_bind_group,
            depth_texture,
            draw_items,
            texture_bind_groups,
            lighting,
            state,
            fps: FpsCounter::default(),
            egui_ctx,
            egui_state,
            egui_renderer,
        };

        app.request_pointer_lock();

        Ok(app)
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = Self::create_depth_texture(&self.device, &self.config);
            self.state
                .set_aspect(new_size.width as f32 / new_size.height as f32);
        }
    }

    fn update(&mut self) {
        self.state.update(Instant::now());
        self.fps.record(self.state.timer.delta());

        // Update camera uniform
        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update(
            self.state.view_matrix(),
            self.state.projection_matrix(),
            self.state.eye_position(),
        );
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera_uniform]));

        // The spotlight stays with the first-person camera in either view
        self.lighting
            .set_spotlight(self.state.camera.position, self.state.camera.front());
        self.queue
            .write_buffer(&self.lighting_buffer, 0, bytemuck::cast_slice(&[self.lighting]));
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let (r, g, b) = hex_to_rgb(CONFIG.colors.background);
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

            for item in &self.draw_items {
                let Some(texture_bind_group) = self.texture_bind_groups.get(&item.texture) else {
                    continue;
                };
                render_pass.set_bind_group(1, &item.model_bind_group, &[]);
                render_pass.set_bind_group(2, texture_bind_group, &[]);
                item.mesh.draw(&mut render_pass);
            }
        }

        if self.state.show_hud {
            self.render_hud(&mut encoder, &view);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn render_hud(&mut self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let info = HudInfo {
            view_mode: self.state.view_mode,
            travel_speed: self.state.travel.value(),
            zoom: self.state.camera.zoom(),
            fps: self.fps.fps(),
            position: self.state.active_camera().position,
            yaw: self.state.camera.yaw(),
            pitch: self.state.camera.pitch(),
        };

        let egui_input = self.egui_state.take_egui_input(&self.window);
        let egui_output = self.egui_ctx.run(egui_input, |ctx| render_hud(ctx, &info));

        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);

        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [self.size.width, self.size.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let tris = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);
        for (id, image_delta) in &egui_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        self.egui_renderer
            .update_buffers(&self.device, &self.queue, encoder, &tris, &screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            // egui-wgpu needs a 'static render pass with wgpu 22
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }

    /// Handle a window event
    fn handle_event(&mut self, event: &WindowEvent) {
        if self.state.hud_accepts_input() {
            let _ = self.egui_state.on_window_event(&self.window, event);
        }

        match event {
            WindowEvent::Focused(focused) => {
                if *focused {
                    self.request_pointer_lock();
                } else {
                    self.state.release_all_keys();
                    self.release_pointer_lock();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state
                    .cursor_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                let zoom = self.state.is_held(KeyCode::ShiftLeft)
                    || self.state.is_held(KeyCode::ShiftRight);
                self.state.scroll(scroll, zoom);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.state
                        .set_key(key, event.state == ElementState::Pressed);
                }
            }
            _ => {}
        }
    }

    /// Capture and hide the cursor for mouse look
    fn request_pointer_lock(&mut self) {
        let grabbed = match self.window.set_cursor_grab(CursorGrabMode::Locked) {
            Ok(()) => {
                debug!("Cursor grabbed (locked)");
                true
            }
            Err(e) => {
                // Fall back to confined if locked isn't supported
                match self.window.set_cursor_grab(CursorGrabMode::Confined) {
                    Ok(()) => {
                        debug!("Cursor grabbed (confined)");
                        true
                    }
                    Err(e2) => {
                        warn!("Could not grab cursor: {:?} / {:?}", e, e2);
                        false
                    }
                }
            }
        };
        self.window.set_cursor_visible(!grabbed);
        self.state.set_pointer_grabbed(grabbed);
    }

    fn release_pointer_lock(&mut self) {
        let _ = self.window.set_cursor_grab(CursorGrabMode::None);
        self.window.set_cursor_visible(true);
        self.state.set_pointer_grabbed(false);
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }
}

/// Application wrapper for winit 0.30 ApplicationHandler
struct AppWrapper {
    app: Option<App>,
}

impl ApplicationHandler for AppWrapper {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }

        let window_config = &CONFIG.window;
        let window_attrs = WindowAttributes::default()
            .with_title(window_config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                window_config.width,
                window_config.height,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(App::new(window)) {
            Ok(app) => {
                self.app = Some(app);
                info!("Application initialized");
            }
            Err(e) => {
                error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(app) = &mut self.app else { return };

        app.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => app.state.should_close = true,
            WindowEvent::Resized(size) => app.resize(size),
            WindowEvent::RedrawRequested => {
                app.update();
                if let Err(e) = app.render() {
                    match e {
                        wgpu::SurfaceError::Lost => app.resize(app.size),
                        wgpu::SurfaceError::OutOfMemory => event_loop.exit(),
                        _ => error!("Render error: {:?}", e),
                    }
                }
            }
            _ => {}
        }

        if app.state.should_close {
            info!("Exiting...");
            event_loop.exit();
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        let Some(app) = &mut self.app else { return };

        if let DeviceEvent::MouseMotion { delta } = event {
            app.state.mouse_motion(delta.0 as f32, delta.1 as f32);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(app) = &self.app {
            app.window.request_redraw();
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    info!("Starting Desk Scene...");
    info!("Controls:");
    info!("  Mouse - Look around");
    info!("  W/A/S/D - Move");
    info!("  Q/E - Move up/down");
    info!("  Scroll - Change travel speed");
    info!("  Shift+Scroll - Zoom");
    info!("  P - Toggle bird's eye view");
    info!("  H - Toggle HUD");
    info!("  ESC - Quit");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app_wrapper = AppWrapper { app: None };
    event_loop.run_app(&mut app_wrapper)?;
    Ok(())
}
