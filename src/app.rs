//! Application event loop.
//!
//! [`run`] drives a winit event loop. On `resumed` the window is created and the
//! loading chain is started: the GPU [`Context`] first, then the scene (see
//! [`scene::assemble`]). Natively the chain is driven to completion on a tokio
//! runtime; on the web it runs with `spawn_local` and reports back through a
//! [`ViewerEvent`].
//!
//! Each frame:
//! 1. Apply the accumulated orbit input and upload the camera
//! 2. Flush changed gem material parameters
//! 3. Draw the scene (or only the background while nothing is loaded)
//! 4. Present and request the next frame

use std::{fmt::Debug, iter, sync::Arc};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::PhysicalKey,
    window::Window,
};

use crate::{
    config::ViewerConfig,
    context::Context,
    data_structures::{color::Color, texture::Texture},
    error::ViewerError,
    interaction::{self, SwatchPicker},
    scene::{self, SceneReady},
};

/// GPU context plus whatever has been loaded so far.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    scene: Option<SceneReady>,
    is_surface_configured: bool,
}

impl AppState {
    fn new(ctx: Context) -> Self {
        Self {
            ctx,
            scene: None,
            is_surface_configured: false,
        }
    }

    /// Install the loaded scene. Only the first call has an effect.
    fn install_scene(&mut self, scene: Result<SceneReady, ViewerError>) {
        if self.scene.is_some() {
            log::warn!("scene already installed, ignoring");
            return;
        }
        match scene {
            Ok(scene) => {
                log::info!("scene ready, {} draws", scene.draws.len());
                self.scene = Some(scene);
            }
            Err(e) => log::error!("scene failed to load: {}", e),
        }
    }

    /// Returns `false` while there is no scene to recolor.
    fn set_gem_color(&mut self, color: Color) -> bool {
        match &mut self.scene {
            Some(scene) => {
                scene.materials.colored.set_color(color);
                true
            }
            None => false,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if interaction::apply_resize(
            &mut self.ctx.projection,
            &mut self.ctx.config,
            width,
            height,
        ) {
            self.is_surface_configured = true;
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
            self.ctx.camera.controller.set_viewport_height(height);
        }
    }

    fn update(&mut self) {
        self.ctx.update_camera();
        if let Some(scene) = &mut self.scene {
            scene.materials.write_to_buffers(&self.ctx.queue);
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
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
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(scene) = &self.scene {
                scene.draw(&mut render_pass, &self.ctx.pipelines, &self.ctx.camera);
            }
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

/// Sent through the event loop proxy. Natively the loading chain runs inline
/// and there is no page to click, so only the web build constructs these.
pub enum ViewerEvent {
    /// The web loading chain finished.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    Initialized {
        state: Box<AppState>,
        scene: Result<SceneReady, ViewerError>,
    },
    /// The GPU context could not be created.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    StartupFailed(ViewerError),
    /// A swatch element of the page was clicked.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    SwatchClicked(usize),
}

impl Debug for ViewerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized { state: _, scene } => f
                .debug_struct("Initialized")
                .field("scene_loaded", &scene.is_ok())
                .finish(),
            Self::StartupFailed(e) => f.debug_tuple("StartupFailed").field(e).finish(),
            Self::SwatchClicked(index) => f.debug_tuple("SwatchClicked").field(index).finish(),
        }
    }
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    proxy: winit::event_loop::EventLoopProxy<ViewerEvent>,
    config: ViewerConfig,
    state: Option<AppState>,
    started: bool,
    picker: SwatchPicker,
    /// A swatch picked before the scene was there to take its color.
    pending_color: Option<Color>,
    #[cfg(target_arch = "wasm32")]
    swatches: Option<crate::web::DomSwatches>,
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(event_loop: &EventLoop<ViewerEvent>, config: ViewerConfig) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new()?;
        let picker = SwatchPicker::from_config(&config.swatches);
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            config,
            state: None,
            started: false,
            picker,
            pending_color: None,
            #[cfg(target_arch = "wasm32")]
            swatches: None,
            fatal: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: ViewerError) {
        log::error!("startup failed: {}", error);
        self.fatal = Some(error.into());
        event_loop.exit();
    }

    fn install(&mut self, mut state: AppState, scene: Result<SceneReady, ViewerError>) {
        let size = state.ctx.window.inner_size();
        state.resize(size.width, size.height);
        state.install_scene(scene);
        if let Some(color) = self.pending_color.take() {
            state.set_gem_color(color);
        }
        state.ctx.window.request_redraw();
        self.state = Some(state);
    }

    fn select_swatch(&mut self, index: usize) {
        let Some(change) = self.picker.select(index) else {
            log::warn!("no swatch {}", index);
            return;
        };
        log::info!("swatch {} selected, color {}", change.activated, change.color);

        #[cfg(target_arch = "wasm32")]
        if let Some(swatches) = &self.swatches {
            swatches.sync(&self.picker);
        }

        let applied = self
            .state
            .as_mut()
            .is_some_and(|state| state.set_gem_color(change.color));
        if !applied {
            self.pending_color = Some(change.color);
        }
    }
}

impl ApplicationHandler<ViewerEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;

        let window_attributes = Window::default_attributes().with_title(&self.config.window_title);
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, ViewerError::Gpu(e.to_string()));
                return;
            }
        };

        #[cfg(target_arch = "wasm32")]
        {
            if let Err(e) = crate::web::mount_canvas(&window, &self.config.mount_id) {
                self.fail(event_loop, e);
                return;
            }
            let (swatches, picker) = crate::web::DomSwatches::bind(&self.config, &self.proxy);
            self.swatches = Some(swatches);
            self.picker = picker;
        }

        let config = self.config.clone();
        let init_future = async move {
            let ctx = Context::new(window, &config).await?;
            let scene =
                scene::assemble(&ctx.device, &ctx.queue, &ctx.material_layout, &config).await;
            Ok::<_, ViewerError>((AppState::new(ctx), scene))
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(init_future) {
                Ok((state, scene)) => self.install(state, scene),
                Err(e) => self.fail(event_loop, e),
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let event = match init_future.await {
                    Ok((state, scene)) => ViewerEvent::Initialized {
                        state: Box::new(state),
                        scene,
                    },
                    Err(e) => ViewerEvent::StartupFailed(e),
                };
                if proxy.send_event(event).is_err() {
                    log::error!("event loop closed before loading finished");
                }
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: ViewerEvent) {
        match event {
            ViewerEvent::Initialized { state, scene } => self.install(*state, scene),
            ViewerEvent::StartupFailed(e) => self.fail(event_loop, e),
            ViewerEvent::SwatchClicked(index) => self.select_swatch(index),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(code),
                    state: ElementState::Pressed,
                    repeat: false,
                    ..
                },
            ..
        } = &event
        {
            if let Some(index) = interaction::swatch_for_key(*code) {
                self.select_swatch(index);
            }
        }

        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        state.ctx.camera.controller.handle_window_events(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                state.update();
                match state.render() {
                    Ok(()) => (),
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

pub fn run(config: ViewerConfig) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| anyhow::anyhow!("Could not initialize logger: {}", e))?;
    }

    let event_loop: EventLoop<ViewerEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, config)?;

    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
