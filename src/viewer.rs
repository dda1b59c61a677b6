//! Standalone scene window backed by winit.
//!
//! When the `gui` feature is enabled, a wry webview panel is created
//! alongside the 3D viewport for the debug controls.
//!
//! ```no_run
//! # use lumen::Viewer;
//! Viewer::builder()
//!     .with_title("Lumen")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    bridge::{self, HostHandle, LedSink, LogLed},
    error::LumenError,
    input::InputEvent,
    options::Options,
    LumenEngine,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
    led: Option<Box<dyn LedSink>>,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Lumen", default
    /// options, logging LED sink).
    fn new() -> Self {
        Self {
            options: None,
            title: "Lumen".into(),
            led: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Route LED writes to a custom sink instead of the log.
    #[must_use]
    pub fn with_led_sink(mut self, sink: Box<dyn LedSink>) -> Self {
        self.led = Some(sink);
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options,
            title: self.title,
            led: self.led,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window hosting the scene views and debug panel.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Option<Options>,
    title: String,
    led: Option<Box<dyn LedSink>>,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Viewer`] if the event loop cannot be created
    /// or fails while running.
    pub fn run(self) -> Result<(), LumenError> {
        let event_loop =
            EventLoop::new().map_err(|e| LumenError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            host: None,
            options: self.options,
            title: self.title,
            led: self.led,
            #[cfg(feature = "gui")]
            panel: crate::gui::panel::PanelController::new(),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| LumenError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<LumenEngine>,
    host: Option<HostHandle>,
    options: Option<Options>,
    title: String,
    led: Option<Box<dyn LedSink>>,
    #[cfg(feature = "gui")]
    panel: crate::gui::panel::PanelController,
}

/// Compute the wgpu surface size — always the full window dimensions.
///
/// The webview panel overlays the right edge of the window; the surface
/// must cover the entire window to avoid stretching.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            #[allow(clippy::cast_possible_truncation)]
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            #[allow(clippy::cast_possible_truncation)]
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let (vp_w, vp_h) = viewport_size(inner);

        let sink = self
            .led
            .take()
            .unwrap_or_else(|| Box::new(LogLed::default()));
        let (host, ui_bridge) = match bridge::spawn_host(sink) {
            Ok(pair) => pair,
            Err(e) => {
                log::error!("Failed to start bridge host: {e}");
                event_loop.exit();
                return;
            }
        };

        let options = self.options.take().unwrap_or_default();
        let engine = match pollster::block_on(LumenEngine::new(
            window.clone(),
            (vp_w, vp_h),
            options,
            ui_bridge,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        #[cfg(feature = "gui")]
        self.panel
            .init_webview(&window, inner.width, inner.height, &engine);

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        self.host = Some(host);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(vp_w, vp_h);
                }
                #[cfg(feature = "gui")]
                if let Some(window) = &self.window {
                    self.panel.apply_layout(window);
                }
            }

            WindowEvent::RedrawRequested => {
                #[cfg(feature = "gui")]
                if let (Some(engine), Some(host), Some(window)) =
                    (&mut self.engine, &self.host, &self.window)
                {
                    self.panel.drain_and_apply(engine, host, window);
                }

                let now = Instant::now();

                if let Some(engine) = &mut self.engine {
                    match engine.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            if let Some(w) = &self.window {
                                let (vp_w, vp_h) =
                                    viewport_size(w.inner_size());
                                engine.resize(vp_w, vp_h);
                            }
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }

                    #[cfg(feature = "gui")]
                    {
                        if let Some(path) = engine.take_export_path() {
                            self.panel.notify_export(&path);
                        }
                        self.panel.push_stats_if_due(now, engine);
                    }
                    #[cfg(not(feature = "gui"))]
                    let _ = now;
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(engine) = &mut self.engine {
                    #[allow(clippy::cast_possible_truncation)]
                    engine.handle_input(InputEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }

                // Peek panel on hover near right edge
                #[cfg(feature = "gui")]
                if let Some(window) = &self.window {
                    #[allow(clippy::cast_possible_truncation)]
                    self.panel.update_peek(position.x as f32, window);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                use winit::keyboard::PhysicalKey;
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };

                // Toggle the debug panel with backslash
                #[cfg(feature = "gui")]
                if code == winit::keyboard::KeyCode::Backslash {
                    self.panel.toggle();
                    if let Some(window) = &self.window {
                        self.panel.apply_layout(window);
                    }
                    return;
                }

                let key_str = format!("{code:?}");
                if let Some(engine) = &mut self.engine {
                    if let Some(action) =
                        engine.options().keybindings.lookup(&key_str)
                    {
                        engine.execute_action(action);
                    }
                }
            }

            _ => (),
        }
    }
}
