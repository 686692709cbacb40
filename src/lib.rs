// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod animation;
pub mod config;
pub mod error;
pub mod gauge;
pub mod geometry;
pub mod raster;
pub mod scene;

pub use config::{Color, SpeedometerConfig};
pub use error::{GaugeError, Result};
pub use gauge::{compose, GaugeRenderer};
pub use geometry::{polar, Position, Surface};
pub use raster::{Canvas, Fonts};
pub use scene::{DrawCommand, Scene};

// External crate imports
use log::{debug, error, info, warn};
use pixels::{Pixels, SurfaceTexture};

// Standard library imports
use std::sync::Arc;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Window host for the animated gauge.
#[derive(Debug, Clone)]
pub struct Speedometer {
    config: SpeedometerConfig,
}

impl Speedometer {
    pub fn new(config: SpeedometerConfig) -> Self {
        Self { config }
    }

    /// Opens the window and redraws the gauge until it is closed.
    ///
    /// Fails immediately if the event loop, window, or pixel surface cannot
    /// be created, or if a configured font is unusable.
    pub fn show(&self) -> Result<()> {
        let fonts = Fonts::load(&self.config)?;

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                self.config.window_width as f64,
                self.config.window_height as f64,
            ))
            .build(&event_loop)?;

        let window = Arc::new(window);
        let window_clone = window.clone();

        let size = window.inner_size();
        let mut frame_size = FrameSize::new(size.width, size.height);
        let mut scale_factor = window.scale_factor();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;
        info!(
            "drawing surface ready at {}x{} px, scale {scale_factor}",
            size.width, size.height
        );

        let mut renderer = GaugeRenderer::new(self.config.show_frame_counter);
        let frame_duration = Duration::from_secs_f64(1.0 / self.config.max_framerate.max(1.0));
        let mut last_frame = Instant::now();

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        info!("closing after {} frames", renderer.frames());
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        let (width, height) = (new_size.width, new_size.height);
                        match frame_size.resize(width, height, |w, h| pixels.resize_buffer(w, h)) {
                            Ok(false) => debug!("ignoring resize to empty surface"),
                            Ok(true) => {
                                debug!("resized to {width}x{height} px");
                                if let Err(err) = pixels.resize_surface(width, height) {
                                    warn!("failed to resize surface: {err}");
                                }
                            }
                            Err(err) => warn!(
                                "failed to resize frame buffer, keeping {}x{}: {err}",
                                frame_size.width, frame_size.height
                            ),
                        }
                    }
                    WindowEvent::ScaleFactorChanged {
                        scale_factor: new_scale,
                        ..
                    } => {
                        debug!("scale factor changed to {new_scale}");
                        scale_factor = new_scale;
                    }
                    WindowEvent::RedrawRequested => {
                        let surface = Surface::from_pixels(frame_size.width, frame_size.height)
                            .with_scale(scale_factor);
                        let scene = renderer.draw(&surface);

                        let frame = pixels.frame_mut();
                        let mut canvas = Canvas::new(frame, frame_size.width, frame_size.height);
                        scene.render(&mut canvas, &fonts);

                        if let Err(err) = pixels.render() {
                            error!("failed to present frame {}: {err}", renderer.frames());
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

/// Framebuffer dimensions, kept in step with the `pixels` buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameSize {
    width: usize,
    height: usize,
}

impl FrameSize {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as usize,
            height: height as usize,
        }
    }

    /// Resizes the backing buffer through `resize_buffer` and adopts the new
    /// size only if that succeeds. Empty sizes are ignored (`Ok(false)`).
    fn resize<E>(
        &mut self,
        width: u32,
        height: u32,
        resize_buffer: impl FnOnce(u32, u32) -> Result<(), E>,
    ) -> Result<bool, E> {
        if width == 0 || height == 0 {
            return Ok(false);
        }
        resize_buffer(width, height)?;
        *self = Self::new(width, height);
        Ok(true)
    }
}
