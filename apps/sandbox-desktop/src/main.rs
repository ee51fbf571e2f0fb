mod gamepads;
mod surface;

use anyhow::Result;
use clap::Parser;
use gamepads::GilrsGamepads;
use sandbox_camera::{FlyCamera, SandboxConfig, bind_free_cam};
use sandbox_input::{
    EventHub, GamepadSource, InputSystem, PointerButton, RawEvent, Subscription, VirtualGamepads,
};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;
use surface::WindowCapture;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{
    DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "sandbox-desktop", about = "Desktop input sandbox")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML or JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Window-bound state, created once the event loop resumes.
struct Session {
    window: Arc<Window>,
    input: Rc<RefCell<InputSystem>>,
    subscription: Subscription,
    title: String,
}

struct SandboxApp {
    config: SandboxConfig,
    camera: Rc<RefCell<FlyCamera>>,
    hub: EventHub,
    session: Option<Session>,
    gamepads: Option<GilrsGamepads>,
    // Stand-in source when gilrs is unavailable.
    no_gamepads: VirtualGamepads,
    last_frame: Instant,
}

impl SandboxApp {
    fn new(config: SandboxConfig) -> Self {
        let camera = Rc::new(RefCell::new(FlyCamera::new(&config.free_cam)));
        Self {
            config,
            camera,
            hub: EventHub::new(),
            session: None,
            gamepads: GilrsGamepads::new(),
            no_gamepads: VirtualGamepads::new(),
            last_frame: Instant::now(),
        }
    }

    fn emit(&mut self, event: RawEvent) {
        if let Err(e) = self.hub.emit(&event) {
            tracing::error!("input reaction failed: {e}");
        }
    }

    fn is_captured(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.input.borrow().is_captured())
    }

    /// One tick: gamepad poll, then camera update, then present.
    fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;

        let pad_events = self
            .gamepads
            .as_mut()
            .map(GilrsGamepads::pump)
            .unwrap_or_default();
        for event in pad_events {
            self.emit(event);
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };
        let source: &dyn GamepadSource = match &self.gamepads {
            Some(gamepads) => gamepads,
            None => &self.no_gamepads,
        };
        if let Err(e) = session.input.borrow_mut().tick(source) {
            tracing::error!("gamepad reaction failed: {e}");
        }

        let mut camera = self.camera.borrow_mut();
        camera.update(dt);
        present(session, &camera);
    }
}

/// Publish the camera pose. Drawing the scene is the renderer's business;
/// the sandbox shows where the camera is.
fn present(session: &mut Session, camera: &FlyCamera) {
    let p = camera.position;
    let title = format!(
        "Sandbox | pos ({:.1}, {:.1}, {:.1}) yaw {:.0}\u{b0} pitch {:.0}\u{b0}{}",
        p.x,
        p.y,
        p.z,
        camera.yaw.to_degrees(),
        camera.pitch.to_degrees(),
        if session.input.borrow().is_captured() {
            " | Esc releases pointer"
        } else {
            ""
        }
    );
    if title != session.title {
        tracing::trace!(%title, "camera moved");
        session.window.set_title(&title);
        session.title = title;
    }
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Left,
        MouseButton::Middle => PointerButton::Middle,
        MouseButton::Right => PointerButton::Right,
        MouseButton::Back => PointerButton::Other(3),
        MouseButton::Forward => PointerButton::Other(4),
        MouseButton::Other(n) => PointerButton::Other(n),
    }
}

impl ApplicationHandler for SandboxApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Sandbox")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let mut input = InputSystem::new(
            &self.config.input,
            Box::new(WindowCapture::new(Arc::clone(&window))),
        );
        bind_free_cam(&mut input, &self.camera, &self.config.free_cam);
        let input = Rc::new(RefCell::new(input));
        let subscription = InputSystem::attach(&input, &mut self.hub);

        self.session = Some(Session {
            window,
            input,
            subscription,
            title: String::new(),
        });

        let present_pads = self
            .gamepads
            .as_mut()
            .map(GilrsGamepads::connected)
            .unwrap_or_default();
        for event in present_pads {
            self.emit(event);
        }

        tracing::info!("window ready; click to capture the pointer");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(session) = self.session.take() {
                    session.subscription.detach(&mut self.hub);
                }
                event_loop.exit();
            }
            WindowEvent::Focused(false) => {
                if let Some(session) = &self.session {
                    session.input.borrow_mut().focus_lost();
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                if key == KeyCode::Escape && state == ElementState::Pressed {
                    if let Some(session) = &self.session {
                        session.input.borrow_mut().release_capture();
                    }
                }
                let code = format!("{key:?}");
                let event = match state {
                    ElementState::Pressed => RawEvent::KeyDown { code, repeat },
                    ElementState::Released => RawEvent::KeyUp { code },
                };
                self.emit(event);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.emit(RawEvent::PointerButton {
                    button: pointer_button(button),
                    pressed: state == ElementState::Pressed,
                });
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports scrolling up as positive.
                let y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                if y != 0.0 {
                    self.emit(RawEvent::Wheel { delta_y: -y });
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.emit(RawEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }
            WindowEvent::RedrawRequested => {
                self.frame();
                if let Some(session) = &self.session {
                    session.window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.is_captured() {
                self.emit(RawEvent::PointerMove {
                    dx: delta.0 as f32,
                    dy: delta.1 as f32,
                });
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(session) = &self.session {
            session.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = SandboxConfig::load(cli.config.as_deref())?;
    tracing::info!("sandbox-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = SandboxApp::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
