//! Orbit camera, its input controller and the GPU uniform.
//!
//! The camera stores its position as spherical coordinates around a target
//! point. [`OrbitController`] turns mouse, wheel and touch input into rotate,
//! dolly and pan deltas that are applied once per frame in
//! [`OrbitController::update`].

use std::f32::consts::PI;

use cgmath::{InnerSpace, Matrix4, Point3, Rad, Vector3, perspective};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent},
};

use crate::config::CameraConfig;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Keeps the camera from flipping over the poles.
const POLAR_EPSILON: f32 = 1e-6;

/// Perspective projection. `fovy` is the vertical field of view.
#[derive(Debug, Clone)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fovy(&self) -> Rad<f32> {
        self.fovy
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// A camera orbiting `target` at `radius`.
///
/// `theta` is the azimuth around the y axis measured from +z, `phi` the polar
/// angle measured from +y.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Point3<f32>,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl OrbitCamera {
    pub fn new(position: Point3<f32>, target: Point3<f32>) -> Self {
        let offset = position - target;
        let radius = offset.magnitude();
        let (theta, phi) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };
        Self {
            target,
            radius,
            theta,
            phi,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(config.position.into(), config.target.into())
    }

    pub fn position(&self) -> Point3<f32> {
        let sin_phi = self.phi.sin();
        self.target
            + Vector3::new(
                self.radius * sin_phi * self.theta.sin(),
                self.radius * self.phi.cos(),
                self.radius * sin_phi * self.theta.cos(),
            )
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position(), self.target, Vector3::unit_y())
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &OrbitCamera, projection: &Projection) {
        self.view_position = camera.position().to_homogeneous().into();
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// The pointer gesture currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    None,
    Rotate,
    Pan,
}

/// Translates input into orbit motion, matching the common orbit-controls
/// defaults: left drag rotates, right drag pans, wheel dollies.
#[derive(Debug)]
pub struct OrbitController {
    rotate_speed: f32,
    zoom_speed: f32,
    pan_speed: f32,
    gesture: Gesture,
    cursor: Option<PhysicalPosition<f64>>,
    touch: Option<(u64, PhysicalPosition<f64>)>,
    viewport_height: f32,
    rotate_left: f32,
    rotate_up: f32,
    scale: f32,
    pan: (f32, f32),
}

impl OrbitController {
    pub fn new(viewport_height: u32) -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            gesture: Gesture::None,
            cursor: None,
            touch: None,
            viewport_height: viewport_height.max(1) as f32,
            rotate_left: 0.0,
            rotate_up: 0.0,
            scale: 1.0,
            pan: (0.0, 0.0),
        }
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height.max(1) as f32;
    }

    /// Rotation for a pointer drag of `dx`, `dy` pixels. A drag over the full
    /// viewport height is one full turn.
    pub fn handle_drag(&mut self, dx: f64, dy: f64) {
        let per_pixel = 2.0 * PI * self.rotate_speed / self.viewport_height;
        self.rotate_left += dx as f32 * per_pixel;
        self.rotate_up += dy as f32 * per_pixel;
    }

    pub fn handle_pan(&mut self, dx: f64, dy: f64) {
        self.pan.0 += dx as f32 * self.pan_speed;
        self.pan.1 += dy as f32 * self.pan_speed;
    }

    /// Positive `lines` moves towards the target.
    pub fn handle_scroll(&mut self, lines: f32) {
        let step = 0.95f32.powf(self.zoom_speed);
        self.scale *= step.powf(lines);
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                self.gesture = match (button, state) {
                    (MouseButton::Left, ElementState::Pressed) => Gesture::Rotate,
                    (MouseButton::Right | MouseButton::Middle, ElementState::Pressed) => {
                        Gesture::Pan
                    }
                    (_, ElementState::Released) => Gesture::None,
                    _ => self.gesture,
                };
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(last) = self.cursor {
                    let (dx, dy) = (position.x - last.x, position.y - last.y);
                    match self.gesture {
                        Gesture::Rotate => self.handle_drag(dx, dy),
                        Gesture::Pan => self.handle_pan(dx, dy),
                        Gesture::None => (),
                    }
                }
                self.cursor = Some(*position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.gesture = Gesture::None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.handle_scroll(lines);
            }
            WindowEvent::Touch(touch) => match touch.phase {
                TouchPhase::Started if self.touch.is_none() => {
                    self.touch = Some((touch.id, touch.location));
                }
                TouchPhase::Moved => {
                    if let Some((id, last)) = self.touch {
                        if id == touch.id {
                            self.handle_drag(touch.location.x - last.x, touch.location.y - last.y);
                            self.touch = Some((id, touch.location));
                        }
                    }
                }
                TouchPhase::Ended | TouchPhase::Cancelled => {
                    if matches!(self.touch, Some((id, _)) if id == touch.id) {
                        self.touch = None;
                    }
                }
                _ => (),
            },
            _ => (),
        }
    }

    /// Apply the accumulated input to `camera` and reset it.
    pub fn update(&mut self, camera: &mut OrbitCamera, projection: &Projection) {
        camera.theta -= self.rotate_left;
        camera.phi = (camera.phi - self.rotate_up).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        camera.radius = (camera.radius * self.scale).max(f32::EPSILON);

        let (dx, dy) = self.pan;
        if dx != 0.0 || dy != 0.0 {
            // Move the target in the view plane by the distance a pixel covers at the target
            let half_height = camera.radius * (projection.fovy().0 / 2.0).tan();
            let per_pixel = 2.0 * half_height / self.viewport_height;
            let forward = (camera.target - camera.position()).normalize();
            let right = forward.cross(Vector3::unit_y()).normalize();
            let up = right.cross(forward);
            camera.target += (-right * dx + up * dy) * per_pixel;
        }

        self.rotate_left = 0.0;
        self.rotate_up = 0.0;
        self.scale = 1.0;
        self.pan = (0.0, 0.0);
    }
}

#[derive(Debug)]
pub struct CameraResources {
    pub camera: OrbitCamera,
    pub controller: OrbitController,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}
