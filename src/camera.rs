//! Camera and projection state for view/projection matrices.

use cgmath::{EuclideanSpace, Matrix4, Point3, Rad};

use crate::math;

/// A fixed-position camera looking down the negative z axis.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub position: Point3<f32>,
}

impl Camera {
    pub fn new<P: Into<Point3<f32>>>(position: P) -> Self {
        Self {
            position: position.into(),
        }
    }

    /// World-to-view transform: the inverse of the camera's placement.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        math::translation(-self.position.to_vec())
    }
}

/// Perspective projection parameters, resized with the surface.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    aspect: f32,
    fov_y: Rad<f32>,
    z_near: f32,
    z_far: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fov_y: F, z_near: f32, z_far: f32) -> Self {
        Self {
            aspect: width as f32 / height as f32,
            fov_y: fov_y.into(),
            z_near,
            z_far,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        math::perspective(self.fov_y, self.aspect, self.z_near, self.z_far)
    }
}
