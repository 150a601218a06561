/*

    Declare the pinhole Camera used by the preview renderer.

    @date: Oct, 2025
    @author: bartu
*/

use crate::error::{Result, SceneError};
use crate::prelude::*;
use crate::ray::Ray;

#[derive(Debug, Deserialize, Clone)]
#[derive(SmartDefault)]
#[serde(default)]
pub struct Camera {
    #[default(Vector3::new(0.0, 1.0, 4.0))]
    #[serde(rename = "Position", deserialize_with = "deser_vec3")]
    position: Vector3,

    #[default(Vector3::new(0.0, 0.0, -1.0))]
    #[serde(rename = "Gaze", deserialize_with = "deser_vec3")]
    gaze_dir: Vector3,

    #[default(Vector3::Y)]
    #[serde(rename = "Up", deserialize_with = "deser_vec3")]
    up: Vector3,

    #[default = 45.0]
    #[serde(rename = "FovY", deserialize_with = "deser_float")]
    fovy: Float,

    #[default([256, 256])]
    #[serde(rename = "ImageResolution", deserialize_with = "deser_usize_pair")]
    pub image_resolution: [usize; 2],

    #[default = "output.png"]
    #[serde(rename = "ImageName")]
    pub image_name: String,

    #[default = 16]
    #[serde(rename = "NumSamples", deserialize_with = "deser_usize")]
    pub num_samples: usize,

    #[serde(skip)]
    w: Vector3,

    #[serde(skip)]
    v: Vector3,

    #[serde(skip)]
    u: Vector3,

    #[serde(skip)]
    half_extent: Vector2,
}

impl Camera {
    pub fn setup(&mut self) -> Result<()> {
        // Compute w, v, u vectors
        // corrects Up vector if given Up was not perpendicular to
        // Gaze vector.
        let [width, height] = self.image_resolution;
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidCamera(format!("resolution {width}x{height}")));
        }
        if self.num_samples == 0 {
            return Err(SceneError::InvalidCamera("NumSamples must be positive".to_string()));
        }
        if !(self.fovy > 0.0 && self.fovy < 180.0) {
            return Err(SceneError::InvalidCamera(format!("FovY {} is out of (0, 180)", self.fovy)));
        }
        if approx_zero(self.gaze_dir.length()) || approx_zero(self.gaze_dir.cross(self.up).length()) {
            return Err(SceneError::InvalidCamera("Gaze must be non-zero and not parallel to Up".to_string()));
        }

        self.w = -self.gaze_dir.normalize();
        self.u = self.up.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        let top = (self.fovy.to_radians() / 2.0).tan();
        let aspect = width as Float / height as Float;
        self.half_extent = Vector2::new(top * aspect, top);

        debug_assert!(approx_zero(self.u.dot(self.w)));
        debug_assert!(approx_zero(self.v.dot(self.w)));
        debug_assert!(approx_zero(self.v.dot(self.u)));
        debug!("Camera position {:?}, basis u={:?} v={:?} w={:?}", self.position, self.u, self.v, self.w);
        Ok(())
    }

    pub fn get_resolution(&self) -> (usize, usize) {
        (self.image_resolution[0], self.image_resolution[1])
    }

    /// Ray through pixel (col, row) offset by `jitter` in [0,1)^2.
    /// Row 0 is the top of the image.
    pub fn generate_ray(&self, col: usize, row: usize, jitter: Vector2) -> Ray {
        let (width, height) = self.get_resolution();
        let s = (col as Float + jitter.x) / width as Float;
        let t = (row as Float + jitter.y) / height as Float;
        let x = (2.0 * s - 1.0) * self.half_extent.x;
        let y = (1.0 - 2.0 * t) * self.half_extent.y;
        let direction = (self.u * x + self.v * y - self.w).normalize();
        Ray::new_from(self.position, direction)
    }
}
