use crate::foundation::math::wrap_degrees;

/// Plain 3-component vector in object or view space.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn rotate_x(self, rad: f64) -> Self {
        let (s, c) = rad.sin_cos();
        Self {
            x: self.x,
            y: self.y * c - self.z * s,
            z: self.y * s + self.z * c,
        }
    }

    pub fn rotate_y(self, rad: f64) -> Self {
        let (s, c) = rad.sin_cos();
        Self {
            x: self.x * c + self.z * s,
            y: self.y,
            z: -self.x * s + self.z * c,
        }
    }

    pub fn rotate_z(self, rad: f64) -> Self {
        let (s, c) = rad.sin_cos();
        Self {
            x: self.x * c - self.y * s,
            y: self.x * s + self.y * c,
            z: self.z,
        }
    }
}

/// Accumulated viewer rotation in degrees, each axis wrapped to `[0, 360)`.
///
/// Owned by the animation driver; the projector only reads it.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RotationState {
    pub rot_x: f64,
    pub rot_y: f64,
    pub rot_z: f64,
}

impl RotationState {
    pub fn new(rot_x: f64, rot_y: f64, rot_z: f64) -> Self {
        Self {
            rot_x: wrap_degrees(rot_x),
            rot_y: wrap_degrees(rot_y),
            rot_z: wrap_degrees(rot_z),
        }
    }

    /// Advance each axis by `speed * dt` (deg/s times seconds).
    pub fn advance(&mut self, speeds_deg_per_sec: [f64; 3], dt_secs: f64) {
        self.rot_x = wrap_degrees(self.rot_x + speeds_deg_per_sec[0] * dt_secs);
        self.rot_y = wrap_degrees(self.rot_y + speeds_deg_per_sec[1] * dt_secs);
        self.rot_z = wrap_degrees(self.rot_z + speeds_deg_per_sec[2] * dt_secs);
    }

    /// Rotate X, then Y, then Z. `z_offset_deg` is added to the Z angle.
    pub fn apply(&self, v: Vec3, z_offset_deg: f64) -> Vec3 {
        v.rotate_x(self.rot_x.to_radians())
            .rotate_y(self.rot_y.to_radians())
            .rotate_z((self.rot_z + z_offset_deg).to_radians())
    }
}

/// In-plane rotation: `(x cosθ − y sinθ, x sinθ + y cosθ)`.
pub fn rotate_2d(x: f64, y: f64, theta: f64) -> (f64, f64) {
    let (s, c) = theta.sin_cos();
    (x * c - y * s, x * s + y * c)
}

#[cfg(test)]
#[path = "../../tests/unit/project/rotation.rs"]
mod tests;
