//! Fundamental geometric and simulation types.

use glam::{DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

/// 3D vector in world space. y is up (altitude); x/z span the sea plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Euler-angle orientation (radians): pitch about x, yaw about y, roll about z.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Distance to another point (3D).
    pub fn distance_to(&self, other: &Vec3) -> f64 {
        self.sub(other).length()
    }

    /// Horizontal distance (ignoring altitude).
    pub fn horizontal_distance_to(&self, other: &Vec3) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    pub fn add(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(&self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Unit vector toward `other`, or zero when the points coincide
    /// (epsilon guard, never NaN).
    pub fn direction_to(&self, other: &Vec3) -> Vec3 {
        other.sub(self).normalized_or_zero()
    }

    /// Normalized copy, or zero for degenerate input.
    pub fn normalized_or_zero(&self) -> Vec3 {
        let len = self.length();
        if len < 1e-9 {
            Vec3::ZERO
        } else {
            self.scale(1.0 / len)
        }
    }

    /// Linear interpolation toward `other` by factor `t`.
    pub fn lerp(&self, other: &Vec3, t: f64) -> Vec3 {
        self.add(&other.sub(self).scale(t))
    }

    pub fn to_glam(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    pub fn from_glam(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Orientation {
    pub fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Rotation quaternion for this orientation (XYZ Euler order,
    /// matching a rotation matrix built pitch-then-yaw-then-roll).
    pub fn quat(&self) -> DQuat {
        DQuat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, self.roll)
    }

    /// Forward basis vector (+z in body space).
    pub fn forward(&self) -> Vec3 {
        Vec3::from_glam(self.quat() * DVec3::Z)
    }

    /// Up basis vector (+y in body space).
    pub fn up(&self) -> Vec3 {
        Vec3::from_glam(self.quat() * DVec3::Y)
    }

    /// Right basis vector (+x in body space).
    pub fn right(&self) -> Vec3 {
        Vec3::from_glam(self.quat() * DVec3::X)
    }
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
