//! Math utilities and types
//!
//! Provides the fundamental math types used for scene geometry. All
//! distances are meters, all angles handed to the engine are degrees.

pub use nalgebra::{Vector2, Vector3, Matrix3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// World axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Axis {
    /// X axis (right)
    X,
    /// Y axis (back)
    Y,
    /// Z axis (up)
    Z,
}

impl Axis {
    /// All three axes in index order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis in a `Vec3`
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Upper-case axis label
    pub const fn label(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }

    /// Unit vector along this axis
    pub fn unit(self) -> Vec3 {
        let mut v = Vec3::zeros();
        v[self.index()] = 1.0;
        v
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::*;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Rotation matrix for XYZ Euler angles given in degrees
    ///
    /// Angles are applied X first, then Y, then Z (`R = Rz * Ry * Rx`),
    /// matching the extrinsic XYZ convention of common DCC tools.
    pub fn euler_xyz_degrees(rotation: Vec3) -> Mat3 {
        let rx = nalgebra::Rotation3::from_axis_angle(&Vec3::x_axis(), deg_to_rad(rotation.x));
        let ry = nalgebra::Rotation3::from_axis_angle(&Vec3::y_axis(), deg_to_rad(rotation.y));
        let rz = nalgebra::Rotation3::from_axis_angle(&Vec3::z_axis(), deg_to_rad(rotation.z));
        (rz * ry * rx).into_inner()
    }

    /// Horizontal (XY) distance between two points
    pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
        Vec2::new(a.x - b.x, a.y - b.y).magnitude()
    }
}
