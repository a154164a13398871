use {
    crate::{
        error::{AnalyzeError, Result},
        landmark::{JOINT_COUNT, JointTable},
    },
    base::{Tensor, Vec3},
};

/// Negates Y and Z: a 180 degree rotation about the X axis.
const FLIP_YZ: Vec3<f64> = Vec3::new(1.0, -1.0, -1.0);

/// The 44 joint positions of one person, addressed by position.
#[derive(Debug, Clone, PartialEq)]
pub struct JointSet {
    points: [Vec3<f64>; JOINT_COUNT],
}

impl JointSet {
    pub fn new(points: [Vec3<f64>; JOINT_COUNT]) -> Self {
        Self { points }
    }

    /// Build from a `(44, 3)` array.
    pub fn from_tensor(tensor: &Tensor<f64>) -> Result<Self> {
        let shape_error = || AnalyzeError::Shape {
            array: "joints_3d",
            expected: "(44, 3)",
            got: tensor.shape_string(),
        };
        if tensor.shape != [JOINT_COUNT, 3] {
            return Err(shape_error());
        }
        let mut points = [Vec3::zero(); JOINT_COUNT];
        for (point, row) in points.iter_mut().zip(tensor.rows().ok_or_else(shape_error)?) {
            *point = Vec3::new(row[0], row[1], row[2]);
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Vec3<f64>; JOINT_COUNT] {
        &self.points
    }

    pub fn landmark<T: JointTable>(&self, joint: T) -> Vec3<f64> {
        self.points[joint.index()]
    }

    /// Arithmetic mean of all joints.
    pub fn center(&self) -> Vec3<f64> {
        let sum = self
            .points
            .iter()
            .fold(Vec3::zero(), |acc: Vec3<f64>, p| acc + *p);
        sum / JOINT_COUNT as f64
    }

    pub fn translated(&self, offset: Vec3<f64>) -> Self {
        self.map(|p| p + offset)
    }

    /// Rotate 180 degrees about the X axis.
    pub fn flipped(&self) -> Self {
        self.map(|p| p * FLIP_YZ)
    }

    /// Move `center` to the origin, then flip Y and Z into the viewer's
    /// coordinate convention.
    pub fn normalized(&self, center: Vec3<f64>) -> Self {
        self.map(|p| (p - center) * FLIP_YZ)
    }

    /// Lowest and highest Y coordinate.
    pub fn y_extent(&self) -> (f64, f64) {
        self.points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            })
    }

    /// Shift along Y so the vertical extent is symmetric about zero.
    pub fn vertically_centered(&self) -> Self {
        let (lo, hi) = self.y_extent();
        let offset = (hi + lo) / 2.0;
        self.map(|p| Vec3::new(p.x, p.y - offset, p.z))
    }

    /// Joints as nested `[x, y, z]` rows.
    pub fn to_nested(&self) -> Vec<[f64; 3]> {
        self.points.iter().map(|p| p.to_array()).collect()
    }

    fn map(&self, f: impl Fn(Vec3<f64>) -> Vec3<f64>) -> Self {
        Self {
            points: self.points.map(f),
        }
    }
}

/// Read a camera translation: any array holding exactly three values.
pub fn camera_translation(tensor: &Tensor<f64>) -> Result<Vec3<f64>> {
    match tensor.data.as_slice() {
        [x, y, z] if tensor.ndim() >= 1 => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(AnalyzeError::Shape {
            array: "cam_t",
            expected: "(3,)",
            got: tensor.shape_string(),
        }),
    }
}
