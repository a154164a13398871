#![allow(dead_code)]

use base::{Tensor, Vec3};
use npz::NpzWriter;
use proportion::{JOINT_COUNT, JointSet};
use std::path::PathBuf;

/// All-zero joint set with the given positions overridden.
pub fn joints_with(overrides: &[(usize, [f64; 3])]) -> JointSet {
    let mut points = [Vec3::zero(); JOINT_COUNT];
    for &(index, point) in overrides {
        points[index] = Vec3::from_array(point);
    }
    JointSet::new(points)
}

/// Deterministic pseudo-random joint set spread over roughly a human's size.
pub fn scattered_joints(seed: u64) -> JointSet {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((state >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
    };
    let mut points = [Vec3::zero(); JOINT_COUNT];
    for point in points.iter_mut() {
        *point = Vec3::new(next() * 0.4, next() * 0.9 + 0.3, next() * 0.2 + 5.0);
    }
    JointSet::new(points)
}

pub fn joints_tensor(joints: &JointSet) -> Tensor<f64> {
    let data = joints.points().iter().flat_map(|p| p.to_array()).collect();
    Tensor::new(vec![JOINT_COUNT, 3], data).unwrap()
}

pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("physique-{}-{}.npz", std::process::id(), name))
}

/// Write an `.npz` bundle holding the given arrays.
pub fn write_bundle(name: &str, arrays: &[(&str, Tensor<f64>)]) -> PathBuf {
    let path = temp_path(name);
    let mut writer = NpzWriter::create(&path).unwrap();
    for (key, tensor) in arrays {
        writer.add(key, tensor).unwrap();
    }
    writer.finish().unwrap();
    path
}

pub fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

pub fn assert_vec_close(a: Vec3<f64>, b: Vec3<f64>) {
    assert_close(a.x, b.x);
    assert_close(a.y, b.y);
    assert_close(a.z, b.z);
}
