mod common;

use base::{Tensor, Vec3};
use common::{assert_close, assert_vec_close, joints_tensor, joints_with, scattered_joints};
use proportion::{AnalyzeError, JOINT_COUNT, JointSet, Landmark};

#[test]
fn test_from_tensor_reads_rows() {
    let joints = scattered_joints(3);
    let rebuilt = JointSet::from_tensor(&joints_tensor(&joints)).unwrap();
    assert_eq!(rebuilt, joints);
}

#[test]
fn test_from_tensor_rejects_wrong_shape() {
    let tensor = Tensor::new(vec![43, 3], vec![0.0; 129]).unwrap();
    let err = JointSet::from_tensor(&tensor).unwrap_err();
    assert!(matches!(err, AnalyzeError::Shape { .. }));
    assert_eq!(err.to_string(), "joints_3d has shape (43, 3), expected (44, 3)");
}

#[test]
fn test_from_tensor_rejects_flat_array() {
    let tensor = Tensor::new(vec![132], vec![0.0; 132]).unwrap();
    assert!(JointSet::from_tensor(&tensor).is_err());
}

#[test]
fn test_center_is_mean() {
    let joints = joints_with(&[(0, [44.0, 0.0, 0.0]), (1, [0.0, 88.0, -44.0])]);
    assert_vec_close(joints.center(), Vec3::new(1.0, 2.0, -1.0));
}

#[test]
fn test_center_is_translation_invariant() {
    let joints = scattered_joints(11);
    let offset = Vec3::new(3.5, -12.25, 0.75);
    let moved = joints.translated(offset);
    assert_vec_close(moved.center(), joints.center() + offset);
}

#[test]
fn test_flip_is_involution() {
    let joints = scattered_joints(5);
    assert_eq!(joints.flipped().flipped(), joints);
}

#[test]
fn test_flip_negates_y_and_z_only() {
    let joints = joints_with(&[(4, [1.0, 2.0, 3.0])]);
    assert_eq!(joints.flipped().points()[4], Vec3::new(1.0, -2.0, -3.0));
}

#[test]
fn test_normalized_moves_center_to_origin() {
    let joints = scattered_joints(7);
    let normalized = joints.normalized(joints.center());
    assert_vec_close(normalized.center(), Vec3::zero());
}

#[test]
fn test_normalized_subtracts_then_flips() {
    let joints = joints_with(&[(0, [2.0, 3.0, 4.0])]);
    let normalized = joints.normalized(Vec3::new(1.0, 1.0, 1.0));
    assert_eq!(normalized.points()[0], Vec3::new(1.0, -2.0, -3.0));
    assert_eq!(normalized.points()[1], Vec3::new(-1.0, 1.0, 1.0));
}

#[test]
fn test_vertical_centering_balances_extent() {
    for seed in 0..20 {
        let joints = scattered_joints(seed);
        let centered = joints.normalized(joints.center()).vertically_centered();
        let (lo, hi) = centered.y_extent();
        assert!((hi + lo).abs() < 1e-12, "seed {seed}: {lo} + {hi} != 0");
    }
}

#[test]
fn test_vertical_centering_keeps_x_and_z() {
    let joints = scattered_joints(9);
    let centered = joints.vertically_centered();
    for (before, after) in joints.points().iter().zip(centered.points()) {
        assert_eq!(before.x, after.x);
        assert_eq!(before.z, after.z);
    }
    // every point moves by the same amount
    let shift = centered.points()[0].y - joints.points()[0].y;
    for (before, after) in joints.points().iter().zip(centered.points()) {
        assert_close(after.y - before.y, shift);
    }
}

#[test]
fn test_landmark_lookup() {
    let joints = joints_with(&[(17, [1.0, 0.0, 0.0]), (18, [-1.0, 0.0, 0.0])]);
    assert_eq!(joints.landmark(Landmark::LeftShoulder), Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(joints.landmark(Landmark::RightShoulder), Vec3::new(-1.0, 0.0, 0.0));
}

#[test]
fn test_to_nested_has_all_rows() {
    let nested = scattered_joints(2).to_nested();
    assert_eq!(nested.len(), JOINT_COUNT);
}

#[test]
fn test_camera_translation_shapes() {
    let flat = Tensor::new(vec![3], vec![1.0, 2.0, 3.0]).unwrap();
    let row = Tensor::new(vec![1, 3], vec![1.0, 2.0, 3.0]).unwrap();
    let expected = Vec3::new(1.0, 2.0, 3.0);
    assert_eq!(proportion::joints::camera_translation(&flat).unwrap(), expected);
    assert_eq!(proportion::joints::camera_translation(&row).unwrap(), expected);

    let wrong = Tensor::new(vec![2], vec![1.0, 2.0]).unwrap();
    let err = proportion::joints::camera_translation(&wrong).unwrap_err();
    assert_eq!(err.to_string(), "cam_t has shape (2,), expected (3,)");
}
