//! Transform matrix construction.
//!
//! Pure helpers for the handful of matrices the scene graph composes every
//! frame: uniform scale, rotation about an arbitrary axis, translation, and
//! a right-handed perspective projection. Matrices multiply column vectors,
//! so chains read right to left and a child's world transform is
//! `parent_world * local`.

use cgmath::{Matrix, Matrix3, Matrix4, Rad, SquareMatrix, Vector3};

/// Uniform scale by `s` on x/y/z.
pub fn uniform_scale(s: f32) -> Matrix4<f32> {
    Matrix4::from_scale(s)
}

/// Rotation of `angle` about `axis`.
///
/// The axis is expected to be unit length; a zero-length axis produces a
/// meaningless matrix and is not checked.
pub fn rotation_about<A: Into<Rad<f32>>>(axis: Vector3<f32>, angle: A) -> Matrix4<f32> {
    Matrix4::from_axis_angle(axis, angle)
}

/// Translation by `t`.
pub fn translation(t: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::from_translation(t)
}

/// Right-handed perspective projection mapping view-space depth
/// `[-near_z, -far_z]` to clip depth `[0, 1]`, wgpu's depth range.
///
/// Requires `near_z > 0`, `far_z > near_z` and a field of view inside
/// `(0, PI)`; none of these are checked.
pub fn perspective<A: Into<Rad<f32>>>(
    fov_y: A,
    aspect: f32,
    near_z: f32,
    far_z: f32,
) -> Matrix4<f32> {
    let y_scale = 1.0 / (fov_y.into().0 * 0.5).tan();
    let x_scale = y_scale / aspect;
    let z_scale = far_z / (near_z - far_z);
    let wz_scale = near_z * far_z / (near_z - far_z);

    #[rustfmt::skip]
    let matrix = Matrix4::new(
        x_scale, 0.0,     0.0,      0.0,
        0.0,     y_scale, 0.0,      0.0,
        0.0,     0.0,     z_scale,  -1.0,
        0.0,     0.0,     wz_scale, 0.0,
    );
    matrix
}

/// Normal matrix of `model`: the inverse transpose of its upper-left 3x3.
///
/// The model transform must be non-degenerate. A singular 3x3 block trips a
/// debug assertion; release builds fall back to the identity basis instead
/// of emitting NaN.
pub fn normal_matrix(model: &Matrix4<f32>) -> Matrix3<f32> {
    let upper_left = Matrix3::from_cols(
        model.x.truncate(),
        model.y.truncate(),
        model.z.truncate(),
    );
    match upper_left.invert() {
        Some(inverse) => inverse.transpose(),
        None => {
            debug_assert!(false, "normal matrix requested for a degenerate transform");
            Matrix3::identity()
        }
    }
}
