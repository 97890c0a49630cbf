use approx::assert_relative_eq;
use shoal::math;
use shoal::{Deg, Matrix3, Matrix4, Rad, SquareMatrix, Vector3, Vector4};

#[test]
fn uniform_scale_scales_each_axis() {
    let scaled = math::uniform_scale(2.5) * Vector4::new(1.0, 1.0, 1.0, 1.0);
    assert_relative_eq!(scaled, Vector4::new(2.5, 2.5, 2.5, 1.0));
}

#[test]
fn translation_moves_the_origin() {
    let moved = math::translation(Vector3::new(1.0, -2.0, 3.0)) * Vector4::new(0.0, 0.0, 0.0, 1.0);
    assert_relative_eq!(moved, Vector4::new(1.0, -2.0, 3.0, 1.0));
}

#[test]
fn opposite_rotations_cancel() {
    for angle in [0.0f32, 0.3, 1.2, 2.9] {
        let composed = math::rotation_about(Vector3::unit_y(), Rad(angle))
            * math::rotation_about(Vector3::unit_y(), Rad(-angle));
        assert_relative_eq!(composed, Matrix4::identity(), epsilon = 1e-6);
    }
}

#[test]
fn rotation_about_y_turns_x_towards_negative_z() {
    let turned = math::rotation_about(Vector3::unit_y(), Deg(90.0))
        * Vector4::new(1.0, 0.0, 0.0, 0.0);
    assert_relative_eq!(turned, Vector4::new(0.0, 0.0, -1.0, 0.0), epsilon = 1e-6);
}

#[test]
fn perspective_maps_near_and_far_onto_the_depth_range() {
    let near = 0.1;
    let far = 100.0;
    let projection = math::perspective(Deg(60.0), 16.0 / 9.0, near, far);

    let on_near_plane = projection * Vector4::new(0.0, 0.0, -near, 1.0);
    assert_relative_eq!(on_near_plane.z / on_near_plane.w, 0.0, epsilon = 1e-6);

    let on_far_plane = projection * Vector4::new(0.0, 0.0, -far, 1.0);
    assert_relative_eq!(on_far_plane.z / on_far_plane.w, 1.0, epsilon = 1e-4);
}

#[test]
fn perspective_keeps_points_on_the_view_axis_centered() {
    let projection = math::perspective(Deg(45.0), 2.0, 0.5, 50.0);
    let projected = projection * Vector4::new(0.0, 0.0, -10.0, 1.0);
    assert_relative_eq!(projected.x, 0.0);
    assert_relative_eq!(projected.y, 0.0);
    // w carries the view-space depth for the divide
    assert_relative_eq!(projected.w, 10.0, epsilon = 1e-5);
}

#[test]
fn normal_matrix_of_a_rotation_is_the_rotation_itself() {
    let rotation = math::rotation_about(Vector3::unit_y(), Rad(0.7));
    let normal = math::normal_matrix(&rotation);
    let upper_left = Matrix3::from_cols(
        rotation.x.truncate(),
        rotation.y.truncate(),
        rotation.z.truncate(),
    );
    assert_relative_eq!(normal, upper_left, epsilon = 1e-6);
}

#[test]
fn normal_matrix_inverts_a_uniform_scale() {
    let normal = math::normal_matrix(&math::uniform_scale(2.0));
    assert_relative_eq!(
        normal,
        Matrix3::from_diagonal(Vector3::new(0.5, 0.5, 0.5)),
        epsilon = 1e-6
    );
}
