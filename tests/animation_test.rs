use std::f32::consts::TAU;

use approx::assert_relative_eq;
use shoal::animation;
use shoal::data_structures::scene_graph::{Node, Scene};
use shoal::math;
use shoal::{Matrix4, Rad, Vector3, Vector4};

const FISH_COUNT: usize = 12;

fn reference_scene(fish_count: usize) -> Scene {
    let mut scene = Scene::new();
    scene.root.add_child(Node::new(animation::BOB_NODE));
    for index in 1..=fish_count {
        scene.root.add_child(Node::new(animation::blub_name(index)));
    }
    scene
}

fn local_transforms(scene: &Scene, fish_count: usize) -> Vec<Matrix4<f32>> {
    let mut transforms = vec![
        scene.root.local_transform,
        scene
            .find_node(animation::BOB_NODE)
            .expect("Bob is in the scene")
            .local_transform,
    ];
    for index in 1..=fish_count {
        transforms.push(
            scene
                .find_node(&animation::blub_name(index))
                .expect("every fish is in the scene")
                .local_transform,
        );
    }
    transforms
}

#[test]
fn advance_is_bit_identical_for_equal_times() {
    let mut first = reference_scene(FISH_COUNT);
    let mut second = reference_scene(FISH_COUNT);

    for step in 0..240 {
        let time = step as f32 / 60.0;
        animation::advance(&mut first, time, FISH_COUNT);
        animation::advance(&mut second, time, FISH_COUNT);
    }
    // Replaying the last instant must not change anything either
    animation::advance(&mut second, 239.0 / 60.0, FISH_COUNT);

    assert_eq!(
        local_transforms(&first, FISH_COUNT),
        local_transforms(&second, FISH_COUNT)
    );
}

#[test]
fn orbit_phases_cover_the_circle_evenly() {
    let phases: Vec<f32> = (1..=FISH_COUNT)
        .map(|index| animation::orbit_phase(index, FISH_COUNT))
        .collect();

    for (i, phase) in phases.iter().enumerate() {
        assert_eq!(*phase, TAU / FISH_COUNT as f32 * i as f32);
    }
    for pair in phases.windows(2) {
        assert_relative_eq!(pair[1] - pair[0], TAU / FISH_COUNT as f32, epsilon = 1e-6);
    }
}

#[test]
fn fish_transforms_differ_per_index() {
    let at_start: Vec<Matrix4<f32>> = (1..=FISH_COUNT)
        .map(|index| animation::blub_transform(0.0, index, FISH_COUNT))
        .collect();
    for i in 0..at_start.len() {
        for j in (i + 1)..at_start.len() {
            assert_ne!(at_start[i], at_start[j]);
        }
    }
}

#[test]
fn root_spins_backwards_and_halves_scale() {
    let time = 0.8;
    assert_eq!(
        animation::root_transform(time),
        math::rotation_about(Vector3::unit_y(), Rad(-time)) * math::uniform_scale(0.5)
    );

    // A point on the y axis is unaffected by the spin, only by the scale
    let up = animation::root_transform(time) * Vector4::new(0.0, 1.0, 0.0, 0.0);
    assert_relative_eq!(up, Vector4::new(0.0, 0.5, 0.0, 0.0));
}

#[test]
fn bob_oscillates_vertically() {
    for step in 0..120 {
        let time = step as f32 / 60.0;
        let transform = animation::bob_transform(time);
        let offset = transform * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(offset.x, 0.0);
        assert_relative_eq!(offset.z, 0.0);
        assert_relative_eq!(offset.y, 0.015 * (time * 5.0).sin(), epsilon = 1e-6);
        assert!(offset.y.abs() <= 0.015 + 1e-6);
    }
}

#[test]
fn advance_skips_missing_nodes() {
    let mut scene = Scene::new();
    animation::advance(&mut scene, 1.0, FISH_COUNT);
    assert_eq!(scene.root.local_transform, animation::root_transform(1.0));
    assert!(scene.find_node(animation::BOB_NODE).is_none());
}

#[test]
fn updated_scene_draws_with_composed_transforms() {
    use shoal::camera::{Camera, Projection};
    use shoal::data_structures::scene_graph::{FrameContext, Material};
    use shoal::Deg;
    use std::sync::Arc;

    let mut scene = reference_scene(FISH_COUNT);
    let material = Arc::new(Material {
        base_color_texture: Some(10),
        ..Material::default()
    });
    let bob = scene.find_node_mut(animation::BOB_NODE).unwrap();
    bob.mesh = Some(1);
    bob.material = material;

    let time = 2.5;
    animation::advance(&mut scene, time, FISH_COUNT);

    let camera = Camera::new((0.0, 0.0, 2.0));
    let projection = Projection::new(640, 480, Deg(60.0), 0.1, 100.0);
    let frame = FrameContext::new(time, &camera, &projection);
    let calls = scene.draw_calls(&frame);
    assert_eq!(calls.len(), 1);

    let world = Matrix4::from(calls[0].vertex_uniforms.model_matrix);
    let expected = animation::root_transform(time) * animation::bob_transform(time);
    assert_relative_eq!(world, expected, epsilon = 1e-6);
}
