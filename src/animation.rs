//! Closed-form scene choreography.
//!
//! Every local transform here is a pure function of the accumulated scene
//! time (and, for the orbiting school, the fish index), so replaying the
//! same time yields bit-identical matrices. Time is advanced by the frame
//! driver in fixed `1 / frames_per_second` steps, never measured from the
//! wall clock.

use std::f32::consts::{FRAC_PI_2, TAU};

use cgmath::{Matrix4, Rad, Vector3};

use crate::{data_structures::scene_graph::Scene, math};

/// Name of the bobbing node in the reference scene.
pub const BOB_NODE: &str = "Bob";

/// Name of the `i`-th orbiting fish, 1-based.
pub fn blub_name(index: usize) -> String {
    format!("Blub {index}")
}

const BOB_AMPLITUDE: f32 = 0.015;
const BOB_FREQUENCY: f32 = 5.0;
const ORBIT_SPEED: f32 = 0.3;

/// Continuous spin about Y combined with a fixed half scale.
pub fn root_transform(time: f32) -> Matrix4<f32> {
    math::rotation_about(Vector3::unit_y(), Rad(-time)) * math::uniform_scale(0.5)
}

/// Vertical idle bob.
pub fn bob_transform(time: f32) -> Matrix4<f32> {
    math::translation(Vector3::new(
        0.0,
        BOB_AMPLITUDE * (time * BOB_FREQUENCY).sin(),
        0.0,
    ))
}

/// Fixed horizontal phase of fish `index` out of `count`, spreading the
/// school evenly over the full circle.
pub fn orbit_phase(index: usize, count: usize) -> f32 {
    TAU / count as f32 * (index - 1) as f32
}

/// Orbit transform of fish `index`: swing the whole orbit to the fish's
/// horizontal angle, push out to the orbit radius, roll around the pivot,
/// offset from it, all applied on top of the base mesh orientation.
///
/// The factors multiply right to left; reordering them changes the motion.
pub fn blub_transform(time: f32, index: usize, count: usize) -> Matrix4<f32> {
    let phase = orbit_phase(index, count);
    let horizontal_angle = phase;
    let rotation_angle = TAU * ORBIT_SPEED * time + phase;
    let pivot_position = Vector3::new(0.4, 0.0, 0.0);
    let rotation_offset = Vector3::new(0.4, 0.0, 0.0);
    let base_orientation = math::rotation_about(Vector3::unit_z(), Rad(-FRAC_PI_2))
        * math::rotation_about(Vector3::unit_y(), Rad(-FRAC_PI_2));

    math::rotation_about(Vector3::unit_y(), Rad(horizontal_angle))
        * math::translation(rotation_offset)
        * math::rotation_about(Vector3::unit_z(), Rad(rotation_angle))
        * math::translation(pivot_position)
        * base_orientation
}

/// Recompute every animated node's local transform for scene time `time`.
///
/// Nodes absent from the scene are skipped, so a scene with fewer fish than
/// `fish_count` animates whatever subset it has.
pub fn advance(scene: &mut Scene, time: f32, fish_count: usize) {
    scene.root.local_transform = root_transform(time);

    if let Some(bob) = scene.find_node_mut(BOB_NODE) {
        bob.local_transform = bob_transform(time);
    }

    for index in 1..=fish_count {
        if let Some(blub) = scene.find_node_mut(&blub_name(index)) {
            blub.local_transform = blub_transform(time, index, fish_count);
        }
    }
}
