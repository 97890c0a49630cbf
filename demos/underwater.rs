//! The reference scene: Bob idling in place while a school of twelve blubs
//! orbits around him, lit by three colored point lights.
//!
//! Expects `bob.obj`, `blub.obj` and their base color textures under
//! `./assets`. Missing assets end the program with an error instead of a
//! crash.

use std::sync::Arc;

use shoal::{
    Vector3, animation,
    app::{self, Stage},
    context::Context,
    data_structures::scene_graph::{Light, Material, Node, Scene},
    renderer::Renderer,
};

const FISH_COUNT: usize = 12;

struct Underwater {
    fish_count: usize,
}

impl Stage for Underwater {
    fn build(&mut self, ctx: &Context, renderer: &mut Renderer) -> anyhow::Result<Scene> {
        let bob_mesh = renderer.load_mesh(ctx, "bob.obj")?;
        let bob_texture = renderer.load_texture(ctx, "bob_baseColor.png")?;
        let blub_mesh = renderer.load_mesh(ctx, "blub.obj")?;
        let blub_texture = renderer.load_texture(ctx, "blub_baseColor.png")?;

        let mut scene = Scene::new();
        scene.ambient_light_color = Vector3::new(0.1, 0.1, 0.1);
        scene.lights = [
            Light {
                world_position: Vector3::new(5.0, 5.0, 0.0),
                color: Vector3::new(0.3, 0.3, 0.3),
            },
            Light {
                world_position: Vector3::new(-5.0, 5.0, 0.0),
                color: Vector3::new(0.3, 0.3, 0.3),
            },
            Light {
                world_position: Vector3::new(0.0, -5.0, 0.0),
                color: Vector3::new(0.3, 0.3, 0.3),
            },
        ];

        let bob_material = Arc::new(Material {
            specular_color: Vector3::new(0.8, 0.8, 0.8),
            specular_power: 100.0,
            base_color_texture: Some(bob_texture),
        });
        scene
            .root
            .add_child(Node::with_mesh(animation::BOB_NODE, bob_mesh, bob_material));

        // One material instance shared by the whole school
        let fish_material = Arc::new(Material {
            specular_color: Vector3::new(0.8, 0.8, 0.8),
            specular_power: 40.0,
            base_color_texture: Some(blub_texture),
        });
        for index in 1..=self.fish_count {
            scene.root.add_child(Node::with_mesh(
                animation::blub_name(index),
                blub_mesh,
                Arc::clone(&fish_material),
            ));
        }

        Ok(scene)
    }

    fn update(&mut self, scene: &mut Scene, time: f32) {
        animation::advance(scene, time, self.fish_count);
    }
}

fn main() -> anyhow::Result<()> {
    app::run(Underwater {
        fish_count: FISH_COUNT,
    })
}
