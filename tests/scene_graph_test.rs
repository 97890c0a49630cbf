use std::mem;
use std::sync::Arc;

use approx::assert_relative_eq;
use shoal::camera::{Camera, Projection};
use shoal::data_structures::scene_graph::{
    FragmentUniforms, FrameContext, Light, LightUniform, Material, Node, Scene, VertexUniforms,
};
use shoal::math;
use shoal::{Deg, Matrix4, Vector3};

fn test_frame() -> FrameContext {
    let camera = Camera::new((0.0, 0.0, 2.0));
    let projection = Projection::new(800, 600, Deg(60.0), 0.1, 100.0);
    FrameContext::new(0.0, &camera, &projection)
}

fn drawable(name: &str, mesh: u64, texture: u64) -> Node {
    let material = Arc::new(Material {
        base_color_texture: Some(texture),
        ..Material::default()
    });
    Node::with_mesh(name, mesh, material)
}

#[test]
fn find_node_returns_the_first_preorder_match() {
    let mut scene = Scene::new();
    scene.root.add_child(Node::new("Bob"));
    let mut second = Node::new("Second");
    second.add_child(Node::new("Bob"));
    second.children[0].mesh = Some(7);
    scene.root.add_child(second);

    // The direct child wins over the deeper duplicate
    let bob = scene.find_node("Bob").expect("Bob should be found");
    assert!(bob.mesh.is_none());

    assert!(scene.find_node("Nonexistent").is_none());
}

#[test]
fn find_node_matches_the_root_itself() {
    let scene = Scene::new();
    assert!(scene.find_node("Root").is_some());
}

#[test]
fn traversal_emits_draws_in_preorder() {
    let mut scene = Scene::new();
    let mut first = drawable("A", 1, 10);
    first.add_child(drawable("C", 2, 10));
    scene.root.add_child(first);
    scene.root.add_child(drawable("B", 3, 10));

    let calls = scene.draw_calls(&test_frame());
    let order: Vec<u64> = calls.iter().map(|call| call.mesh).collect();
    assert_eq!(order, vec![1, 2, 3]);
}

#[test]
fn nodes_without_mesh_or_texture_are_skipped_silently() {
    let mut scene = Scene::new();

    // Mesh but no texture
    let untextured = Arc::new(Material::default());
    scene.root.add_child(Node::with_mesh("NoTexture", 1, untextured));

    // Texture but no mesh
    let mut meshless = Node::new("NoMesh");
    meshless.material = Arc::new(Material {
        base_color_texture: Some(10),
        ..Material::default()
    });
    scene.root.add_child(meshless);

    assert!(scene.draw_calls(&test_frame()).is_empty());
}

#[test]
fn skipped_nodes_still_pass_their_transform_to_children() {
    let mut scene = Scene::new();
    let mut bare = Node::new("Bare");
    bare.local_transform = math::translation(Vector3::new(5.0, 0.0, 0.0));
    bare.add_child(drawable("Leaf", 1, 10));
    scene.root.add_child(bare);

    let calls = scene.draw_calls(&test_frame());
    assert_eq!(calls.len(), 1);
    let world = Matrix4::from(calls[0].vertex_uniforms.model_matrix);
    assert_relative_eq!(world, math::translation(Vector3::new(5.0, 0.0, 0.0)));
}

#[test]
fn world_transform_is_parent_world_times_local() {
    let mut scene = Scene::new();
    scene.root.local_transform = math::translation(Vector3::new(0.0, 1.0, 0.0));

    let mut parent = drawable("Parent", 1, 10);
    parent.local_transform =
        math::rotation_about(Vector3::unit_y(), Deg(90.0)) * math::uniform_scale(2.0);
    let mut child = drawable("Child", 2, 10);
    child.local_transform = math::translation(Vector3::new(1.0, 0.0, 0.0));
    parent.add_child(child);
    scene.root.add_child(parent);

    let calls = scene.draw_calls(&test_frame());
    assert_eq!(calls.len(), 2);

    let parent_world = Matrix4::from(calls[0].vertex_uniforms.model_matrix);
    let child_world = Matrix4::from(calls[1].vertex_uniforms.model_matrix);
    let child_local = math::translation(Vector3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(child_world, parent_world * child_local, epsilon = 1e-6);
}

#[test]
fn fragment_uniforms_carry_material_and_scene_lighting() {
    let mut scene = Scene::new();
    scene.ambient_light_color = Vector3::new(0.1, 0.2, 0.3);
    scene.lights[1] = Light {
        world_position: Vector3::new(-5.0, 5.0, 0.0),
        color: Vector3::new(0.0, 1.0, 0.0),
    };

    let material = Arc::new(Material {
        specular_color: Vector3::new(0.8, 0.8, 0.8),
        specular_power: 100.0,
        base_color_texture: Some(10),
    });
    scene.root.add_child(Node::with_mesh("Lit", 1, material));

    let calls = scene.draw_calls(&test_frame());
    let uniforms = calls[0].fragment_uniforms;
    assert_eq!(uniforms.camera_world_position, [0.0, 0.0, 2.0]);
    assert_eq!(uniforms.ambient_light_color, [0.1, 0.2, 0.3]);
    assert_eq!(uniforms.specular_color, [0.8, 0.8, 0.8]);
    assert_eq!(uniforms.specular_power, 100.0);
    assert_eq!(uniforms.lights[1].position, [-5.0, 5.0, 0.0]);
    assert_eq!(uniforms.lights[1].color, [0.0, 1.0, 0.0]);
}

// The shader reads these blocks byte for byte; the sizes are part of the
// contract.
#[test]
fn uniform_blocks_match_the_shader_layout() {
    assert_eq!(mem::size_of::<LightUniform>(), 32);
    assert_eq!(mem::size_of::<FragmentUniforms>(), 144);
    assert_eq!(mem::size_of::<VertexUniforms>(), 176);
}

#[test]
fn view_projection_composes_projection_after_view() {
    let frame = test_frame();
    assert_relative_eq!(
        frame.view_projection(),
        frame.projection_matrix * frame.view_matrix
    );
}
