//! Example: Load and inspect a scene document.
//!
//! Run with: cargo run --example inspect_scene -- path/to/scene_raycast.json

use std::env;

use raycast_core::{load_scene_file, Preset, SceneDescription};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let scene = if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene-json>");
        println!("No path given, inspecting the default preset.\n");
        Preset::Default.description()
    } else {
        let path = &args[1];
        println!("Loading scene file: {}", path);
        match load_scene_file(path) {
            Ok(scene) => scene,
            Err(e) => {
                eprintln!("Error loading scene: {}", e);
                return;
            }
        }
    };

    print_scene(&scene);
}

fn print_scene(scene: &SceneDescription) {
    println!("=== Scene: {} ===", scene.name);
    println!("Objects: {}", scene.objects.len());
    println!("Lights: {}", scene.lights.len());
    println!("Total triangles: {}", scene.triangle_count());

    println!("\n--- Objects ---");
    for (i, object) in scene.objects.iter().enumerate() {
        println!(
            "  [{}] {} ({}) - {:?}",
            i,
            object.label(),
            object.shape.kind(),
            object.material
        );
    }

    let cam = &scene.camera;
    println!("\n--- Camera ---");
    println!(
        "  {:?} at ({:.2}, {:.2}, {:.2}) looking at ({:.2}, {:.2}, {:.2}), fov {:.1}",
        cam.projection,
        cam.position.x,
        cam.position.y,
        cam.position.z,
        cam.look_at.x,
        cam.look_at.y,
        cam.look_at.z,
        cam.fov
    );
    println!(
        "\n--- Background ---\n  {:?} x{:.2}",
        scene.background.kind, scene.background.intensity
    );
}
