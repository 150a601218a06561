/*

    Render a scene made of axis-aligned rectangles and boxes.

    Usage: planetracer [scene.json] [output folder or .png path]

    @date: Oct, 2025
    @author: Bartu

*/

use std::{env, path::Path};
use tracing::{info, warn, error, debug};

use plane_tracer::renderer;
use plane_tracer::scene::Scene;

fn main() -> Result<(), Box<dyn std::error::Error>> {

    // Logging on console
    tracing_subscriber::fmt::init();

    // Parse args
    let args: Vec<String> = env::args().collect();
    let (json_path, output) = match args.len() {
        1 => {
            warn!("No arguments were provided, setting default scene path...");
            ("./scenes/cornell_box.json", "./")
        }
        2 => (args[1].as_str(), "./"),
        3 => (args[1].as_str(), args[2].as_str()),
        _ => {
            error!("Usage: {} <filename>.json [output]", args[0]);
            std::process::exit(1);
        }
    };

    info!("Loading scene from {}...", json_path);
    let scene = Scene::load(Path::new(json_path)).map_err(|e| {
        error!("Failed to load scene: {}", e);
        Box::<dyn std::error::Error>::from(e)
    })?;
    debug!("Scene is setup successfully.\n {:#?}", scene.camera);

    let image = renderer::render(&scene);
    image.save_png(Path::new(output))?;

    info!("Finished execution.");
    Ok(())
}
