//! Render one of the demo scenes into memory and report on it.
//!
//! Usage: `cargo run --example render_scene -- [transparent|lit_box] [size]`
//!
//! Set `RUST_LOG=info` (or `debug`) to see progress.

use anyhow::{bail, Context, Result};
use glint_renderer::{render, scenes, BvhNode, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let scene = args.next().unwrap_or_else(|| "transparent".to_string());
    let size: u32 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid image size '{s}'"))?,
        None => 100,
    };

    let (list, camera) = match scene.as_str() {
        "transparent" => (scenes::transparent(), scenes::transparent_camera(size, size)),
        "lit_box" => (scenes::lit_box(), scenes::lit_box_camera(size, size)),
        other => bail!("unknown scene '{other}', expected 'transparent' or 'lit_box'"),
    };

    let world = BvhNode::from_list(&list).context("failed to build BVH")?;
    log::info!(
        "Scene '{}': {} primitives, {} BVH nodes, depth {}",
        scene,
        list.len(),
        world.node_count(),
        world.depth()
    );

    let config = RenderConfig::default().with_jitter_grid(3).with_max_depth(20);
    let mut rng = StdRng::seed_from_u64(2024);
    let image = render(&camera, &world, &config, &mut rng)?;

    let rgb = image.to_rgb_image();
    let (width, height) = rgb.dimensions();
    log::info!(
        "Image {}x{}, mean luminance {:.4}",
        width,
        height,
        image.mean_luminance()
    );

    Ok(())
}
