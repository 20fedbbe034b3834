use anyhow::{bail, Context, Result};

use bodyscale::config::Config;
use bodyscale::pose::{KeypointProvider, JsonKeypointProvider};
use bodyscale::render::OverlayRenderer;
use bodyscale::Measurer;

const CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Usage: overlay <image> <keypoints.json> <out.png>
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        let program = args.first().map_or("overlay", String::as_str);
        bail!("usage: {} <image> <keypoints.json> <out.png>", program);
    }
    let (image_path, keypoints_path, out_path) = (&args[1], &args[2], &args[3]);

    let config = Config::load_or_default(CONFIG_PATH);

    let mut image = image::open(image_path)
        .with_context(|| format!("Failed to open image {}", image_path))?
        .to_rgb8();
    println!("Image: {}x{}", image.width(), image.height());

    let detections = JsonKeypointProvider::new(keypoints_path).estimate()?;
    println!("Detections: {}", detections.len());

    let measurer = Measurer::new(config.measure.clone());
    let renderer = OverlayRenderer::from_config(&config.render);
    for det in &detections {
        let (body, _) = measurer.landmarks(det);
        renderer.draw_detection(&mut image, det, &body);
    }

    image
        .save(out_path)
        .with_context(|| format!("Failed to write {}", out_path))?;
    println!("Saved {}", out_path);
    Ok(())
}
