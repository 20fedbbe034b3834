use anyhow::{bail, Context, Result};

use bodyscale::analysis::render_summary;
use bodyscale::config::Config;
use bodyscale::pose::{estimate_or_empty, JsonKeypointProvider};
use bodyscale::Measurer;

const CONFIG_PATH: &str = "config.toml";

struct Args {
    keypoints_path: String,
    height_cm: Option<f64>,
}

fn parse_args() -> Result<Args> {
    // Usage: bodyscale <keypoints.json> [height_cm]
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        let program = args.first().map_or("bodyscale", String::as_str);
        bail!("usage: {} <keypoints.json> [height_cm]", program);
    }
    let height_cm = match args.get(2) {
        Some(s) => Some(
            s.parse::<f64>()
                .with_context(|| format!("invalid height: {}", s))?,
        ),
        None => None,
    };
    Ok(Args {
        keypoints_path: args[1].clone(),
        height_cm,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = parse_args()?;
    let config = Config::load_or_default(CONFIG_PATH);
    let height_cm = args.height_cm.unwrap_or(config.measure.height_cm);

    println!("=== Body Measurement ===");
    println!("Keypoints: {}", args.keypoints_path);
    println!("Height: {} cm", height_cm);
    println!();

    let mut provider = JsonKeypointProvider::new(&args.keypoints_path);
    let detections = estimate_or_empty(&mut provider);
    if detections.is_empty() {
        println!("No person detected");
        return Ok(());
    }

    let measurer = Measurer::new(config.measure.clone());
    let results = measurer.measure_all(&detections, height_cm);
    for (i, (det, result)) in detections.iter().zip(results).enumerate() {
        println!("--- Person {} ---", i + 1);
        let missing = measurer.missing_keypoints(det);
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|idx| idx.name()).collect();
            println!("(missing keypoints: {})", names.join(", "));
        }
        match result {
            Ok(m) => {
                if !m.calibration.is_complete() {
                    println!("(partial calibration, missing {:?})", m.calibration.missing);
                }
                println!("{}", serde_json::to_string_pretty(&m.record)?);
                println!("{}", render_summary(&m.record));
            }
            Err(e) => {
                tracing::error!(person = i + 1, error = %e, "measurement failed");
                println!("Measurement failed: {}", e);
            }
        }
        println!();
    }

    Ok(())
}
