use chromabrush::{
    source::bgr_to_rgb_image, BrushConfig, BrushPipeline, HsvRange, ImageSequenceSource,
    PaintColor, TrackedColor,
};
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments for the offline painting demo
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Virtual paintbrush over a directory of frames",
    long_about = "Runs the color-tracking paint pipeline over a directory of image files \
        in lexicographic order, as a stand-in for a live camera.\n\n\
        For every frame, three PNGs are written to the output directory: the frame \
        itself, the accumulated canvas, and the canvas composited over the frame. \
        Tracked colors come from a JSON configuration file; without one, a single \
        default red tracker is used."
)]
struct Args {
    #[arg(
        short,
        long,
        help = "Directory of input frames",
        long_help = "Directory containing the frame sequence. Every regular file is \
            decoded as an image; files are consumed in lexicographic filename order, \
            so zero-padded frame numbers keep the sequence stable."
    )]
    input: PathBuf,

    #[arg(
        short,
        long,
        default_value = "out",
        help = "Directory for output PNGs",
        long_help = "Directory where per-frame outputs are written. Created if missing. \
            Files are named frame_NNNN.png, canvas_NNNN.png and result_NNNN.png."
    )]
    output: PathBuf,

    #[arg(
        short,
        long,
        help = "Pipeline configuration JSON file",
        long_help = "Path to a JSON file holding the full pipeline configuration: \
            tracked color list, scale factor, brush radius, kernel size, edge \
            thresholds, area floor, polygon tolerance and contour selection policy. \
            When omitted, the built-in defaults with one red tracker are used."
    )]
    config: Option<PathBuf>,

    #[arg(
        short = 'n',
        long,
        help = "Stop after this many frames",
        long_help = "Maximum number of frames to process. Without a limit the run \
            continues until the input directory is exhausted."
    )]
    limit: Option<usize>,
}

fn load_config(args: &Args) -> Result<BrushConfig, Box<dyn std::error::Error>> {
    match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(BrushConfig {
            colors: vec![TrackedColor {
                range: HsvRange::new([0, 100, 100], [10, 255, 255]),
                paint: PaintColor::new(0, 0, 255),
            }],
            ..BrushConfig::default()
        }),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(&args)?;
    std::fs::create_dir_all(&args.output)?;

    let source = ImageSequenceSource::from_dir(&args.input)?;
    let pipeline = BrushPipeline::new(source, config)?;

    println!("Virtual paintbrush");
    println!("==================");
    println!("Input: {}", args.input.display());
    println!("Output: {}", args.output.display());

    let limit = args.limit.unwrap_or(usize::MAX);
    let mut count = 0usize;
    for (index, painted) in pipeline.take(limit).enumerate() {
        let frame_path = args.output.join(format!("frame_{index:04}.png"));
        let canvas_path = args.output.join(format!("canvas_{index:04}.png"));
        let result_path = args.output.join(format!("result_{index:04}.png"));

        bgr_to_rgb_image(&painted.frame).save(&frame_path)?;
        bgr_to_rgb_image(&painted.canvas).save(&canvas_path)?;
        bgr_to_rgb_image(&painted.result).save(&result_path)?;
        count += 1;
    }

    println!("Processed {count} frames");
    Ok(())
}
