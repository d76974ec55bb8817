use clap::Parser;
use log::info;
use mandelbrot_explorer::{
    CliRenderController, Complex, ExplorerConfig, PaletteKind, PpmFilePresenter, Viewport,
};
use std::path::PathBuf;

/// Renders a view of the Mandelbrot set to a PPM file
#[derive(Parser, Debug)]
#[command(name = "mandelbrot-explorer", version)]
struct Args {
    /// TOML config file; command line values take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Real part of the view centre
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    center_x: f64,

    /// Imaginary part of the view centre
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    center_y: f64,

    /// Width of the view on the complex plane; the height follows the image aspect
    #[arg(long, default_value_t = 4.0)]
    plane_width: f64,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,

    #[arg(long)]
    max_iterations: Option<u32>,

    #[arg(long, value_enum)]
    palette: Option<PaletteKind>,

    /// Output file
    #[arg(short, long, default_value = "output/mandelbrot.ppm")]
    output: PathBuf,

    /// After the first frame, render this many one-pixel pans through the
    /// overlap cache and report how much was reused
    #[arg(long, default_value_t = 0)]
    pan_frames: u32,
}

impl Args {
    fn apply_to(&self, config: &mut ExplorerConfig) {
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.fractal.max_iterations = max_iterations;
        }
        if let Some(palette) = self.palette {
            config.fractal.palette = palette;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ExplorerConfig::load(path)?,
        None => ExplorerConfig::default(),
    };
    args.apply_to(&mut config);
    config.validate()?;

    let pixel_rect = config.pixel_rect()?;
    let viewport = Viewport::for_raster(Complex::new(args.center_x, args.center_y), args.plane_width, pixel_rect)?;

    info!(
        "rendering {}x{} at ({}, {}), plane width {}, {} iterations, {} palette",
        pixel_rect.width(),
        pixel_rect.height(),
        args.center_x,
        args.center_y,
        args.plane_width,
        config.fractal.max_iterations,
        config.fractal.palette,
    );

    let mut controller = CliRenderController::new(config.explorer()?, PpmFilePresenter::new());

    controller.generate(&viewport, pixel_rect)?;
    controller.pan(1, args.pan_frames)?;
    controller.write(&args.output)?;

    Ok(())
}
