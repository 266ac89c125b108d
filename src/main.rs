use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use traffic_view::{Canvas, FeedMessage, Network, Recorder, Renderer, Style, SvgCanvas, Viewport};

/// Renders a recorded traffic simulation feed into image frames.
#[derive(Parser, Debug)]
#[command(name = "traffic-view", version, about)]
struct Args {
    /// The network geometry, as JSON or a SUMO `.net.xml` file.
    #[arg(long)]
    network: PathBuf,

    /// A feed of JSON snapshot messages, one per line.
    #[arg(long)]
    feed: Option<PathBuf>,

    /// A JSON style file.
    #[arg(long)]
    style: Option<PathBuf>,

    /// The viewport width in logical pixels.
    #[arg(long, default_value_t = 1024.0)]
    width: f64,

    /// The viewport height in logical pixels.
    #[arg(long, default_value_t = 768.0)]
    height: f64,

    /// The number of device pixels per logical pixel.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// The directory frames are written to.
    #[arg(long, default_value = "frames")]
    out: PathBuf,

    /// Write each frame's draw commands as JSON instead of SVG.
    #[arg(long)]
    record: bool,
}

/// A canvas whose frames can be written to disk.
trait FrameSink: Canvas {
    const EXTENSION: &'static str;

    fn frame(&self) -> String;
}

impl FrameSink for SvgCanvas {
    const EXTENSION: &'static str = "svg";

    fn frame(&self) -> String {
        self.document()
    }
}

impl FrameSink for Recorder {
    const EXTENSION: &'static str = "json";

    fn frame(&self) -> String {
        self.to_json().to_string()
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let network = Network::from_file(&args.network)
        .with_context(|| format!("failed to load network from {}", args.network.display()))?;
    let style = match &args.style {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read style from {}", path.display()))?;
            Style::from_json(&json).with_context(|| format!("invalid style in {}", path.display()))?
        }
        None => Style::default(),
    };
    let viewport = Viewport::new(args.width, args.height).with_device_pixel_ratio(args.dpr);
    fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create {}", args.out.display()))?;

    let renderer = Renderer::new(network, viewport, style);
    if args.record {
        run(renderer, Recorder::new(), &args)
    } else {
        run(renderer, SvgCanvas::new(), &args)
    }
}

fn run<C: FrameSink>(mut renderer: Renderer, mut canvas: C, args: &Args) -> Result<()> {
    let viewport = renderer.viewport();
    renderer.resize(viewport, &mut canvas);
    write_frame(&canvas, &args.out, "network")?;

    let Some(feed) = &args.feed else {
        return Ok(());
    };
    let file = fs::File::open(feed).with_context(|| format!("failed to open {}", feed.display()))?;

    let mut frames = 0;
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {}", feed.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        match FeedMessage::parse(&line) {
            Ok(FeedMessage::Snapshot(snapshot)) => {
                // Steps may repeat or be missing, so frames are numbered in arrival order.
                log::debug!("Drawing step {} as frame {}", snapshot.step, frames);
                renderer.update(snapshot, &mut canvas);
                write_frame(&canvas, &args.out, &format!("frame-{:06}", frames))?;
                frames += 1;
            }
            Ok(FeedMessage::Finished) => {
                log::info!("Simulation finished");
                break;
            }
            Ok(FeedMessage::Status(status)) => log::info!("Feed status: {}", status),
            Err(err) => log::warn!("Skipping line {} of {}: {}", line_no + 1, feed.display(), err),
        }
    }

    log::info!("Wrote {} frames to {}", frames, args.out.display());
    Ok(())
}

fn write_frame<C: FrameSink>(canvas: &C, dir: &Path, name: &str) -> Result<()> {
    let path = dir.join(format!("{}.{}", name, C::EXTENSION));
    fs::write(&path, canvas.frame()).with_context(|| format!("failed to write {}", path.display()))
}
