use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use itertools::Itertools;

use estate_viewer::catalog::sample_listings;
use estate_viewer::focus::{FocusConfig, OffsetMode, Selection};
use estate_viewer::math::easing::Easing;
use estate_viewer::scene_graph::loader::ModelLoader;
use estate_viewer::viewer::ViewerState;

#[derive(Parser)]
#[command(name = "estate-viewer", version, about = "Property model browser")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the named nodes of a model with their world bounds
    Nodes { model: PathBuf },
    /// Frame a room or node and print the camera path
    Focus(FocusArgs),
    /// List the demo buildings and their units
    Listings,
}

#[derive(Args)]
struct FocusArgs {
    model: PathBuf,
    /// Free-text room query, e.g. "Unit A1"
    #[arg(long, conflicts_with = "node")]
    room: Option<String>,
    /// Index into the `nodes` listing
    #[arg(long)]
    node: Option<usize>,
    /// Approach from a fixed elevated angle instead of the current view direction
    #[arg(long)]
    isometric: bool,
    /// Use a cubic ease-in-out curve instead of the quadratic one
    #[arg(long)]
    cubic: bool,
    /// Length of the camera flight in milliseconds
    #[arg(long, default_value_t = 700)]
    duration_ms: u64,
    /// Frames per second of the printed camera path
    #[arg(long, default_value_t = 60)]
    fps: u32,
}

fn fmt_vec3(v: glam::Vec3) -> String {
    v.to_array().iter().map(|c| format!("{c:.2}")).join(", ")
}

fn list_nodes(model: PathBuf) -> Result<()> {
    let scene = ModelLoader::spawn(model).wait()?;

    for (index, node) in scene.node_summaries().iter().enumerate() {
        let center = node.center.map(fmt_vec3).unwrap_or_else(|| "-".into());
        let size = node.size.map(fmt_vec3).unwrap_or_else(|| "-".into());
        println!("{index:>4}  {}  center: {center}  size: {size}", node.name);
    }

    Ok(())
}

fn focus(args: FocusArgs) -> Result<()> {
    if args.fps == 0 {
        bail!("--fps must be greater than zero");
    }

    let config = FocusConfig {
        duration: Duration::from_millis(args.duration_ms),
        easing: if args.cubic {
            Easing::InOutCubic
        } else {
            Easing::InOutQuad
        },
        offset_mode: if args.isometric {
            OffsetMode::isometric()
        } else {
            OffsetMode::KeepDirection
        },
        ..Default::default()
    };

    let start = Instant::now();
    let mut viewer = ViewerState::new(config, start);
    viewer.load_model(ModelLoader::spawn(&args.model));

    let frame = Duration::from_secs(1) / args.fps;
    let mut now = start;
    while viewer.is_loading() {
        std::thread::sleep(frame);
        now += frame;
        viewer.update(now)?;
    }

    let scene = viewer.scene().context("Model finished loading without a scene")?;
    let node_id = match args.node {
        Some(index) => Some(
            scene
                .node_summaries()
                .get(index)
                .with_context(|| format!("No node with index {index}"))?
                .id,
        ),
        None => None,
    };

    let Some(selection) = Selection::from_parts(node_id, args.room.as_deref()) else {
        bail!("Nothing to focus: pass --room or --node");
    };

    let target = viewer
        .select(selection, now)
        .context("Selection did not resolve to a node")?;
    if let Some(object) = viewer.scene().and_then(|scene| scene.get_object(target)) {
        log::info!("Framing {:?}", object.name);
    }

    let mut frame_index = 0;
    while viewer.focus.is_animating() {
        now += frame;
        frame_index += 1;
        viewer.update(now)?;
        println!(
            "{frame_index:>4}  eye: {}  target: {}",
            fmt_vec3(viewer.camera.eye),
            fmt_vec3(viewer.orbit.target)
        );
    }

    Ok(())
}

fn listings() {
    for listing in sample_listings() {
        println!("{} ({}) {}", listing.title, listing.location, listing.price);
        println!("    model: {}", listing.model_path);
        for unit in &listing.units {
            println!("    {:<24} {}", unit.name, unit.status);
        }
    }
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    match Cli::parse().command {
        Command::Nodes { model } => list_nodes(model),
        Command::Focus(args) => focus(args),
        Command::Listings => {
            listings();
            Ok(())
        }
    }
}
