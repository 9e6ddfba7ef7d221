use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "framefit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve the scale that fits an image into a box.
    Fit(FitArgs),
    /// Relink and resync every framed image in a scene document.
    Sync(SyncArgs),
    /// Print the compiled draw list of a scene document.
    Draw(DrawArgs),
}

#[derive(Parser, Debug)]
struct FitArgs {
    /// Target box as WxH.
    #[arg(long = "box", value_parser = parse_size)]
    target: (f64, f64),

    /// Natural image size as WxH.
    #[arg(long, value_parser = parse_size)]
    natural: (f64, f64),

    /// contain, fill (alias: cover), stretch or center.
    #[arg(long, default_value_t = framefit::FitMode::Contain)]
    mode: framefit::FitMode,
}

#[derive(Parser, Debug)]
struct SyncArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct DrawArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Fit(args) => cmd_fit(args),
        Command::Sync(args) => cmd_sync(args),
        Command::Draw(args) => cmd_draw(args),
    }
}

fn parse_size(s: &str) -> anyhow::Result<(f64, f64)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("expected WxH, got '{s}'"))?;
    let w: f64 = w.trim().parse().with_context(|| format!("bad width in '{s}'"))?;
    let h: f64 = h.trim().parse().with_context(|| format!("bad height in '{s}'"))?;
    Ok((w, h))
}

fn read_scene_json(path: &Path) -> anyhow::Result<framefit::Scene> {
    let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
    let doc: framefit::SceneDocument = serde_json::from_reader(BufReader::new(f))
        .with_context(|| "parse scene JSON")?;
    let mut scene = framefit::Scene::from_document(doc)?;
    framefit::frame::register(&mut scene);
    framefit::boundary::register(&mut scene);
    Ok(scene)
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let (tw, th) = args.target;
    let (nw, nh) = args.natural;
    let scale = framefit::resolve(tw, th, nw, nh, args.mode);
    let (width, height) = scale.applied_to(nw, nh);
    let out = serde_json::json!({
        "mode": args.mode.as_str(),
        "scaleX": scale.x,
        "scaleY": scale.y,
        "width": width,
        "height": height,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_sync(args: SyncArgs) -> anyhow::Result<()> {
    let mut scene = read_scene_json(&args.in_path)?;
    let linked = framefit::frame::relink_all(&mut scene);
    let json = scene.to_json()?;

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("synced {linked} frame(s), wrote {}", out.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}

fn cmd_draw(args: DrawArgs) -> anyhow::Result<()> {
    let scene = read_scene_json(&args.in_path)?;
    let list = framefit::compile_draw_list(&scene, None);
    println!("{}", serde_json::to_string_pretty(&list)?);
    Ok(())
}
