mod trace;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sandbox_camera::{FlyCamera, SandboxConfig, bind_free_cam};
use sandbox_input::{GamepadAxis, GamepadButton, InputSystem, NoCapture, PointerCode};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;
use trace::TraceEntry;

#[derive(Parser)]
#[command(name = "sandbox-cli", about = "Headless tools for the input sandbox")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML or JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded input trace and print the camera pose after each tick
    Replay {
        /// Trace file (.yaml, .yml or .json)
        trace: PathBuf,
    },
    /// List the pointer and gamepad code vocabularies
    Codes,
    /// List the actions the free-cam rig binds
    Bindings,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = SandboxConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Replay { trace } => {
            let entries: Vec<TraceEntry> = sandbox_input::config::load_file(&trace)
                .with_context(|| format!("reading trace {}", trace.display()))?;
            println!("Replaying {} entries from {}", entries.len(), trace.display());
            for pose in trace::replay(&entries, &config)? {
                println!("{pose}");
            }
        }
        Commands::Codes => {
            println!("pointer:");
            for code in PointerCode::ALL {
                println!("  {}", code.as_str());
            }
            println!("gamepad buttons:");
            for button in GamepadButton::all() {
                println!("  {:>2} {}", button.index(), button.label());
            }
            println!("gamepad axes:");
            for axis in GamepadAxis::all() {
                println!("  {:>2} {}", axis.index(), axis.label());
            }
            println!("keyboard: host physical key names (KeyW, Space, ShiftLeft, ...)");
        }
        Commands::Bindings => {
            let camera = Rc::new(RefCell::new(FlyCamera::new(&config.free_cam)));
            let mut input = InputSystem::new(&config.input, Box::new(NoCapture));
            bind_free_cam(&mut input, &camera, &config.free_cam);

            let mut rows: Vec<(String, String)> = input
                .registry()
                .bindings()
                .map(|b| (b.name().to_owned(), b.code().to_string()))
                .collect();
            rows.sort();
            for (name, code) in rows {
                println!("{name:<16} {code}");
            }
        }
    }

    Ok(())
}
