//! clusterpan CLI: run a scripted cluster edit on a demo scene.
//!
//! Usage:
//!   cp-cli --inputs 8 --cluster 3 --mode barycenter --rotate 90
//!   cp-cli --config clusterpan.toml --track 2 --offline

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use cp_engine::ControlFrame;
use cp_ir::{ClusterId, Input, TrackingConfig};
use cp_master::{Config, Controller, InputStore, Plane, ReferenceMode, Ticker, Vec3};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    First,
    Barycenter,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PlaneArg {
    Xy,
    Xz,
    Yz,
}

#[derive(Parser, Debug)]
#[command(name = "cp-cli", about = "Run a scripted cluster edit on a demo scene")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of inputs in the scene (overrides the config)
    #[arg(long)]
    inputs: Option<usize>,

    /// Cluster to assign the scene to and edit (1-10)
    #[arg(long, default_value_t = 1)]
    cluster: u8,

    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    #[arg(long, value_enum)]
    plane: Option<PlaneArg>,

    /// Mark this input (0-based) as receiving live tracking data
    #[arg(long)]
    track: Option<usize>,

    /// Number of control ticks to run
    #[arg(long, default_value_t = 200)]
    ticks: u32,

    /// Total rotation dial travel in degrees
    #[arg(long, default_value_t = 90.0, allow_hyphen_values = true)]
    rotate: f32,

    /// Run ticks back to back instead of at the configured rate
    #[arg(long)]
    offline: bool,

    /// Print the effective config and exit
    #[arg(long)]
    print_config: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let mut config = match &args.config {
        Some(path) => {
            Config::load(path).with_context(|| format!("Failed to load {}", path.display()))?
        }
        None => Config::default(),
    };
    if let Some(count) = args.inputs {
        config.input_count = count.min(cp_ir::MAX_INPUTS);
    }
    if args.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let cluster =
        ClusterId::new(args.cluster).ok_or(cp_master::Error::InvalidCluster(args.cluster))?;
    let mut ctrl = Controller::with_inputs(demo_scene(config.input_count, cluster), &config);

    let notifications = Arc::new(AtomicUsize::new(0));
    let counter = notifications.clone();
    ctrl.subscribe(move |kind| {
        counter.fetch_add(1, Ordering::Relaxed);
        log::debug!("changed: {:?}", kind);
    });

    ctrl.select_cluster(cluster);
    if let Some(mode) = args.mode {
        ctrl.set_reference_mode(match mode {
            ModeArg::First => ReferenceMode::FirstInput,
            ModeArg::Barycenter => ReferenceMode::Barycenter,
        });
    }
    if let Some(plane) = args.plane {
        ctrl.set_plane(match plane {
            PlaneArg::Xy => Plane::XY,
            PlaneArg::Xz => Plane::XZ,
            PlaneArg::Yz => Plane::YZ,
        });
    }
    if let Some(index) = args.track {
        ctrl.set_tracking(TrackingConfig::active());
        ctrl.set_tracking_active(index, true)?;
    }

    let settings = ctrl.cluster_settings();
    println!("Cluster:   {}", cluster);
    println!("Mode:      {}", settings.mode.label());
    println!("Plane:     {}", settings.plane.label());
    println!("Inputs:    {}", ctrl.store().input_count());
    println!();
    print_cluster(&ctrl);

    log::info!("running {} ticks{}", args.ticks, if args.offline { " (offline)" } else { "" });
    if args.offline {
        for tick in 0..args.ticks {
            ctrl.tick(&scripted_frame(tick, args.ticks, args.rotate));
        }
    } else {
        run_paced(&mut ctrl, &config, args.ticks, args.rotate);
    }
    // Release every control (the dial stays where it ended) so the gesture closes.
    let dial = scripted_frame(args.ticks, args.ticks, args.rotate).rotation;
    ctrl.tick(&ControlFrame { rotation: dial, ..Default::default() });

    println!();
    print_cluster(&ctrl);
    println!();
    println!("Notifications:  {}", notifications.load(Ordering::Relaxed));
    println!("Undo available: {}", ctrl.can_undo());
    Ok(())
}

/// `count` inputs on a 2 m circle around the origin, all in `cluster`.
fn demo_scene(count: usize, cluster: ClusterId) -> Vec<Input> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count.max(1) as f32 * std::f32::consts::TAU;
            Input::at(Vec3::new(2.0 * angle.cos(), 2.0 * angle.sin(), 0.0)).in_cluster(cluster)
        })
        .collect()
}

/// Four equal phases: dial sweep, pad push, scale push, attenuation pull.
fn scripted_frame(tick: u32, total: u32, rotate: f32) -> ControlFrame {
    let phase_len = (total / 4).max(1);
    let sweep = tick.min(phase_len) as f32 / phase_len as f32;

    let mut frame = ControlFrame {
        rotation: cp_engine::normalize_angle(rotate * sweep),
        ..Default::default()
    };
    match tick / phase_len {
        0 => {}
        1 => frame.position_pad = [0.5, 0.0],
        2 => frame.scale_pad = [0.5, 0.5],
        _ => frame.attenuation = -0.5,
    }
    frame
}

fn run_paced(ctrl: &mut Controller, config: &Config, ticks: u32, rotate: f32) {
    let mut ticker = Ticker::new(config.tick_interval());
    let mut done = 0;
    while done < ticks {
        for _ in 0..ticker.poll(Instant::now()) {
            if done == ticks {
                break;
            }
            ctrl.tick(&scripted_frame(done, ticks, rotate));
            done += 1;
        }
        std::thread::sleep(ticker.time_until_next(Instant::now()));
    }
}

fn print_cluster(ctrl: &Controller) {
    let store = ctrl.store();
    let reference = ctrl.reference_point();
    let tracked = ctrl.tracked_member();
    println!("Reference: ({:.3}, {:.3}, {:.3})", reference.x, reference.y, reference.z);
    for index in ctrl.members() {
        let p = store.position(index);
        let o = store.offset(index);
        println!(
            "  in {:3}{} pos ({:7.3}, {:7.3}, {:7.3}) off ({:6.3}, {:6.3}, {:6.3}) {:6.1} dB",
            index + 1,
            if tracked == Some(index) { "*" } else { " " },
            p.x,
            p.y,
            p.z,
            o.x,
            o.y,
            o.z,
            store.attenuation(index),
        );
    }
}
