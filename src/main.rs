use anyhow::{Context, Result};
use clap::Parser;

use camera_pilot::camera::FlyCamera;
use camera_pilot::cli::Cli;
use camera_pilot::commands::toggle_tooltip;
use camera_pilot::core::controller::{Button, ScriptedController};
use camera_pilot::core::timer::{AfterNTicks, EveryNTicks};
use camera_pilot::scene::{create_demo_scene, EditorScene};
use camera_pilot::store::JsonFileStore;
use camera_pilot::traits::ObjectDirectory;
use camera_pilot::{LifecycleController, PilotCommand, PilotConfig, SyncOutcome};

// === Flight plan ===

const PLAN_LENGTH: u64 = 240;

/// Buttons held on a given frame; the plan repeats every PLAN_LENGTH frames
fn flight_plan(frame: u64) -> &'static [Button] {
    match frame % PLAN_LENGTH {
        0..=59 => &[Button::KeyW],
        60..=89 => &[],
        90..=149 => &[Button::KeyE],
        150..=209 => &[Button::KeyD, Button::Space],
        _ => &[],
    }
}

#[derive(Debug, Default)]
struct OutcomeTally {
    unsubscribed: u64,
    inactive: u64,
    captured: u64,
    unchanged: u64,
    applied: u64,
    lost: u64,
}

impl OutcomeTally {
    fn record(&mut self, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::Unsubscribed => self.unsubscribed += 1,
            SyncOutcome::Inactive => self.inactive += 1,
            SyncOutcome::Captured => self.captured += 1,
            SyncOutcome::Unchanged => self.unchanged += 1,
            SyncOutcome::Applied { .. } => self.applied += 1,
            SyncOutcome::TargetLost { .. } => self.lost += 1,
        }
    }
}

fn load_config(cli: &Cli) -> Result<PilotConfig> {
    match &cli.config {
        Some(path) => PilotConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(PilotConfig::default()),
    }
}

fn print_summary(
    lifecycle: &LifecycleController<JsonFileStore>,
    scene: &EditorScene,
    tally: &OutcomeTally,
) {
    println!(
        "Frames: {} captured, {} applied, {} unchanged, {} inactive, {} lost, {} unsubscribed",
        tally.captured,
        tally.applied,
        tally.unchanged,
        tally.inactive,
        tally.lost,
        tally.unsubscribed
    );
    println!("Undo entries: {}", scene.undo_entries().len());
    for warning in scene.warnings() {
        println!("Warning: {warning}");
    }
    match lifecycle.machine().current_target() {
        Some(target) => match scene.resolve(target) {
            Some(object) => {
                let pose = object.pose();
                println!("Piloting: {} ({target})", object.name());
                println!(
                    "  position {:?}, orientation {:?}",
                    pose.position, pose.orientation
                );
            }
            None => println!("Piloting: Unknown ({target})"),
        },
        None => println!("Not piloting"),
    }
    println!(
        "Next action: {}",
        toggle_tooltip(lifecycle.machine().is_active())
    );
    println!("State saved to {}", lifecycle.store().path().display());
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    config
        .thresholds
        .validate()
        .context("Invalid sync thresholds")?;

    let store_path = cli.store_path(&config);
    let store = JsonFileStore::open(&store_path)
        .with_context(|| format!("Failed to open state store: {}", store_path.display()))?;

    let mut scene = create_demo_scene();
    scene.set_simulating(cli.simulating);

    let mut lifecycle = LifecycleController::new(store, &config);
    // Restore failures are logged and leave the session idle
    let _ = lifecycle.startup(&scene);

    if !lifecycle.machine().is_active() {
        let selection = scene.find_by_name(&cli.target);
        // Warnings have already been surfaced through the scene
        let _ = lifecycle.execute(PilotCommand::Start, &mut scene, selection);
    }

    let mut camera = FlyCamera::default();
    let mut input = ScriptedController::new();
    let mut status = EveryNTicks::new(cli.status_every);
    let mut destroy = cli
        .destroy_at
        .map(AfterNTicks::new)
        .unwrap_or_else(AfterNTicks::disarmed);
    let mut tally = OutcomeTally::default();

    for frame in 0..cli.frames {
        input.hold(flight_plan(frame));
        camera.update(&input);

        if destroy.tick() {
            if let Some(target) = lifecycle.machine().current_target() {
                log::info!("destroying piloted object {target} on frame {frame}");
                scene.destroy(target);
            }
        }

        let outcome = lifecycle.on_viewport_frame(&mut scene, camera.pose());
        tally.record(outcome);

        if status.tick() && !cli.no_ui {
            println!(
                "frame {:>5}  {:?}  viewport {:?}",
                frame + 1,
                outcome,
                camera.position
            );
        }
    }

    lifecycle
        .shutdown(&scene)
        .context("Failed to persist piloting state")?;

    if !cli.no_ui {
        print_summary(&lifecycle, &scene, &tally);
    }

    Ok(())
}
