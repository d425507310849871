//! Replay a landmark trace through the tracker.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use handmouse_common::config::AppConfig;
use handmouse_hand_tracker::actuators::LoggingActuator;
use handmouse_hand_tracker::backends::{ReplayDetector, TraceSource};
use handmouse_hand_tracker::{HandTracker, StopReason, TrackerStats};
use handmouse_platform_core::{Actuator, DisplaySize};

pub struct ReplayOptions {
    pub trace: PathBuf,
    pub realtime: bool,
    pub os_cursor: bool,
}

pub async fn run(config: AppConfig, options: ReplayOptions) -> anyhow::Result<()> {
    println!("Replaying trace: {}", options.trace.display());
    println!(
        "  Smoothening: {}  Amplification: {}",
        config.tracking.smoothening, config.tracking.amplification
    );
    println!("  Realtime: {}", options.realtime);
    println!("Press Ctrl+C to stop...");
    println!();

    let stop = Arc::new(AtomicBool::new(false));
    let ctrl_c_stop = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl+C received, stopping after the current frame");
            ctrl_c_stop.store(true, Ordering::SeqCst);
        }
    });

    // The tracker loop blocks (frame pacing, right-click pauses).
    let (reason, stats) =
        tokio::task::spawn_blocking(move || replay_blocking(&config, &options, &stop)).await??;

    match reason {
        StopReason::ExitRequested => println!("Stopped by user"),
        StopReason::SourceExhausted => println!("Trace finished"),
    }
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

fn replay_blocking(
    config: &AppConfig,
    options: &ReplayOptions,
    stop: &Arc<AtomicBool>,
) -> anyhow::Result<(StopReason, TrackerStats)> {
    let source = TraceSource::from_path(&options.trace)?.realtime(options.realtime);

    if options.os_cursor {
        return replay_os(source, config, stop);
    }

    let display = match (config.tracking.display_width, config.tracking.display_height) {
        (Some(width), Some(height)) => DisplaySize::new(width, height),
        _ => DisplaySize::default(),
    };
    drive(source, LoggingActuator::new(display), config, stop)
}

#[cfg(feature = "enigo")]
fn replay_os(
    source: TraceSource,
    config: &AppConfig,
    stop: &Arc<AtomicBool>,
) -> anyhow::Result<(StopReason, TrackerStats)> {
    use handmouse_hand_tracker::actuators::os::OsActuator;

    drive(source, OsActuator::new(), config, stop)
}

#[cfg(not(feature = "enigo"))]
fn replay_os(
    _source: TraceSource,
    _config: &AppConfig,
    _stop: &Arc<AtomicBool>,
) -> anyhow::Result<(StopReason, TrackerStats)> {
    anyhow::bail!("--os-cursor needs a build with the `enigo` feature enabled")
}

fn drive<A: Actuator>(
    source: TraceSource,
    actuator: A,
    config: &AppConfig,
    stop: &Arc<AtomicBool>,
) -> anyhow::Result<(StopReason, TrackerStats)> {
    let mut tracker = HandTracker::new(source, ReplayDetector, actuator, config)?;
    let reason = tracker.run(stop)?;
    Ok((reason, tracker.stats()))
}
