use std::{sync::mpsc::Receiver, thread::sleep, time::Duration};

use anyhow::{ensure, Result};
use clap::Parser;
use proctitle::set_title;
use shared_definitions::controller::{AxisTuneConfig, ResponseTuneInput};
use tilt_controller::{
    config::constants::{DEFAULT_BASE_AMPLIFICATION, DEFAULT_DECAY_FACTOR, REMOTE_CONTENT_URL},
    util::time::SystemClock,
    CalibrationStart, FeedbackDevice, HostConfig, MotionSource, ScriptRuntime, TiltHost,
};

use crate::{
    feedback::LogFeedback,
    input::{
        commands::{spawn_stdin_reader, ShellCommand},
        motion::SimulatedMotion,
    },
    runtime::SimulatedGame,
};

mod feedback;
mod input;
mod runtime;

const LOOP_PERIOD: Duration = Duration::from_millis(5);

#[derive(Parser, Debug)]
#[command(name = "Tilt Host")]
#[command(bin_name = "tilt-host")]
#[command(about = "Steers the game page with (simulated) device tilt")]
struct Cli {
    /// How long to run before shutting down, 0 runs until `q` is typed.
    #[arg(long, default_value_t = 10)]
    duration_secs: u64,

    #[arg(long, default_value_t = DEFAULT_BASE_AMPLIFICATION)]
    roll_amplification: f64,
    #[arg(long, default_value_t = DEFAULT_DECAY_FACTOR)]
    roll_decay: f64,
    #[arg(long, default_value_t = DEFAULT_BASE_AMPLIFICATION)]
    pitch_amplification: f64,
    #[arg(long, default_value_t = DEFAULT_DECAY_FACTOR)]
    pitch_decay: f64,

    /// Behave like a device without motion sensing.
    #[arg(long)]
    no_motion: bool,

    /// Time the page takes to load, writes fail until then.
    #[arg(long, default_value_t = 300)]
    page_ready_ms: u64,

    /// How often the simulated player fires.
    #[arg(long, default_value_t = 2000)]
    event_interval_ms: u64,

    /// Hide the diagnostic readout.
    #[arg(long)]
    quiet_overlay: bool,

    #[arg(long, default_value = REMOTE_CONTENT_URL)]
    url: String,
}

impl Cli {
    fn duration_ms(&self) -> u64 {
        self.duration_secs.saturating_mul(1000)
    }

    fn host_config(&self) -> Result<HostConfig> {
        for (name, value) in [
            ("roll-amplification", self.roll_amplification),
            ("roll-decay", self.roll_decay),
            ("pitch-amplification", self.pitch_amplification),
            ("pitch-decay", self.pitch_decay),
        ] {
            ensure!(
                value.is_finite() && value > 0.0,
                "--{} must be a positive number, got {}",
                name,
                value
            );
        }
        ensure!(self.event_interval_ms > 0, "--event-interval-ms must be positive");

        Ok(HostConfig {
            tuning: ResponseTuneInput {
                roll: AxisTuneConfig {
                    base_amplification: self.roll_amplification,
                    decay_factor: self.roll_decay,
                },
                pitch: AxisTuneConfig {
                    base_amplification: self.pitch_amplification,
                    decay_factor: self.pitch_decay,
                },
            },
            content_url: self.url.clone(),
            debug: !self.quiet_overlay,
            ..HostConfig::default()
        })
    }
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    set_title("tilt-host");

    let cli = Cli::parse();
    let config = cli.host_config()?;
    let commands = spawn_stdin_reader()?;

    let mut host = TiltHost::new(
        config,
        SimulatedMotion::new(!cli.no_motion),
        SimulatedGame::new(
            Duration::from_millis(cli.page_ready_ms),
            Duration::from_millis(cli.event_interval_ms),
        ),
        LogFeedback::default(),
    );

    report_calibration(host.start());
    run(&mut host, &commands, cli.duration_ms());
    host.shutdown();

    let telemetry = host.telemetry();
    println!(
        "Samples: {} - Writes: {} ({} failed) - Events: {} - Calibrations: {}",
        telemetry.samples_processed,
        telemetry.writes_dispatched,
        telemetry.write_failures,
        telemetry.events_received,
        telemetry.calibrations_committed,
    );
    if let Some(script) = host.runtime().last_script() {
        println!("Last write: {}", script);
    }
    Ok(())
}

fn run<M, R, F>(host: &mut TiltHost<M, R, F>, commands: &Receiver<ShellCommand>, duration_ms: u64)
where
    M: MotionSource,
    R: ScriptRuntime,
    F: FeedbackDevice,
{
    let clock = SystemClock::new();
    let mut last_overlay = String::new();
    loop {
        let now = clock.get_current_system_time_ms();
        if duration_ms > 0 && now >= duration_ms {
            return;
        }

        while let Ok(command) = commands.try_recv() {
            match command {
                ShellCommand::Recalibrate => report_calibration(host.reset_calibration()),
                ShellCommand::Tune(action) => {
                    host.apply_tuning(action);
                }
                ShellCommand::Quit => return,
            }
        }

        host.advance_to(now);

        if let Some(overlay) = host.overlay_text() {
            if overlay != last_overlay {
                log::trace!("\n{}", overlay);
                last_overlay = overlay.to_string();
            }
        }
        sleep(LOOP_PERIOD);
    }
}

fn report_calibration(start: CalibrationStart) {
    match start {
        CalibrationStart::Armed { cycle } => log::info!("Hold the device level (cycle {})", cycle),
        CalibrationStart::MotionUnavailable => log::info!("Running without tilt input"),
        CalibrationStart::ShutDown => log::warn!("Controller already shut down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn huge_duration_saturates() {
        let cli = Cli::parse_from(["tilt-host", "--duration-secs", &u64::MAX.to_string()]);
        assert_eq!(cli.duration_ms(), u64::MAX);

        let cli = Cli::parse_from(["tilt-host"]);
        assert_eq!(cli.duration_ms(), 10_000);
    }

    #[test]
    fn rejects_non_positive_tuning() {
        let cli = Cli::parse_from(["tilt-host", "--roll-decay", "0"]);
        assert!(cli.host_config().is_err());
    }
}
