use std::{path::PathBuf, time::Duration};

use anyhow::ensure;
use clap::Parser;

use crate::{animation::PASS_DURATION, audio::tone::BeepSettings};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "beep-grid",
    version,
    about = "Press the speaker: the numbers grow and turn green."
)]
pub struct Args {
    /// Frequency of the beep in Hz.
    #[arg(long, default_value_t = 880.0)]
    pub frequency: f32,

    /// Length of the beep in milliseconds.
    #[arg(long, default_value_t = 140)]
    pub beep_ms: u64,

    /// Loudest point of the beep, 0 to 1.
    #[arg(long, default_value_t = 0.2)]
    pub peak_gain: f32,

    /// How long the numbers take to reach their targets, in milliseconds.
    #[arg(long, default_value_t = PASS_DURATION.as_millis() as u64)]
    pub duration_ms: u64,

    /// Frames per second while animating.
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Output device to beep through.
    /// Picked by closest name, `default` uses the system default.
    #[arg(short, long, default_value = "default")]
    pub output_device: String,

    /// Never open an audio device.
    #[arg(long)]
    pub mute: bool,

    /// Seed for the random numbers, for repeatable runs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file. Without it logs are dropped, the terminal is in use.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. `info` or `beep_grid=debug`.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Checks the values clap can't.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            (1..=240).contains(&self.fps),
            "fps must be between 1 and 240, got {}",
            self.fps
        );
        ensure!(self.duration_ms > 0, "duration-ms must be above zero");
        ensure!(
            self.beep_ms > 10,
            "beep-ms must be longer than the 10ms attack, got {}",
            self.beep_ms
        );
        ensure!(
            self.frequency > 0.0 && self.frequency.is_finite(),
            "frequency must be positive, got {}",
            self.frequency
        );
        ensure!(
            (0.0..=1.0).contains(&self.peak_gain) && self.peak_gain > 0.0,
            "peak-gain must be in (0, 1], got {}",
            self.peak_gain
        );

        Ok(())
    }

    pub fn beep(&self) -> BeepSettings {
        BeepSettings {
            frequency: self.frequency,
            length: Duration::from_millis(self.beep_ms),
            peak_gain: self.peak_gain,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}
