//! The audio context: an open output stream with a mixer feeding it.

use std::sync::Arc;

use anyhow::{bail, Context};
use cpal::{
    traits::{DeviceTrait, StreamTrait},
    Device, FromSample, SampleFormat, SizedSample, Stream, StreamConfig,
};
use tracing::{debug, info, warn};

use super::{devices::pick_output_device, mixer::Mixer, tone::Beep};

/// Something beeps can be played through.
/// Only [`CpalContext`] is used at runtime, tests swap in their own.
pub trait AudioContext {
    /// Samples per second of the output.
    fn sample_rate(&self) -> u32;
    /// Starts a voice. Returns immediately, the voice plays out on its own.
    fn play(&self, beep: Beep);
    /// Returns the output's resources to the platform.
    fn close(self: Box<Self>) -> anyhow::Result<()>;
}

pub struct CpalContext {
    mixer: Arc<Mixer>,
    sample_rate: u32,
    stream: Stream,
}

impl CpalContext {
    /// Opens the output device and starts a silent stream.
    pub fn open(device_name: &str) -> anyhow::Result<Self> {
        let host = cpal::default_host();
        let device = pick_output_device(&host, device_name)?;
        let supported = device
            .default_output_config()
            .context("No default output config")?;

        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels() as usize;
        info!(
            "Output hooked into `{}` ({sample_rate}Hz, {channels} channels)",
            device.name().unwrap_or_else(|_| "unknown".to_owned())
        );

        let mixer = Arc::new(Mixer::new());
        let config = supported.config();
        let stream = match supported.sample_format() {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, mixer.clone(), channels),
            SampleFormat::I16 => build_stream::<i16>(&device, &config, mixer.clone(), channels),
            SampleFormat::U16 => build_stream::<u16>(&device, &config, mixer.clone(), channels),
            format => bail!("Unsupported sample format {format:?}"),
        }?;
        stream.play().context("Failed to start output stream")?;

        Ok(Self {
            mixer,
            sample_rate,
            stream,
        })
    }
}

impl AudioContext for CpalContext {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn play(&self, beep: Beep) {
        self.mixer.add(beep);
        debug!(voices = self.mixer.voices(), "Beep started");
    }

    fn close(self: Box<Self>) -> anyhow::Result<()> {
        self.stream.pause().context("Failed to stop output stream")?;
        Ok(())
    }
}

/// Builds an output stream of sample type `T` that pulls from the mixer.
fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    mixer: Arc<Mixer>,
    channels: usize,
) -> anyhow::Result<Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let mut buf = Vec::<f32>::new();
    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _info: &cpal::OutputCallbackInfo| {
            buf.resize(data.len(), 0.0);
            mixer.write_output(&mut buf, channels);
            for (out, &sample) in data.iter_mut().zip(buf.iter()) {
                *out = T::from_sample(sample);
            }
        },
        |err| warn!("Output stream error: {err}"),
        None,
    )?;

    Ok(stream)
}
