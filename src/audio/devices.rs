//! Picks the output device at the time the audio context is opened.

use anyhow::Context;
use cpal::{
    traits::{DeviceTrait, HostTrait},
    Device, Host,
};

use crate::misc::Similarity;

/// Finds the output device to beep through.
/// `"default"` picks the host's default output device, anything else picks
/// the device with the highest string similarity (dice coefficient) to the given name.
pub fn pick_output_device(host: &Host, wanted: &str) -> anyhow::Result<Device> {
    let wanted = wanted.to_lowercase();
    if wanted == "default" {
        return host
            .default_output_device()
            .context("No default output device");
    }

    let names = host
        .output_devices()
        .context("Failed to list output devices")?
        .map(|x| (x.name().unwrap_or_default(), x))
        .collect::<Vec<_>>();

    let index = best_match(names.iter().map(|x| x.0.as_str()), &wanted)
        .context("No output device found")?;
    names
        .into_iter()
        .nth(index)
        .map(|x| x.1)
        .context("No output device found")
}

/// Index of the name most similar to `wanted`.
fn best_match<'a>(names: impl Iterator<Item = &'a str>, wanted: &str) -> Option<usize> {
    let wanted = wanted.to_owned();
    names
        .map(|x| x.to_lowercase().similarity(&wanted))
        .enumerate()
        .reduce(|a, b| if a.1 >= b.1 { a } else { b })
        .map(|x| x.0)
}
