//! Sums every playing beep into the output stream.

use parking_lot::Mutex;

use super::tone::Beep;

/// Shared between the audio callback and whoever starts beeps.
/// Overlapping beeps each get their own voice.
#[derive(Default)]
pub struct Mixer {
    voices: Mutex<Vec<Beep>>,
}

impl Mixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start playing a voice.
    pub fn add(&self, beep: Beep) {
        self.voices.lock().push(beep);
    }

    /// Number of voices that still have samples left.
    pub fn voices(&self) -> usize {
        self.voices.lock().len()
    }

    /// Fills an interleaved output buffer.
    /// Every channel of a frame gets the same mono sample.
    /// Finished voices are dropped.
    pub fn write_output(&self, output: &mut [f32], channels: usize) {
        let mut voices = self.voices.lock();
        let channels = channels.max(1);
        let mut last = 0.0;

        for (i, e) in output.iter_mut().enumerate() {
            if i % channels == 0 {
                let mut sum = 0.0;
                voices.retain_mut(|voice| match voice.next() {
                    Some(sample) => {
                        sum += sample;
                        true
                    }
                    None => false,
                });
                last = sum.clamp(-1.0, 1.0);
            }

            *e = last;
        }
    }
}
