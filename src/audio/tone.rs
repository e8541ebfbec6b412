use std::{f32::consts::PI, time::Duration};

/// Gain the envelope starts from. Exponential ramps can't start at zero.
const START_GAIN: f32 = 0.001;
/// Gain the envelope decays to by the end of the beep.
const END_GAIN: f32 = 0.0001;
/// Time to ramp from [`START_GAIN`] up to the peak.
const ATTACK: Duration = Duration::from_millis(10);

/// Plain sine oscillator.
#[derive(Clone, Copy, Debug)]
pub struct Tone {
    i: usize,
    tone: f32,
    sample_rate: f32,
    duration: Option<usize>,
}

/// Gain curve of a beep.
/// Exponential ramp from [`START_GAIN`] to `peak` over [`ATTACK`],
/// then an exponential ramp down to [`END_GAIN`] at `length`.
#[derive(Clone, Copy, Debug)]
pub struct Envelope {
    peak: f32,
    attack: f32,
    length: f32,
}

/// What a beep sounds like.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeepSettings {
    pub frequency: f32,
    pub length: Duration,
    pub peak_gain: f32,
}

/// A single finite voice: a [`Tone`] shaped by an [`Envelope`].
/// Yields mono samples until the beep is over.
#[derive(Clone, Copy, Debug)]
pub struct Beep {
    tone: Tone,
    envelope: Envelope,
}

impl Tone {
    pub fn new(tone: f32, sample_rate: u32) -> Self {
        Self {
            i: 0,
            sample_rate: sample_rate as f32,
            tone,
            duration: None,
        }
    }

    /// Limit the tone to `duration` samples.
    pub fn duration(mut self, duration: usize) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Seconds of audio produced so far.
    pub fn time(&self) -> f32 {
        self.i as f32 / self.sample_rate
    }
}

impl Iterator for Tone {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        match self.duration {
            Some(i) if self.i >= i => return None,
            _ => {}
        }

        let out = (self.i as f32 * self.tone * 2.0 * PI / self.sample_rate).sin();
        self.i += 1;
        Some(out)
    }
}

impl Envelope {
    pub fn new(peak: f32, length: Duration) -> Self {
        Self {
            peak,
            attack: ATTACK.as_secs_f32(),
            length: length.as_secs_f32(),
        }
    }

    /// Gain at `t` seconds after the start of the beep.
    pub fn gain_at(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return START_GAIN;
        }

        if t < self.attack {
            return exp_ramp(START_GAIN, self.peak, t / self.attack);
        }

        if t < self.length {
            let span = self.length - self.attack;
            return exp_ramp(self.peak, END_GAIN, (t - self.attack) / span);
        }

        END_GAIN
    }
}

impl Default for BeepSettings {
    fn default() -> Self {
        Self {
            frequency: 880.0,
            length: Duration::from_millis(140),
            peak_gain: 0.2,
        }
    }
}

impl Beep {
    pub fn new(settings: &BeepSettings, sample_rate: u32) -> Self {
        let samples = (settings.length.as_secs_f32() * sample_rate as f32).round() as usize;
        Self {
            tone: Tone::new(settings.frequency, sample_rate).duration(samples),
            envelope: Envelope::new(settings.peak_gain, settings.length),
        }
    }
}

impl Iterator for Beep {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let gain = self.envelope.gain_at(self.tone.time());
        Some(self.tone.next()? * gain)
    }
}

/// Web audio style exponential ramp from `from` to `to`, `t` in 0..=1.
fn exp_ramp(from: f32, to: f32, t: f32) -> f32 {
    from * (to / from).powf(t.clamp(0.0, 1.0))
}
