//! Plays the short beep that goes with every button press.
//!
//! The audio context is only opened on the first beep, not at startup,
//! so a machine without any audio output never touches the audio host until asked to.
//! Audio is an extra: any failure is logged and swallowed, the grid keeps working without sound.

use std::mem;

use tracing::{debug, info, warn};

use crate::audio::{
    context::{AudioContext, CpalContext},
    tone::{Beep, BeepSettings},
};

type Opener = Box<dyn FnMut() -> anyhow::Result<Box<dyn AudioContext>>>;

enum State {
    /// Nothing opened yet, the next beep will try.
    Closed,
    Open(Box<dyn AudioContext>),
    /// Opening failed or audio is muted. Beeps do nothing.
    Unavailable,
}

pub struct Beeper {
    settings: BeepSettings,
    open: Opener,
    state: State,
}

impl Beeper {
    pub fn new(
        settings: BeepSettings,
        open: impl FnMut() -> anyhow::Result<Box<dyn AudioContext>> + 'static,
    ) -> Self {
        Self {
            settings,
            open: Box::new(open),
            state: State::Closed,
        }
    }

    /// Beeper that plays through a cpal output device, picked by name when first needed.
    pub fn cpal(settings: BeepSettings, device: String) -> Self {
        Self::new(settings, move || {
            let ctx = CpalContext::open(&device)?;
            Ok(Box::new(ctx) as Box<dyn AudioContext>)
        })
    }

    /// Beeper that never makes a sound.
    pub fn muted(settings: BeepSettings) -> Self {
        let mut this = Self::new(settings, || anyhow::bail!("Audio is muted"));
        this.state = State::Unavailable;
        this
    }

    /// Plays one beep. Never fails, at worst nothing is heard.
    pub fn beep(&mut self) {
        if let State::Closed = self.state {
            self.state = match (self.open)() {
                Ok(ctx) => {
                    debug!("Audio context opened ({}Hz)", ctx.sample_rate());
                    State::Open(ctx)
                }
                Err(e) => {
                    warn!("Audio unavailable, continuing without sound: {e:#}");
                    State::Unavailable
                }
            };
        }

        if let State::Open(ctx) = &self.state {
            ctx.play(Beep::new(&self.settings, ctx.sample_rate()));
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }

    /// Releases the audio context if one was opened.
    /// Failures are logged and otherwise ignored.
    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }

        if let State::Open(ctx) = mem::replace(&mut self.state, State::Closed) {
            match ctx.close() {
                Ok(()) => info!("Audio context closed"),
                Err(e) => warn!("Failed to close audio context: {e:#}"),
            }
        }
    }
}

impl Drop for Beeper {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod test {
    use std::{cell::RefCell, rc::Rc};

    use super::Beeper;
    use crate::audio::{
        context::AudioContext,
        tone::{Beep, BeepSettings},
    };

    #[derive(Default)]
    struct Log {
        opened: usize,
        played: usize,
        closed: usize,
    }

    struct FakeContext {
        log: Rc<RefCell<Log>>,
        fail_close: bool,
    }

    impl AudioContext for FakeContext {
        fn sample_rate(&self) -> u32 {
            8_000
        }

        fn play(&self, beep: Beep) {
            assert_eq!(beep.count(), 1120);
            self.log.borrow_mut().played += 1;
        }

        fn close(self: Box<Self>) -> anyhow::Result<()> {
            self.log.borrow_mut().closed += 1;
            if self.fail_close {
                anyhow::bail!("device went away");
            }
            Ok(())
        }
    }

    fn fake(fail_close: bool) -> (Beeper, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        let inner = log.clone();
        let beeper = Beeper::new(BeepSettings::default(), move || {
            inner.borrow_mut().opened += 1;
            Ok(Box::new(FakeContext {
                log: inner.clone(),
                fail_close,
            }) as Box<dyn AudioContext>)
        });

        (beeper, log)
    }

    #[test]
    fn test_beeper_opens_lazily() {
        let (mut beeper, log) = fake(false);
        assert_eq!(log.borrow().opened, 0);
        assert!(!beeper.is_open());

        beeper.beep();
        assert!(beeper.is_open());
        assert_eq!(log.borrow().opened, 1);
        assert_eq!(log.borrow().played, 1);
    }

    #[test]
    fn test_beeper_reuses_context() {
        let (mut beeper, log) = fake(false);
        for _ in 0..3 {
            beeper.beep();
        }

        assert_eq!(log.borrow().opened, 1);
        assert_eq!(log.borrow().played, 3);
    }

    #[test]
    fn test_beeper_closes_on_drop() {
        let (mut beeper, log) = fake(false);
        beeper.beep();
        drop(beeper);
        assert_eq!(log.borrow().closed, 1);
    }

    #[test]
    fn test_beeper_close_without_open() {
        let (beeper, log) = fake(false);
        drop(beeper);
        assert_eq!(log.borrow().closed, 0);
    }

    #[test]
    fn test_beeper_swallows_close_error() {
        let (mut beeper, log) = fake(true);
        beeper.beep();
        beeper.close();
        assert!(!beeper.is_open());
        assert_eq!(log.borrow().closed, 1);

        // Already closed, dropping doesn't close again
        drop(beeper);
        assert_eq!(log.borrow().closed, 1);
    }

    #[test]
    fn test_beeper_without_audio() {
        let attempts = Rc::new(RefCell::new(0));
        let inner = attempts.clone();
        let mut beeper = Beeper::new(BeepSettings::default(), move || {
            *inner.borrow_mut() += 1;
            anyhow::bail!("no audio host")
        });

        beeper.beep();
        beeper.beep();
        assert!(!beeper.is_open());

        // Failed once, not retried
        assert_eq!(*attempts.borrow(), 1);
    }

    #[test]
    fn test_beeper_muted() {
        let mut beeper = Beeper::muted(BeepSettings::default());
        beeper.beep();
        assert!(!beeper.is_open());
    }
}
