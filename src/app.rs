//! The widget: one button, one grid, one beep.

use std::{thread, time::Instant};

use anyhow::Context;
use crossbeam::channel::{self, select, Receiver};
use crossterm::event::{self, Event};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::{
    animation::Driver,
    args::Args,
    beeper::Beeper,
    console::{self, Action, Console, View},
};

pub struct App<R: Rng> {
    driver: Driver<R>,
    beeper: Beeper,
}

impl<R: Rng> App<R> {
    pub fn new(driver: Driver<R>, beeper: Beeper) -> Self {
        Self { driver, beeper }
    }

    /// The speaker button. Beeps and starts a new pass.
    /// The pass start is read from `clock` after the beep, the first beep may block on opening the device.
    pub fn press(&mut self, clock: impl FnOnce() -> Instant) {
        debug!("Button pressed");
        self.beeper.beep();
        self.driver.trigger(clock());
    }

    /// Runs the pending frame. Returns true if the grid needs redrawing.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.driver.tick(now)
    }

    /// True while a frame is waiting to be run.
    pub fn wants_frame(&self) -> bool {
        self.driver.pending_frames() > 0
    }

    pub fn view(&self) -> View<'_> {
        View {
            grid: self.driver.grid(),
            animating: self.driver.is_animating(),
        }
    }

    /// Cancels the pending frame and releases the audio context.
    pub fn teardown(&mut self) {
        self.driver.cancel();
        self.beeper.close();
    }
}

impl<R: Rng> Drop for App<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Runs the widget until the user quits.
pub fn run(args: &Args) -> anyhow::Result<()> {
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let beeper = match args.mute {
        true => Beeper::muted(args.beep()),
        false => Beeper::cpal(args.beep(), args.output_device.clone()),
    };

    let mut app = App::new(Driver::new(rng, args.duration()), beeper);
    let console = Console::enter()?;
    let events = spawn_input();
    let frames = channel::tick(args.frame_interval());
    let idle = channel::never::<Instant>();

    console.draw(&app.view())?;
    loop {
        // Only wake up for frames while a pass wants one
        let ticker = match app.wants_frame() {
            true => frames.clone(),
            false => idle.clone(),
        };

        select! {
            recv(events) -> event => {
                let event = event.context("Input thread stopped")?;
                match console::action(&event) {
                    Some(Action::Quit) => break,
                    Some(Action::Press) => {
                        app.press(Instant::now);
                        console.draw(&app.view())?;
                    }
                    Some(Action::Redraw) => {
                        console.clear()?;
                        console.draw(&app.view())?;
                    }
                    None => {}
                }
            }
            recv(ticker) -> _ => {
                if app.tick(Instant::now()) {
                    console.draw(&app.view())?;
                }
            }
        }
    }

    app.teardown();
    drop(console);
    info!("Exited cleanly");
    Ok(())
}

/// Reads terminal events on their own thread so the frame loop never blocks on input.
fn spawn_input() -> Receiver<Event> {
    let (tx, rx) = channel::unbounded();
    thread::spawn(move || loop {
        match event::read() {
            Ok(event) => {
                if tx.send(event).is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!("Failed to read terminal event: {e}");
                break;
            }
        }
    });

    rx
}
