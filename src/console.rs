//! Draws the widget in the terminal and turns terminal events into actions.

use std::{
    io::{self, stdout, Write},
    panic,
};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    execute, queue, style, terminal,
};

use crate::{grid::Grid, misc::buf_writer::BufWriter};

const LABEL_IDLE: &str = "Play and animate numbers";
const LABEL_BUSY: &str = "Animating numbers";
const CAPTION: &str = "Click speaker";
const FOOTER: &str = "Multiple numbers grow and turn green.";

const MARGIN: u16 = 2;
const BUTTON_ROW: u16 = 1;
const STATUS_ROW: u16 = 3;
const GRID_ROW: u16 = 5;
const CELL_WIDTH: u16 = 6;
/// Each grid row takes a line for the cell and a blank line below.
const ROW_HEIGHT: u16 = 2;

/// What a terminal event means to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The speaker button was pressed.
    Press,
    Quit,
    /// Screen needs clearing and drawing again.
    Redraw,
}

/// Everything the renderer needs to draw one frame.
pub struct View<'a> {
    pub grid: &'a Grid,
    pub animating: bool,
}

/// Owns the terminal while the widget is running.
/// Puts it back the way it was when dropped.
pub struct Console {
    _private: (),
}

impl Console {
    /// Enters raw mode and the alternate screen.
    pub fn enter() -> anyhow::Result<Self> {
        // Sets a panic hook
        // The terminal will be in a weird state if the program panics without it.
        let default_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = exit();
            default_hook(info);
        }));

        terminal::enable_raw_mode().context("Failed to enable raw mode")?;

        // Restores the terminal on drop, including if the setup below fails
        let console = Self { _private: () };
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            terminal::DisableLineWrap,
            terminal::Clear(terminal::ClearType::All),
            event::EnableMouseCapture,
            cursor::Hide,
        )
        .context("Failed to set up terminal")?;

        Ok(console)
    }

    /// Draws a frame to stdout in one write.
    pub fn draw(&self, view: &View) -> anyhow::Result<()> {
        let mut stdout = BufWriter::new(stdout());
        render(&mut stdout, view)?;
        stdout.flush()?;
        Ok(())
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        execute!(stdout(), terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        let _ = exit();
    }
}

/// Cleans up the terminal and disables raw mode.
fn exit() -> io::Result<()> {
    execute!(
        stdout(),
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        terminal::EnableLineWrap,
        cursor::Show
    )?;
    terminal::disable_raw_mode()
}

/// Accessible name of the button.
pub fn button_label(animating: bool) -> &'static str {
    match animating {
        true => LABEL_BUSY,
        false => LABEL_IDLE,
    }
}

/// The button drawn as text, padded so it is always the same width.
fn button_text(animating: bool) -> String {
    let width = LABEL_IDLE.len().max(LABEL_BUSY.len());
    format!("[ ♪ {:<width$} ]", button_label(animating))
}

fn button_width() -> u16 {
    button_text(false).chars().count() as u16
}

/// True if the cell at `column`, `row` is part of the button.
pub fn hits_button(column: u16, row: u16) -> bool {
    row == BUTTON_ROW && (MARGIN..MARGIN + button_width()).contains(&column)
}

/// Maps a terminal event to what it should do, if anything.
pub fn action(event: &Event) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Quit)
            }
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Press),
            _ => None,
        },
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if hits_button(mouse.column, mouse.row) => {
                Some(Action::Press)
            }
            _ => None,
        },
        Event::Resize(..) => Some(Action::Redraw),
        _ => None,
    }
}

/// Queues one full frame of the widget onto `out`.
pub fn render(out: &mut impl Write, view: &View) -> io::Result<()> {
    // Header: the speaker button and its caption
    queue!(
        out,
        cursor::MoveTo(MARGIN, BUTTON_ROW),
        style::SetAttribute(style::Attribute::Reverse),
        style::Print(button_text(view.animating)),
        style::SetAttribute(style::Attribute::Reset),
        style::Print(format!("  {CAPTION}")),
    )?;

    // Results region, marked busy while a pass is running
    let status = match view.animating {
        true => "Results (busy)",
        false => "Results       ",
    };
    queue!(
        out,
        cursor::MoveTo(MARGIN, STATUS_ROW),
        style::SetForegroundColor(style::Color::DarkGrey),
        style::Print(status),
        style::ResetColor,
    )?;

    for (y, row) in view.grid.rows().enumerate() {
        queue!(out, cursor::MoveTo(MARGIN, GRID_ROW + y as u16 * ROW_HEIGHT))?;
        for (value, active) in row {
            let cell = format!("{value:^width$}", width = CELL_WIDTH as usize - 1);
            if active {
                queue!(
                    out,
                    style::SetBackgroundColor(style::Color::DarkGreen),
                    style::SetForegroundColor(style::Color::White),
                    style::SetAttribute(style::Attribute::Bold),
                )?;
            } else {
                queue!(
                    out,
                    style::SetBackgroundColor(style::Color::DarkGrey),
                    style::SetForegroundColor(style::Color::Grey),
                )?;
            }

            queue!(
                out,
                style::Print(cell),
                style::SetAttribute(style::Attribute::Reset),
                style::ResetColor,
                style::Print(" "),
            )?;
        }
    }

    let rows = view.grid.rows().count() as u16;
    queue!(
        out,
        cursor::MoveTo(MARGIN, GRID_ROW + rows * ROW_HEIGHT),
        style::SetForegroundColor(style::Color::DarkGrey),
        style::Print(FOOTER),
        style::ResetColor,
    )?;

    Ok(())
}

#[cfg(test)]
mod test {
    use crossterm::event::{
        Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };

    use super::{action, button_label, hits_button, render, Action, View, BUTTON_ROW, MARGIN};
    use crate::grid::Grid;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn rendered(animating: bool, grid: &Grid) -> String {
        let mut out = Vec::new();
        render(&mut out, &View { grid, animating }).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_button_label() {
        assert_eq!(button_label(true), "Animating numbers");
        assert_eq!(button_label(false), "Play and animate numbers");
    }

    #[test]
    fn test_keys() {
        assert_eq!(action(&key(KeyCode::Char(' '))), Some(Action::Press));
        assert_eq!(action(&key(KeyCode::Enter)), Some(Action::Press));
        assert_eq!(action(&key(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(action(&key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(action(&key(KeyCode::Char('x'))), None);

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(action(&ctrl_c), Some(Action::Quit));
    }

    #[test]
    fn test_mouse() {
        assert!(hits_button(MARGIN, BUTTON_ROW));
        assert!(!hits_button(MARGIN - 1, BUTTON_ROW));
        assert!(!hits_button(MARGIN, BUTTON_ROW + 1));

        assert_eq!(action(&click(MARGIN + 3, BUTTON_ROW)), Some(Action::Press));
        assert_eq!(action(&click(0, 10)), None);
    }

    #[test]
    fn test_resize() {
        assert_eq!(action(&Event::Resize(80, 24)), Some(Action::Redraw));
    }

    #[test]
    fn test_render_contents() {
        let grid = Grid::new(std::array::from_fn(|i| i as i32 * 7));
        let idle = rendered(false, &grid);
        assert!(idle.contains("Play and animate numbers"));
        assert!(idle.contains("Click speaker"));
        assert!(idle.contains("Multiple numbers grow and turn green."));
        assert!(!idle.contains("busy"));
        assert!(idle.contains("105"));

        let busy = rendered(true, &grid);
        assert!(busy.contains("Animating numbers"));
        assert!(busy.contains("(busy)"));
    }
}
