//! Interactive keypad on the terminal, driven by `crossterm` key events.
use std::io::Write;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal::{self, ClearType},
};
use engine::{Calculator, Key, Mode};

use crate::error::Result;

const HELP: &str =
    "digits . + - * / % | Enter: = | Backspace: delete | Del/c: clear | Esc/q: quit\r\n";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Press(Key),
    Quit,
    Ignore,
}

/// Maps a terminal key event to a calculator action.
pub fn action_for(event: KeyEvent) -> Action {
    if event.kind == KeyEventKind::Release {
        return Action::Ignore;
    }
    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
        KeyCode::Enter => Action::Press(Key::Evaluate),
        KeyCode::Backspace => Action::Press(Key::Delete),
        KeyCode::Delete => Action::Press(Key::Clear),
        KeyCode::Char(c) if !event.modifiers.contains(KeyModifiers::CONTROL) => {
            Key::from_char(c).map_or(Action::Ignore, Action::Press)
        }
        _ => Action::Ignore,
    }
}

/// One status line: the expression and the readout.
pub fn render(calc: &Calculator) -> String {
    match calc.mode() {
        Mode::Evaluated | Mode::Failed => format!("{} = {}", calc.buffer(), calc.readout()),
        Mode::Editing if calc.buffer().is_empty() => calc.readout().to_string(),
        Mode::Editing => calc.buffer().to_string(),
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

pub fn run() -> Result<()> {
    let _raw = RawModeGuard::enter()?;
    let mut out = std::io::stdout();
    let mut calc = Calculator::new();

    execute!(out, Print(HELP))?;
    redraw(&mut out, &calc)?;

    loop {
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        match action_for(key_event) {
            Action::Quit => break,
            Action::Ignore => {}
            Action::Press(key) => {
                calc.press(key);
                tracing::debug!(?key, buffer = calc.buffer(), "key pressed");
                redraw(&mut out, &calc)?;
            }
        }
    }

    execute!(out, Print("\r\n"))?;
    out.flush()?;
    Ok(())
}

fn redraw(out: &mut impl Write, calc: &Calculator) -> Result<()> {
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(render(calc))
    )?;
    out.flush()?;
    Ok(())
}
