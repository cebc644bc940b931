// Key bindings: terminal key events -> UI commands.
//
// Pure mapping, no state. The app decides what each command does to the
// controller; this table only decides which key means what.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which widget has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Grid,
    SizeField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // Grid focus
    MoveCursor { drow: i32, dcol: i32 },
    NextCell,
    PrevCell,
    /// Append a character to the focused cell (filtered by the engine)
    TypeChar(char),
    Backspace,
    ClearCell,
    Evaluate,
    DecreaseSize,
    IncreaseSize,
    Randomize,
    Reset,
    EditSize,
    ToggleHelp,
    Quit,

    // Size field focus
    SizeChar(char),
    SizeBackspace,
    CommitSize,
    CancelSize,
}

pub fn command_for(focus: Focus, key: KeyEvent) -> Option<Command> {
    match focus {
        Focus::Grid => grid_command(key),
        Focus::SizeField => size_command(key),
    }
}

fn grid_command(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    let cmd = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char('?') => Command::ToggleHelp,
        KeyCode::Up | KeyCode::Char('k') => Command::MoveCursor { drow: -1, dcol: 0 },
        KeyCode::Down | KeyCode::Char('j') => Command::MoveCursor { drow: 1, dcol: 0 },
        KeyCode::Left | KeyCode::Char('h') => Command::MoveCursor { drow: 0, dcol: -1 },
        KeyCode::Right | KeyCode::Char('l') => Command::MoveCursor { drow: 0, dcol: 1 },
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Command::PrevCell,
        KeyCode::Tab => Command::NextCell,
        KeyCode::BackTab => Command::PrevCell,
        KeyCode::Char(c @ ('0'..='9' | '-')) => Command::TypeChar(c),
        KeyCode::Backspace => Command::Backspace,
        KeyCode::Delete => Command::ClearCell,
        KeyCode::Enter => Command::Evaluate,
        KeyCode::Char('[' | '<') => Command::DecreaseSize,
        KeyCode::Char(']' | '>') => Command::IncreaseSize,
        KeyCode::Char('s') => Command::EditSize,
        KeyCode::Char('r') => Command::Randomize,
        KeyCode::Char('c') => Command::Reset,
        _ => return None,
    };
    Some(cmd)
}

fn size_command(key: KeyEvent) -> Option<Command> {
    let cmd = match key.code {
        KeyCode::Char(c @ '0'..='9') => Command::SizeChar(c),
        KeyCode::Backspace => Command::SizeBackspace,
        KeyCode::Enter => Command::CommitSize,
        KeyCode::Esc => Command::CancelSize,
        _ => return None,
    };
    Some(cmd)
}
