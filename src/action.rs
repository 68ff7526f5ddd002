use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Resize,
    None,
}

/// Maps a raw terminal event to what the controller should do with it.
pub fn map_event(event: &Event, quit_key: KeyCode) -> Action {
    match event {
        Event::Key(key) => map_key(key, quit_key),
        Event::Resize(_, _) => Action::Resize,
        _ => Action::None,
    }
}

fn map_key(key: &KeyEvent, quit_key: KeyCode) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }
    // Raw mode swallows SIGINT, so Ctrl+C arrives as a key and always quits.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == quit_key {
        return Action::Quit;
    }
    Action::None
}
