use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Quit,
    CentreFlash,
    ForceBolt,
}

pub(crate) fn key_action(key: KeyEvent) -> Option<KeyAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return command_char_matches_keycode(key.code, 'c').then_some(KeyAction::Quit);
    }
    match key.code {
        KeyCode::Esc => Some(KeyAction::Quit),
        KeyCode::Char(' ') | KeyCode::Enter => Some(KeyAction::CentreFlash),
        code if command_char_matches_keycode(code, 'q') => Some(KeyAction::Quit),
        code if command_char_matches_keycode(code, 'b') => Some(KeyAction::ForceBolt),
        _ => None,
    }
}

fn command_char_matches_keycode(code: KeyCode, target: char) -> bool {
    matches!(code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&target))
}
