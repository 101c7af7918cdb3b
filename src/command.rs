use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A keypress translated into what the screens care about
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Esc,
    Home,
    End,
    Next,
    Prev,
    P,
    Q,
    R,
    M,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (_, KeyCode::Enter) => Some(Command::Enter),
            (_, KeyCode::Esc) => Some(Command::Esc),
            (_, KeyCode::Home) => Some(Command::Home),
            (_, KeyCode::End) => Some(Command::End),
            (_, KeyCode::Tab) => Some(Command::Next),
            (_, KeyCode::BackTab) => Some(Command::Prev),
            (_, KeyCode::Up) => Some(Command::Up),
            (_, KeyCode::Down) => Some(Command::Down),
            (_, KeyCode::Left) => Some(Command::Left),
            (_, KeyCode::Right) => Some(Command::Right),
            (m, KeyCode::Char(c)) if normal_modifiers.contains(m) => match c {
                'w' | 'k' | '8' => Some(Command::Up),
                's' | 'j' | '2' => Some(Command::Down),
                'a' | 'h' | '4' => Some(Command::Left),
                'd' | 'l' | '6' => Some(Command::Right),
                ' ' => Some(Command::Space),
                'p' => Some(Command::P),
                'q' => Some(Command::Q),
                'r' => Some(Command::R),
                'm' => Some(Command::M),
                _ => None,
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Command::Quit))]
    #[case(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE), Some(Command::Up))]
    #[case(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE), Some(Command::Up))]
    #[case(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE), Some(Command::Left))]
    #[case(KeyEvent::new(KeyCode::Char('6'), KeyModifiers::NONE), Some(Command::Right))]
    #[case(KeyEvent::new(KeyCode::Char('S'), KeyModifiers::SHIFT), None)]
    #[case(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE), Some(Command::Space))]
    #[case(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::ALT), None)]
    #[case(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), Some(Command::Esc))]
    #[case(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT), Some(Command::Prev))]
    #[case(KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE), None)]
    fn test_from_key_event(#[case] ev: KeyEvent, #[case] cmd: Option<Command>) {
        assert_eq!(Command::from_key_event(ev), cmd);
    }
}
