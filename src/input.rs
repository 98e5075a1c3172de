use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};
use serde::{Deserialize, Serialize};

/// Canonical movement directions.
///
/// `Up` increases `y` and `Down` decreases it; renderers flip rows as needed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Maps a host key identifier (`"arrowup"`, `"w"`, `"k"`, ...) to a direction.
    ///
    /// Matching is case-insensitive.
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "arrowup" | "up" | "w" | "k" => Some(Self::Up),
            "arrowdown" | "down" | "s" | "j" => Some(Self::Down),
            "arrowleft" | "left" | "a" | "h" => Some(Self::Left),
            "arrowright" | "right" | "d" | "l" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Normalized input events the host wires into the engine.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InputAction {
    Steer(Direction),
    /// Turbo engaged (`true`) or released (`false`).
    Turbo(bool),
    /// Halt the run loop, keeping state.
    Stop,
    /// Enter the running state from the start screen or after a stop.
    Start,
    /// Leave the host program.
    Quit,
}

/// Translates terminal key events into [`InputAction`]s.
///
/// Turbo follows the Shift key. Terminals that report key releases get a true
/// hold-to-accelerate; elsewhere a Shift-modified direction key engages turbo
/// and the next plain direction key releases it.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputAdapter {
    turbo_held: bool,
}

impl InputAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the actions produced by one key event, in application order.
    pub fn translate(&mut self, event: KeyEvent) -> Vec<InputAction> {
        if let KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) =
            event.code
        {
            let held = event.kind != KeyEventKind::Release;
            return self.set_turbo(held).into_iter().collect();
        }

        if event.kind == KeyEventKind::Release {
            return Vec::new();
        }

        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            return vec![InputAction::Quit];
        }

        match event.code {
            KeyCode::Esc => vec![InputAction::Stop],
            KeyCode::Enter | KeyCode::Char(' ') => vec![InputAction::Start],
            KeyCode::Char('q') => vec![InputAction::Quit],
            code => {
                let Some(direction) = direction_for_code(code) else {
                    return Vec::new();
                };

                let shifted = event.modifiers.contains(KeyModifiers::SHIFT)
                    || matches!(code, KeyCode::Char(c) if c.is_ascii_uppercase());

                let mut actions = Vec::with_capacity(2);
                actions.extend(self.set_turbo(shifted));
                actions.push(InputAction::Steer(direction));
                actions
            }
        }
    }

    fn set_turbo(&mut self, held: bool) -> Option<InputAction> {
        if self.turbo_held == held {
            return None;
        }
        self.turbo_held = held;
        Some(InputAction::Turbo(held))
    }
}

fn direction_for_code(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        KeyCode::Char(c) => Direction::from_key_name(c.encode_utf8(&mut [0; 4])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{
        KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, ModifierKeyCode,
    };

    use super::{Direction, InputAction, InputAdapter, direction_change_is_valid};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn with_kind(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn reversal_is_not_a_valid_change() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(
            Direction::Left,
            Direction::Right
        ));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn key_names_cover_arrows_wasd_and_vim() {
        for (name, expected) in [
            ("ArrowUp", Direction::Up),
            ("w", Direction::Up),
            ("K", Direction::Up),
            ("s", Direction::Down),
            ("j", Direction::Down),
            ("a", Direction::Left),
            ("h", Direction::Left),
            ("D", Direction::Right),
            ("l", Direction::Right),
        ] {
            assert_eq!(Direction::from_key_name(name), Some(expected), "{name}");
        }

        assert_eq!(Direction::from_key_name("x"), None);
    }

    #[test]
    fn plain_direction_key_steers_without_turbo() {
        let mut adapter = InputAdapter::new();

        let actions = adapter.translate(press(KeyCode::Char('a'), KeyModifiers::NONE));

        assert_eq!(actions, vec![InputAction::Steer(Direction::Left)]);
    }

    #[test]
    fn shift_press_and_release_toggle_turbo() {
        let mut adapter = InputAdapter::new();
        let shift = KeyCode::Modifier(ModifierKeyCode::LeftShift);

        assert_eq!(
            adapter.translate(with_kind(shift, KeyEventKind::Press)),
            vec![InputAction::Turbo(true)]
        );
        assert!(adapter.translate(with_kind(shift, KeyEventKind::Repeat)).is_empty());
        assert_eq!(
            adapter.translate(with_kind(shift, KeyEventKind::Release)),
            vec![InputAction::Turbo(false)]
        );
    }

    #[test]
    fn shifted_direction_engages_turbo_until_plain_key() {
        let mut adapter = InputAdapter::new();

        assert_eq!(
            adapter.translate(press(KeyCode::Up, KeyModifiers::SHIFT)),
            vec![InputAction::Turbo(true), InputAction::Steer(Direction::Up)]
        );
        assert_eq!(
            adapter.translate(press(KeyCode::Char('L'), KeyModifiers::NONE)),
            vec![InputAction::Steer(Direction::Right)]
        );
        assert_eq!(
            adapter.translate(press(KeyCode::Char('h'), KeyModifiers::NONE)),
            vec![InputAction::Turbo(false), InputAction::Steer(Direction::Left)]
        );
    }

    #[test]
    fn control_keys_map_to_lifecycle_actions() {
        let mut adapter = InputAdapter::new();

        assert_eq!(
            adapter.translate(press(KeyCode::Esc, KeyModifiers::NONE)),
            vec![InputAction::Stop]
        );
        assert_eq!(
            adapter.translate(press(KeyCode::Enter, KeyModifiers::NONE)),
            vec![InputAction::Start]
        );
        assert_eq!(
            adapter.translate(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            vec![InputAction::Quit]
        );
        assert!(
            adapter
                .translate(with_kind(KeyCode::Char('w'), KeyEventKind::Release))
                .is_empty()
        );
    }
}
