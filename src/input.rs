/// Input layer: turns raw crossterm events into the discrete events the
/// simulation understands.
///
/// Terminals fall into two classes:
/// * **Keyboard-enhancement capable** (kitty protocol): proper `Press` /
///   `Repeat` / `Release` events, so a released key yields `KeyUp` at once.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows up as
///   repeated `Press`).  A movement key is considered held while its last
///   press arrived within `hold_window` frames; `expired` emits the `KeyUp`
///   once it goes quiet.

use std::collections::HashMap;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Fire,
    /// Persist the high score, then exit.
    QuitAndSave,
    /// Keyboard equivalent of clicking Play.
    Start,
}

impl Action {
    /// Held actions have key-up semantics; the rest are one-shot.
    pub fn is_held(self) -> bool {
        matches!(self, Action::MoveLeft | Action::MoveRight)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Leave immediately, without saving.
    Quit,
    KeyDown(Action),
    KeyUp(Action),
    /// Left mouse button pressed at a terminal cell.
    Click { column: u16, row: u16 },
}

pub fn action_for(code: &KeyCode) -> Option<Action> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::MoveRight),
        KeyCode::Char(' ') => Some(Action::Fire),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::QuitAndSave),
        KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::Start),
        _ => None,
    }
}

// ── Held-key bookkeeping ──────────────────────────────────────────────────────

/// Maps each held action to the frame it was last seen (press or repeat).
#[derive(Debug, Default)]
pub struct KeyTracker {
    last_seen: HashMap<Action, u64>,
    hold_window: u64,
}

impl KeyTracker {
    pub fn new(hold_window: u64) -> Self {
        KeyTracker {
            last_seen: HashMap::new(),
            hold_window,
        }
    }

    /// Record a press or repeat.  Returns true if the key was not held before.
    pub fn press(&mut self, action: Action, frame: u64) -> bool {
        self.last_seen.insert(action, frame).is_none()
    }

    /// Returns true if the key was held.
    pub fn release(&mut self, action: Action) -> bool {
        self.last_seen.remove(&action).is_some()
    }

    /// Forget every key not seen within the hold window and return them.
    pub fn expire(&mut self, frame: u64) -> Vec<Action> {
        let window = self.hold_window;
        let mut gone: Vec<Action> = self
            .last_seen
            .iter()
            .filter(|(_, last)| frame.saturating_sub(**last) > window)
            .map(|(action, _)| *action)
            .collect();
        for action in &gone {
            self.last_seen.remove(action);
        }
        // HashMap order is unspecified; keep output stable.
        gone.sort_by_key(|a| *a as u8);
        gone
    }
}

// ── Event translation ─────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct InputTranslator {
    tracker: KeyTracker,
    /// True when the terminal reports key releases.
    release_events: bool,
}

impl InputTranslator {
    pub fn new(release_events: bool, hold_window: u64) -> Self {
        InputTranslator {
            tracker: KeyTracker::new(hold_window),
            release_events,
        }
    }

    pub fn translate(&mut self, event: &Event, frame: u64) -> Option<InputEvent> {
        match event {
            Event::Key(key) => self.translate_key(key, frame),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Some(InputEvent::Click {
                column: *column,
                row: *row,
            }),
            _ => None,
        }
    }

    fn translate_key(&mut self, key: &KeyEvent, frame: u64) -> Option<InputEvent> {
        match key.kind {
            KeyEventKind::Press => {
                match key.code {
                    KeyCode::Esc => return Some(InputEvent::Quit),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Some(InputEvent::Quit);
                    }
                    _ => {}
                }
                let action = action_for(&key.code)?;
                if action.is_held() {
                    // A classic-terminal repeat only refreshes the timestamp.
                    self.tracker
                        .press(action, frame)
                        .then_some(InputEvent::KeyDown(action))
                } else {
                    Some(InputEvent::KeyDown(action))
                }
            }
            KeyEventKind::Repeat => {
                let action = action_for(&key.code)?;
                if action.is_held() {
                    self.tracker.press(action, frame);
                }
                None
            }
            KeyEventKind::Release => {
                let action = action_for(&key.code)?;
                if action.is_held() && !self.tracker.release(action) {
                    return None;
                }
                Some(InputEvent::KeyUp(action))
            }
        }
    }

    /// Synthesized key-ups for keys that went quiet.  Always empty on
    /// terminals that report releases.
    pub fn expired(&mut self, frame: u64) -> Vec<InputEvent> {
        if self.release_events {
            return Vec::new();
        }
        self.tracker
            .expire(frame)
            .into_iter()
            .map(InputEvent::KeyUp)
            .collect()
    }
}
