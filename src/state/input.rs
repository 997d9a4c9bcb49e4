//! Keyboard and joystick input, queued by browser callbacks and drained once
//! per tick so a frame always sees a consistent snapshot.

use std::collections::{HashSet, VecDeque};

use crate::model::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Maps a `KeyboardEvent::key()` value; anything but the arrows is ignored.
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoystickDir {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    KeyDown(Key),
    KeyUp(Key),
    Joystick(JoystickDir),
    /// Window lost focus: keyup events will never arrive for held keys.
    ReleaseAll,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    queue: VecDeque<InputCommand>,
    held: HashSet<Key>,
    joystick: JoystickDir,
}

impl InputState {
    pub fn push(&mut self, cmd: InputCommand) {
        self.queue.push_back(cmd);
    }

    /// Applies every queued command in arrival order.
    pub fn drain(&mut self) {
        while let Some(cmd) = self.queue.pop_front() {
            match cmd {
                InputCommand::KeyDown(k) => {
                    self.held.insert(k);
                }
                InputCommand::KeyUp(k) => {
                    self.held.remove(&k);
                }
                InputCommand::Joystick(dir) => self.joystick = dir,
                InputCommand::ReleaseAll => {
                    self.held.clear();
                    self.joystick = JoystickDir::None;
                }
            }
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Picks at most one direction for this frame. Up, Down, Left, Right are
    /// checked in that order and either source may satisfy each check.
    pub fn resolve(&self) -> Option<Direction> {
        const ORDER: [(Key, JoystickDir, Direction); 4] = [
            (Key::Up, JoystickDir::Up, Direction::Up),
            (Key::Down, JoystickDir::Down, Direction::Down),
            (Key::Left, JoystickDir::Left, Direction::Left),
            (Key::Right, JoystickDir::Right, Direction::Right),
        ];
        ORDER
            .iter()
            .find(|(key, joy, _)| self.is_held(*key) || self.joystick == *joy)
            .map(|(_, _, dir)| *dir)
    }
}
