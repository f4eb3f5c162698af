//! Key bindings
//!
//! Maps the game's key vocabulary onto [`TickInput`]s. Front ends translate
//! their own key events into [`Key`]s; the headless driver parses words.

use serde::{Deserialize, Serialize};

use crate::sim::{Purchase, TickInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Power up
    W,
    /// Power down
    S,
    /// Buy fuel
    F,
    /// Buy a parachute
    P,
    /// Repair, or restart once the game is over
    R,
    /// Arm a larger shot
    X,
    /// Fire
    Space,
}

impl Key {
    /// Parse a key name (`left`, `w`, `space`, `fire`, ...)
    pub fn parse(word: &str) -> Option<Key> {
        let key = match word.trim().to_ascii_lowercase().as_str() {
            "left" => Key::Left,
            "right" => Key::Right,
            "up" => Key::Up,
            "down" => Key::Down,
            "w" => Key::W,
            "s" => Key::S,
            "f" => Key::F,
            "p" => Key::P,
            "r" => Key::R,
            "x" => Key::X,
            "space" | "fire" | " " => Key::Space,
            _ => return None,
        };
        Some(key)
    }
}

/// Input for one tick in which `key` was pressed
pub fn input_for_key(key: Key, game_over: bool) -> TickInput {
    let mut input = TickInput::default();
    match key {
        Key::Left => input.move_dir = -1.0,
        Key::Right => input.move_dir = 1.0,
        Key::Up => input.aim = 1.0,
        Key::Down => input.aim = -1.0,
        Key::W => input.power = 1.0,
        Key::S => input.power = -1.0,
        Key::F => input.purchase = Some(Purchase::Fuel),
        Key::P => input.purchase = Some(Purchase::Parachute),
        Key::R if game_over => input.restart = true,
        Key::R => input.purchase = Some(Purchase::Repair),
        Key::X => input.purchase = Some(Purchase::LargerShot),
        Key::Space => input.fire = true,
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_names() {
        assert_eq!(Key::parse("LEFT"), Some(Key::Left));
        assert_eq!(Key::parse(" w "), Some(Key::W));
        assert_eq!(Key::parse("fire"), Some(Key::Space));
        assert_eq!(Key::parse("space"), Some(Key::Space));
        assert_eq!(Key::parse("q"), None);
    }

    #[test]
    fn test_r_repairs_until_game_over() {
        assert_eq!(input_for_key(Key::R, false).purchase, Some(Purchase::Repair));
        let over = input_for_key(Key::R, true);
        assert!(over.restart);
        assert_eq!(over.purchase, None);
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(input_for_key(Key::Left, false).move_dir, -1.0);
        assert_eq!(input_for_key(Key::Down, false).aim, -1.0);
        assert!(input_for_key(Key::Space, false).fire);
    }
}
