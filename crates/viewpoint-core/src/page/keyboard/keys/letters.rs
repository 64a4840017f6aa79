//! Letter key definitions (a-z, A-Z).

use super::definition::KeyDefinition;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn code_for(letter: char) -> &'static str {
    match letter.to_ascii_uppercase() {
        'A' => "KeyA",
        'B' => "KeyB",
        'C' => "KeyC",
        'D' => "KeyD",
        'E' => "KeyE",
        'F' => "KeyF",
        'G' => "KeyG",
        'H' => "KeyH",
        'I' => "KeyI",
        'J' => "KeyJ",
        'K' => "KeyK",
        'L' => "KeyL",
        'M' => "KeyM",
        'N' => "KeyN",
        'O' => "KeyO",
        'P' => "KeyP",
        'Q' => "KeyQ",
        'R' => "KeyR",
        'S' => "KeyS",
        'T' => "KeyT",
        'U' => "KeyU",
        'V' => "KeyV",
        'W' => "KeyW",
        'X' => "KeyX",
        'Y' => "KeyY",
        'Z' => "KeyZ",
        _ => unreachable!("not an ASCII letter"),
    }
}

fn key_code_for(letter: char) -> i64 {
    i64::from(letter.to_ascii_uppercase() as u32)
}

/// Get the key definition for a lowercase letter (e.g. `"a"`).
pub fn get_lowercase_letter_key(key: &str) -> Option<KeyDefinition> {
    let ch = key.chars().next()?;
    if key.chars().count() != 1 || !LOWERCASE.contains(ch) {
        return None;
    }
    let text: &'static str = match ch {
        'a'..='z' => {
            let idx = (ch as u8 - b'a') as usize;
            &LOWERCASE[idx..=idx]
        }
        _ => return None,
    };
    Some(KeyDefinition {
        code: code_for(ch),
        key: text,
        key_code: key_code_for(ch),
        text: Some(text),
        is_keypad: false,
        location: 0,
    })
}

/// Get the key definition for an uppercase letter (e.g. `"A"`).
pub fn get_uppercase_letter_key(key: &str) -> Option<KeyDefinition> {
    let ch = key.chars().next()?;
    if key.chars().count() != 1 || !UPPERCASE.contains(ch) {
        return None;
    }
    let text: &'static str = {
        let idx = (ch as u8 - b'A') as usize;
        &UPPERCASE[idx..=idx]
    };
    Some(KeyDefinition {
        code: code_for(ch),
        key: text,
        key_code: key_code_for(ch),
        text: Some(text),
        is_keypad: false,
        location: 0,
    })
}
