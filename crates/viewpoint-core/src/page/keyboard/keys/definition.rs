//! Key definition struct shared by all key tables.

/// Properties needed to dispatch a CDP key event for a named key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDefinition {
    /// DOM `code` value (physical key), e.g. `"KeyA"`.
    pub code: &'static str,
    /// DOM `key` value (logical key), e.g. `"a"`.
    pub key: &'static str,
    /// Windows/native virtual key code.
    pub key_code: i64,
    /// Text produced by the key, if any.
    pub text: Option<&'static str>,
    /// Whether the key is located on the numeric keypad.
    pub is_keypad: bool,
    /// `KeyboardEvent.location` value (0 = standard, 1 = left, 2 = right, 3 = numpad).
    pub location: u8,
}
