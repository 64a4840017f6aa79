//! Input domain types.
//!
//! The Input domain dispatches synthetic keyboard, mouse, and touch events.

use serde::{Deserialize, Serialize};

/// Bitmask constants for `DispatchKeyEventParams`/`DispatchMouseEventParams` modifiers.
///
/// Values mirror the CDP `Input` domain: a bit per modifier, combined with `|`.
pub mod modifiers {
    /// Alt key.
    pub const ALT: i32 = 1;
    /// Control key.
    pub const CTRL: i32 = 2;
    /// Meta/Command key.
    pub const META: i32 = 4;
    /// Shift key.
    pub const SHIFT: i32 = 8;
}

/// Type of key event to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyEventType {
    /// Key pressed down.
    KeyDown,
    /// Key released.
    KeyUp,
    /// Raw keydown event (rarely needed; most callers want `KeyDown`).
    RawKeyDown,
    /// Character input event.
    Char,
}

/// Parameters for `Input.dispatchKeyEvent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchKeyEventParams {
    /// Type of the key event.
    #[serde(rename = "type")]
    pub event_type: KeyEventType,
    /// Bit field for modifier keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<i32>,
    /// Time at which the event occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    /// Text as generated by processing a virtual key code with a keyboard layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Text that would have been generated without modifier keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unmodified_text: Option<String>,
    /// Unique key identifier (e.g. `'U+0041'`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_identifier: Option<String>,
    /// Unique DOM defined string value for each physical key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Unique DOM defined string value describing the meaning of the key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Windows virtual key code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows_virtual_key_code: Option<i64>,
    /// Native virtual key code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_virtual_key_code: Option<i64>,
    /// Whether the event was generated from auto repeat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_repeat: Option<bool>,
    /// Whether the event was generated from the keypad.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_keypad: Option<bool>,
    /// Whether the event was a system key event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_system_key: Option<bool>,
    /// Editing commands to send with the key event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<String>>,
}

/// Parameters for `Input.insertText`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTextParams {
    /// Text to insert.
    pub text: String,
}

/// Mouse button used for a dispatched mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    /// No button.
    None,
    /// Left (primary) button.
    Left,
    /// Middle (auxiliary) button.
    Middle,
    /// Right (secondary) button.
    Right,
    /// Browser back button.
    Back,
    /// Browser forward button.
    Forward,
}

/// Type of mouse event to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MouseEventType {
    /// Mouse pressed.
    MousePressed,
    /// Mouse released.
    MouseReleased,
    /// Mouse moved.
    MouseMoved,
    /// Mouse wheel scrolled.
    MouseWheel,
}

/// Parameters for `Input.dispatchMouseEvent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchMouseEventParams {
    /// Type of the mouse event.
    #[serde(rename = "type")]
    pub event_type: MouseEventType,
    /// X coordinate relative to the viewport in CSS pixels.
    pub x: f64,
    /// Y coordinate relative to the viewport in CSS pixels.
    pub y: f64,
    /// Bit field for modifier keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<i32>,
    /// Button that changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<MouseButton>,
    /// Number of times the mouse button was clicked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_count: Option<i32>,
}

impl DispatchMouseEventParams {
    /// Build a `mouseMoved` event.
    #[must_use]
    pub fn mouse_move(x: f64, y: f64) -> Self {
        Self {
            event_type: MouseEventType::MouseMoved,
            x,
            y,
            modifiers: None,
            button: None,
            click_count: None,
        }
    }

    /// Build a `mousePressed` event for the given button.
    #[must_use]
    pub fn mouse_down(x: f64, y: f64, button: MouseButton) -> Self {
        Self {
            event_type: MouseEventType::MousePressed,
            x,
            y,
            modifiers: None,
            button: Some(button),
            click_count: None,
        }
    }

    /// Build a `mouseReleased` event for the given button.
    #[must_use]
    pub fn mouse_up(x: f64, y: f64, button: MouseButton) -> Self {
        Self {
            event_type: MouseEventType::MouseReleased,
            x,
            y,
            modifiers: None,
            button: Some(button),
            click_count: None,
        }
    }
}

/// Parameters for a `Input.dispatchMouseEvent` wheel event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchMouseWheelParams {
    /// Type of the mouse event. Always `MouseWheel`.
    #[serde(rename = "type")]
    pub event_type: MouseEventType,
    /// X coordinate relative to the viewport in CSS pixels.
    pub x: f64,
    /// Y coordinate relative to the viewport in CSS pixels.
    pub y: f64,
    /// Horizontal wheel delta.
    pub delta_x: f64,
    /// Vertical wheel delta.
    pub delta_y: f64,
    /// Bit field for modifier keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<i32>,
    /// Pointer type generating the wheel event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer_type: Option<String>,
}

/// Type of touch event to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TouchEventType {
    /// Touch started.
    TouchStart,
    /// Touch ended.
    TouchEnd,
    /// Touch point(s) moved.
    TouchMove,
    /// Touch cancelled.
    TouchCancel,
}

/// A single active touch point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchPoint {
    /// X coordinate relative to the viewport in CSS pixels.
    pub x: f64,
    /// Y coordinate relative to the viewport in CSS pixels.
    pub y: f64,
    /// Identifier used to track the touch point between events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Radius of the touch area along the X axis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_x: Option<f64>,
    /// Radius of the touch area along the Y axis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_y: Option<f64>,
    /// Force applied to the touch point, normalized to `[0, 1]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<f64>,
}

impl TouchPoint {
    /// Create a touch point at the given viewport coordinates.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            id: None,
            radius_x: None,
            radius_y: None,
            force: None,
        }
    }
}

/// Parameters for `Input.dispatchTouchEvent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchTouchEventParams {
    /// Type of the touch event.
    #[serde(rename = "type")]
    pub event_type: TouchEventType,
    /// Active touch points, one per finger.
    pub touch_points: Vec<TouchPoint>,
    /// Bit field for modifier keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<u32>,
    /// Time at which the event occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_serializes_type_field() {
        let params = DispatchKeyEventParams {
            event_type: KeyEventType::KeyDown,
            modifiers: Some(modifiers::SHIFT),
            timestamp: None,
            text: Some("a".to_string()),
            unmodified_text: Some("a".to_string()),
            key_identifier: None,
            code: Some("KeyA".to_string()),
            key: Some("a".to_string()),
            windows_virtual_key_code: Some(65),
            native_virtual_key_code: Some(65),
            auto_repeat: Some(false),
            is_keypad: Some(false),
            is_system_key: None,
            commands: None,
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["type"], "keyDown");
        assert_eq!(value["modifiers"], 8);
    }

    #[test]
    fn mouse_move_omits_button_and_click_count() {
        let params = DispatchMouseEventParams::mouse_move(12.0, 34.0);
        let value = serde_json::to_value(&params).unwrap();
        assert!(value.get("button").is_none());
        assert!(value.get("clickCount").is_none());
    }

    #[test]
    fn mouse_down_sets_button() {
        let mut params = DispatchMouseEventParams::mouse_down(1.0, 2.0, MouseButton::Left);
        params.click_count = Some(2);
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["button"], "left");
        assert_eq!(value["clickCount"], 2);
    }

    #[test]
    fn touch_point_new_has_no_id() {
        let point = TouchPoint::new(10.0, 20.0);
        assert!(point.id.is_none());
    }
}
