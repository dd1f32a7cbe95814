//! The immutable hotkey binding value type
//!
//! A `Hotkey` names a command and binds it to up to two modifier keys plus
//! one primary key. The human-readable expression text is computed once at
//! construction and cached; it can never disagree with the codes.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::keys::{self, EXPRESSION_LEN, INVALID_CODE};

/// Error raised when a malformed expression buffer is handed to the matching
/// routine. This is the only hard failure in the crate; every other odd
/// condition is a reported no-op.
#[derive(Debug, thiserror::Error)]
pub enum ExpressionError {
    #[error("expression buffer must have exactly 3 slots, got {0}")]
    WrongLength(usize),
}

/// A named keybinding of up to two modifier codes and one primary key code.
///
/// Unset slots hold [`INVALID_CODE`]. Constructing with an unset primary key
/// is legal; such a binding can never fire and its label says so.
///
/// Equality and hashing cover the command id, all three codes, and the cached
/// label. Ordering is by command id only, in reverse lexicographic direction
/// (a preserved quirk of the historical comparator), so it is deliberately
/// coarser than equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "HotkeyRecord", into = "HotkeyRecord")]
pub struct Hotkey {
    command_id: String,
    mod1: i32,
    mod2: i32,
    key: i32,
    expression_text: String,
}

impl Hotkey {
    /// Creates a binding for `command_id`. Pass [`INVALID_CODE`] for any slot
    /// that is unset. Construction always succeeds.
    pub fn new(command_id: impl Into<String>, mod1: i32, mod2: i32, key: i32) -> Self {
        let command_id = command_id.into();
        let expression_text = build_expression_text(&command_id, &[mod1, mod2, key]);

        if key == INVALID_CODE {
            warn!(
                command = %command_id,
                "hotkey constructed without a primary key and can never fire"
            );
        }

        Self {
            command_id,
            mod1,
            mod2,
            key,
            expression_text,
        }
    }

    /// The logical name of the binding.
    pub fn command_id(&self) -> &str {
        &self.command_id
    }

    /// First modifier code, or [`INVALID_CODE`] if unset.
    pub fn first_modifier(&self) -> i32 {
        self.mod1
    }

    /// Second modifier code, or [`INVALID_CODE`] if unset.
    pub fn second_modifier(&self) -> i32 {
        self.mod2
    }

    /// Primary key code, or [`INVALID_CODE`] if unset.
    pub fn key(&self) -> i32 {
        self.key
    }

    /// The cached human-readable label, e.g. "Control + Shift + Space".
    pub fn expression_text(&self) -> &str {
        &self.expression_text
    }

    /// Checks the binding against a completed expression buffer.
    ///
    /// Matching is exact positional equality: slot 0 against the first
    /// modifier, slot 1 against the second, slot 2 against the primary key.
    /// The order the two modifiers were pressed in therefore matters.
    ///
    /// Fails with [`ExpressionError::WrongLength`] if the buffer does not
    /// have exactly three slots.
    pub fn matches_key_expression(&self, expression: &[i32]) -> Result<bool, ExpressionError> {
        let slots: &[i32; EXPRESSION_LEN] = expression
            .try_into()
            .map_err(|_| ExpressionError::WrongLength(expression.len()))?;
        Ok(self.matches_slots(slots))
    }

    /// Infallible matching against a correctly-sized expression buffer.
    pub(crate) fn matches_slots(&self, expression: &[i32; EXPRESSION_LEN]) -> bool {
        expression[0] == self.mod1 && expression[1] == self.mod2 && expression[2] == self.key
    }

    /// Checks the provided text against this binding's cached label.
    pub fn matches_expression_text(&self, text: &str) -> bool {
        text == self.expression_text
    }

    /// Serializes the binding to its JSON record form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Display for Hotkey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.command_id, self.expression_text)
    }
}

impl PartialOrd for Hotkey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hotkey {
    /// Reverse lexicographic order on the command id, preserved from the
    /// source comparator.
    fn cmp(&self, other: &Self) -> Ordering {
        other.command_id.cmp(&self.command_id)
    }
}

/// Wire shape of a serialized hotkey record.
///
/// The `text` field is derived state: it is exported for readability and
/// recomputed on import, so imported data can never carry a stale label.
#[derive(Serialize, Deserialize)]
struct HotkeyRecord {
    #[serde(rename = "commandID")]
    command_id: String,
    #[serde(rename = "firstModifier")]
    first_modifier: i32,
    #[serde(rename = "secondModifier")]
    second_modifier: i32,
    #[serde(rename = "keyCode")]
    key_code: i32,
    #[serde(default)]
    text: String,
}

impl From<HotkeyRecord> for Hotkey {
    fn from(record: HotkeyRecord) -> Self {
        Hotkey::new(
            record.command_id,
            record.first_modifier,
            record.second_modifier,
            record.key_code,
        )
    }
}

impl From<Hotkey> for HotkeyRecord {
    fn from(hotkey: Hotkey) -> Self {
        Self {
            command_id: hotkey.command_id,
            first_modifier: hotkey.mod1,
            second_modifier: hotkey.mod2,
            key_code: hotkey.key,
            text: hotkey.expression_text,
        }
    }
}

/// Builds the cached label for a binding. A binding with no primary key gets
/// a warning-grade label instead of a partial expression.
fn build_expression_text(command_id: &str, expression: &[i32; EXPRESSION_LEN]) -> String {
    if expression[2] == INVALID_CODE {
        return format!("No key bound for '{command_id}'; rebind this hotkey");
    }

    keys::expression_label(expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::code;

    fn open_window() -> Hotkey {
        Hotkey::new("open-window", code::CONTROL, code::ALT, code::O)
    }

    #[test]
    fn test_matches_own_expression() {
        let hotkey = open_window();
        let expression = [code::CONTROL, code::ALT, code::O];
        assert!(hotkey.matches_key_expression(&expression).unwrap());
    }

    #[test]
    fn test_any_differing_slot_fails_match() {
        let hotkey = open_window();

        let wrong_mod1 = [code::SHIFT, code::ALT, code::O];
        let wrong_mod2 = [code::CONTROL, code::SHIFT, code::O];
        let wrong_key = [code::CONTROL, code::ALT, code::P];
        assert!(!hotkey.matches_key_expression(&wrong_mod1).unwrap());
        assert!(!hotkey.matches_key_expression(&wrong_mod2).unwrap());
        assert!(!hotkey.matches_key_expression(&wrong_key).unwrap());

        // Positional matching: swapped modifiers do not match.
        let swapped = [code::ALT, code::CONTROL, code::O];
        assert!(!hotkey.matches_key_expression(&swapped).unwrap());
    }

    #[test]
    fn test_wrong_length_expression_is_an_error() {
        let hotkey = open_window();
        let err = hotkey.matches_key_expression(&[code::CONTROL, code::O]);
        assert!(matches!(err, Err(ExpressionError::WrongLength(2))));

        let err = hotkey.matches_key_expression(&[0, 0, 0, 0]);
        assert!(matches!(err, Err(ExpressionError::WrongLength(4))));
    }

    #[test]
    fn test_expression_text_forms() {
        assert_eq!(open_window().expression_text(), "Control + Alt + O");

        let single = Hotkey::new("save", code::CONTROL, INVALID_CODE, code::S);
        assert_eq!(single.expression_text(), "Control + S");

        let bare = Hotkey::new("help", INVALID_CODE, INVALID_CODE, code::F1);
        assert_eq!(bare.expression_text(), "F1");
    }

    #[test]
    fn test_unbound_key_gets_warning_label() {
        let unbound = Hotkey::new("screenshot", code::CONTROL, INVALID_CODE, INVALID_CODE);
        assert_eq!(
            unbound.expression_text(),
            "No key bound for 'screenshot'; rebind this hotkey"
        );
    }

    #[test]
    fn test_matches_expression_text() {
        let hotkey = open_window();
        assert!(hotkey.matches_expression_text("Control + Alt + O"));
        assert!(!hotkey.matches_expression_text("Control + O"));
    }

    #[test]
    fn test_json_round_trip() {
        let hotkey = open_window();
        let json = hotkey.to_json().unwrap();

        assert!(json.contains("\"commandID\":\"open-window\""));
        // The label is a properly quoted JSON string.
        assert!(json.contains("\"text\":\"Control + Alt + O\""));

        let back: Hotkey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hotkey);
    }

    #[test]
    fn test_imported_label_is_recomputed() {
        let json = r#"{
            "commandID": "open-window",
            "firstModifier": 29,
            "secondModifier": 56,
            "keyCode": 24,
            "text": "some stale garbage"
        }"#;

        let hotkey: Hotkey = serde_json::from_str(json).unwrap();
        assert_eq!(hotkey.expression_text(), "Control + Alt + O");
        assert_eq!(hotkey, open_window());
    }

    #[test]
    fn test_ordering_is_reversed() {
        let a = Hotkey::new("alpha", code::CONTROL, INVALID_CODE, code::A);
        let b = Hotkey::new("beta", code::CONTROL, INVALID_CODE, code::B);

        // Reverse lexicographic: "beta" sorts before "alpha".
        assert!(b < a);

        let mut sorted = vec![a.clone(), b.clone()];
        sorted.sort();
        assert_eq!(sorted[0].command_id(), "beta");
        assert_eq!(sorted[1].command_id(), "alpha");
    }

    #[test]
    fn test_equality_covers_codes_and_command() {
        let a = open_window();
        let b = Hotkey::new("open-window", code::CONTROL, code::ALT, code::O);
        let c = Hotkey::new("close-window", code::CONTROL, code::ALT, code::O);
        let d = Hotkey::new("open-window", code::CONTROL, code::ALT, code::P);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }
}
