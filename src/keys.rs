//! Key code definitions and classification
//!
//! Provides integer constants for the fixed key-code space delivered by the
//! native hook, predicates classifying codes as modifiers or bindable primary
//! keys, and the label lookup used to build human-readable expression text.

/// Sentinel for an unset or invalid key code.
pub const INVALID_CODE: i32 = -1;

/// Number of slots in a key expression: two modifiers and one primary key.
pub const EXPRESSION_LEN: usize = 3;

/// Named key codes from the native hook's code space.
pub mod code {
    /// Shift modifier
    pub const SHIFT: i32 = 0x2A;
    /// Control modifier
    pub const CONTROL: i32 = 0x1D;
    /// Alt modifier
    pub const ALT: i32 = 0x38;
    /// Tab modifier
    pub const TAB: i32 = 0x0F;

    pub const ESCAPE: i32 = 0x01;
    pub const ENTER: i32 = 0x1C;
    pub const BACKSPACE: i32 = 0x0E;
    pub const SPACE: i32 = 0x39;
    pub const CAPS_LOCK: i32 = 0x3A;
    pub const NUM_LOCK: i32 = 0x45;
    pub const SCROLL_LOCK: i32 = 0x46;

    pub const KEY_1: i32 = 0x02;
    pub const KEY_2: i32 = 0x03;
    pub const KEY_3: i32 = 0x04;
    pub const KEY_4: i32 = 0x05;
    pub const KEY_5: i32 = 0x06;
    pub const KEY_6: i32 = 0x07;
    pub const KEY_7: i32 = 0x08;
    pub const KEY_8: i32 = 0x09;
    pub const KEY_9: i32 = 0x0A;
    pub const KEY_0: i32 = 0x0B;
    pub const MINUS: i32 = 0x0C;
    pub const EQUALS: i32 = 0x0D;

    pub const A: i32 = 0x1E;
    pub const B: i32 = 0x30;
    pub const C: i32 = 0x2E;
    pub const D: i32 = 0x20;
    pub const E: i32 = 0x12;
    pub const F: i32 = 0x21;
    pub const G: i32 = 0x22;
    pub const H: i32 = 0x23;
    pub const I: i32 = 0x17;
    pub const J: i32 = 0x24;
    pub const K: i32 = 0x25;
    pub const L: i32 = 0x26;
    pub const M: i32 = 0x32;
    pub const N: i32 = 0x31;
    pub const O: i32 = 0x18;
    pub const P: i32 = 0x19;
    pub const Q: i32 = 0x10;
    pub const R: i32 = 0x13;
    pub const S: i32 = 0x1F;
    pub const T: i32 = 0x14;
    pub const U: i32 = 0x16;
    pub const V: i32 = 0x2F;
    pub const W: i32 = 0x11;
    pub const X: i32 = 0x2D;
    pub const Y: i32 = 0x15;
    pub const Z: i32 = 0x2C;

    pub const BACKQUOTE: i32 = 0x29;
    pub const OPEN_BRACKET: i32 = 0x1A;
    pub const CLOSE_BRACKET: i32 = 0x1B;
    pub const BACK_SLASH: i32 = 0x2B;
    pub const SEMICOLON: i32 = 0x27;
    pub const QUOTE: i32 = 0x28;
    pub const COMMA: i32 = 0x33;
    pub const PERIOD: i32 = 0x34;
    pub const SLASH: i32 = 0x35;

    pub const F1: i32 = 0x3B;
    pub const F2: i32 = 0x3C;
    pub const F3: i32 = 0x3D;
    pub const F4: i32 = 0x3E;
    pub const F5: i32 = 0x3F;
    pub const F6: i32 = 0x40;
    pub const F7: i32 = 0x41;
    pub const F8: i32 = 0x42;
    pub const F9: i32 = 0x43;
    pub const F10: i32 = 0x44;
    pub const F11: i32 = 0x57;
    pub const F12: i32 = 0x58;

    pub const PRINT_SCREEN: i32 = 0x0E37;
    pub const INSERT: i32 = 0x0E52;
    pub const DELETE: i32 = 0x0E53;
    pub const HOME: i32 = 0x0E47;
    pub const END: i32 = 0x0E4F;
    pub const PAGE_UP: i32 = 0x0E49;
    pub const PAGE_DOWN: i32 = 0x0E51;
    pub const CONTEXT_MENU: i32 = 0x0E5D;

    pub const UP: i32 = 0xE048;
    pub const DOWN: i32 = 0xE050;
    pub const LEFT: i32 = 0xE04B;
    pub const RIGHT: i32 = 0xE04D;

    pub const POWER: i32 = 0xE05E;
    pub const SLEEP: i32 = 0xE05F;
    pub const WAKE: i32 = 0xE063;

    pub const MEDIA_PLAY: i32 = 0xE022;
    pub const MEDIA_STOP: i32 = 0xE024;
    pub const MEDIA_PREVIOUS: i32 = 0xE010;
    pub const MEDIA_NEXT: i32 = 0xE019;
    pub const MEDIA_SELECT: i32 = 0xE06D;
    pub const MEDIA_EJECT: i32 = 0xE02C;
    pub const VOLUME_MUTE: i32 = 0xE020;
    pub const VOLUME_DOWN: i32 = 0xE02E;
    pub const VOLUME_UP: i32 = 0xE030;

    pub const BROWSER_BACK: i32 = 0xE06A;
    pub const BROWSER_FORWARD: i32 = 0xE069;
    pub const BROWSER_REFRESH: i32 = 0xE067;
    pub const BROWSER_STOP: i32 = 0xE068;
    pub const BROWSER_SEARCH: i32 = 0xE065;
    pub const BROWSER_FAVORITES: i32 = 0xE066;
    pub const BROWSER_HOME: i32 = 0xE032;
    pub const APP_CALCULATOR: i32 = 0xE021;
    pub const APP_MAIL: i32 = 0xE06C;
    pub const APP_MUSIC: i32 = 0xE03C;
    pub const APP_PICTURES: i32 = 0xE064;
}

/// Returns true if the code is one of the four modifier keys eligible to
/// occupy the first two expression slots.
pub fn is_modifier_code(keycode: i32) -> bool {
    matches!(
        keycode,
        code::SHIFT | code::CONTROL | code::ALT | code::TAB
    )
}

/// Returns true if the code may serve as the primary key of a binding.
///
/// System, media, browser and navigation keys are denied so that a binding
/// can never shadow them; everything else, including codes this crate has no
/// name for, is accepted.
pub fn is_bindable_code(keycode: i32) -> bool {
    !matches!(
        keycode,
        code::ESCAPE
            | code::BROWSER_BACK
            | code::BROWSER_FAVORITES
            | code::BROWSER_HOME
            | code::BROWSER_FORWARD
            | code::BROWSER_REFRESH
            | code::BROWSER_SEARCH
            | code::BROWSER_STOP
            | code::APP_CALCULATOR
            | code::APP_MAIL
            | code::APP_MUSIC
            | code::APP_PICTURES
            | code::CAPS_LOCK
            | code::CONTEXT_MENU
            | code::MEDIA_EJECT
            | code::MEDIA_NEXT
            | code::MEDIA_PLAY
            | code::MEDIA_PREVIOUS
            | code::MEDIA_STOP
            | code::MEDIA_SELECT
            | code::NUM_LOCK
            | code::INSERT
            | code::HOME
            | code::DELETE
            | code::PRINT_SCREEN
            | code::POWER
            | code::SCROLL_LOCK
            | code::VOLUME_DOWN
            | code::VOLUME_UP
            | code::VOLUME_MUTE
            | code::WAKE
            | code::SLEEP
            | code::ENTER
            | INVALID_CODE
    )
}

/// Human-readable label for a key code.
///
/// Unknown codes still get a stable label so diagnostics and expression text
/// never fail.
pub fn key_text(keycode: i32) -> String {
    let known = match keycode {
        code::SHIFT => "Shift",
        code::CONTROL => "Control",
        code::ALT => "Alt",
        code::TAB => "Tab",
        code::ESCAPE => "Escape",
        code::ENTER => "Enter",
        code::BACKSPACE => "Backspace",
        code::SPACE => "Space",
        code::CAPS_LOCK => "Caps Lock",
        code::NUM_LOCK => "Num Lock",
        code::SCROLL_LOCK => "Scroll Lock",
        code::KEY_1 => "1",
        code::KEY_2 => "2",
        code::KEY_3 => "3",
        code::KEY_4 => "4",
        code::KEY_5 => "5",
        code::KEY_6 => "6",
        code::KEY_7 => "7",
        code::KEY_8 => "8",
        code::KEY_9 => "9",
        code::KEY_0 => "0",
        code::MINUS => "-",
        code::EQUALS => "=",
        code::A => "A",
        code::B => "B",
        code::C => "C",
        code::D => "D",
        code::E => "E",
        code::F => "F",
        code::G => "G",
        code::H => "H",
        code::I => "I",
        code::J => "J",
        code::K => "K",
        code::L => "L",
        code::M => "M",
        code::N => "N",
        code::O => "O",
        code::P => "P",
        code::Q => "Q",
        code::R => "R",
        code::S => "S",
        code::T => "T",
        code::U => "U",
        code::V => "V",
        code::W => "W",
        code::X => "X",
        code::Y => "Y",
        code::Z => "Z",
        code::BACKQUOTE => "`",
        code::OPEN_BRACKET => "[",
        code::CLOSE_BRACKET => "]",
        code::BACK_SLASH => "\\",
        code::SEMICOLON => ";",
        code::QUOTE => "'",
        code::COMMA => ",",
        code::PERIOD => ".",
        code::SLASH => "/",
        code::F1 => "F1",
        code::F2 => "F2",
        code::F3 => "F3",
        code::F4 => "F4",
        code::F5 => "F5",
        code::F6 => "F6",
        code::F7 => "F7",
        code::F8 => "F8",
        code::F9 => "F9",
        code::F10 => "F10",
        code::F11 => "F11",
        code::F12 => "F12",
        code::PRINT_SCREEN => "Print Screen",
        code::INSERT => "Insert",
        code::DELETE => "Delete",
        code::HOME => "Home",
        code::END => "End",
        code::PAGE_UP => "Page Up",
        code::PAGE_DOWN => "Page Down",
        code::CONTEXT_MENU => "Context Menu",
        code::UP => "Up",
        code::DOWN => "Down",
        code::LEFT => "Left",
        code::RIGHT => "Right",
        code::POWER => "Power",
        code::SLEEP => "Sleep",
        code::WAKE => "Wake",
        code::MEDIA_PLAY => "Play",
        code::MEDIA_STOP => "Stop",
        code::MEDIA_PREVIOUS => "Previous Track",
        code::MEDIA_NEXT => "Next Track",
        code::MEDIA_SELECT => "Media Select",
        code::MEDIA_EJECT => "Eject",
        code::VOLUME_MUTE => "Mute",
        code::VOLUME_DOWN => "Volume Down",
        code::VOLUME_UP => "Volume Up",
        code::BROWSER_BACK => "Browser Back",
        code::BROWSER_FORWARD => "Browser Forward",
        code::BROWSER_REFRESH => "Browser Refresh",
        code::BROWSER_STOP => "Browser Stop",
        code::BROWSER_SEARCH => "Browser Search",
        code::BROWSER_FAVORITES => "Browser Favorites",
        code::BROWSER_HOME => "Browser Home",
        code::APP_CALCULATOR => "Calculator",
        code::APP_MAIL => "Mail",
        code::APP_MUSIC => "Music",
        code::APP_PICTURES => "Pictures",
        _ => "",
    };

    if known.is_empty() {
        format!("Unknown keyCode: 0x{:X}", keycode)
    } else {
        known.to_string()
    }
}

/// Builds the " + "-joined label of an expression, skipping unset slots.
///
/// An expression with every slot unset yields the empty string.
pub fn expression_label(expression: &[i32; EXPRESSION_LEN]) -> String {
    let mut parts = Vec::new();

    for &slot in &expression[..2] {
        if slot != INVALID_CODE {
            parts.push(key_text(slot));
        }
    }

    if expression[2] != INVALID_CODE {
        parts.push(key_text(expression[2]));
    }

    parts.join(" + ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_codes() {
        assert!(is_modifier_code(code::SHIFT));
        assert!(is_modifier_code(code::CONTROL));
        assert!(is_modifier_code(code::ALT));
        assert!(is_modifier_code(code::TAB));
        assert!(!is_modifier_code(code::A));
        assert!(!is_modifier_code(INVALID_CODE));
    }

    #[test]
    fn test_denied_codes_are_not_bindable() {
        assert!(!is_bindable_code(code::ESCAPE));
        assert!(!is_bindable_code(code::ENTER));
        assert!(!is_bindable_code(code::VOLUME_UP));
        assert!(!is_bindable_code(INVALID_CODE));
    }

    #[test]
    fn test_ordinary_codes_are_bindable() {
        assert!(is_bindable_code(code::O));
        assert!(is_bindable_code(code::SPACE));
        assert!(is_bindable_code(code::F5));
        // Codes this crate has no name for are still bindable.
        assert!(is_bindable_code(0x7FFF));
    }

    #[test]
    fn test_key_text_known_and_unknown() {
        assert_eq!(key_text(code::CONTROL), "Control");
        assert_eq!(key_text(code::O), "O");
        assert_eq!(key_text(0x7FFF), "Unknown keyCode: 0x7FFF");
    }

    #[test]
    fn test_expression_label_skips_unset_slots() {
        let full = [code::CONTROL, code::ALT, code::O];
        assert_eq!(expression_label(&full), "Control + Alt + O");

        let one_modifier = [code::SHIFT, INVALID_CODE, code::S];
        assert_eq!(expression_label(&one_modifier), "Shift + S");

        let bare_key = [INVALID_CODE, INVALID_CODE, code::F1];
        assert_eq!(expression_label(&bare_key), "F1");

        let empty = [INVALID_CODE; EXPRESSION_LEN];
        assert_eq!(expression_label(&empty), "");
    }
}
