use iced_native::keyboard::KeyCode;

/// Canonical name for a key pressed in the application window.
///
/// Names match those produced by the global hook.
pub fn key_name(key_code: KeyCode) -> String {
    use KeyCode::*;

    let name = match key_code {
        LShift => "shift",
        RShift => "shift_r",
        LControl => "ctrl_l",
        RControl => "ctrl_r",
        LAlt => "alt_l",
        RAlt => "alt_gr",
        LWin => "cmd",
        RWin => "cmd_r",
        Key0 => "0",
        Key1 => "1",
        Key2 => "2",
        Key3 => "3",
        Key4 => "4",
        Key5 => "5",
        Key6 => "6",
        Key7 => "7",
        Key8 => "8",
        Key9 => "9",
        Escape => "esc",
        PageUp => "page_up",
        PageDown => "page_down",
        Capital => "caps_lock",
        Numlock => "num_lock",
        Scroll => "scroll_lock",
        Snapshot => "print_screen",
        NumpadAdd => "numpad_add",
        NumpadSubtract => "numpad_subtract",
        NumpadMultiply => "numpad_multiply",
        NumpadDivide => "numpad_divide",
        NumpadDecimal => "numpad_decimal",
        NumpadEnter => "numpad_enter",
        Grave => "`",
        Minus => "-",
        Equals => "=",
        LBracket => "[",
        RBracket => "]",
        Semicolon => ";",
        Apostrophe => "'",
        Backslash => "\\",
        Comma => ",",
        Period => ".",
        Slash => "/",
        // Letters, F keys, numpad digits, arrows...
        other => return format!("{other:?}").to_lowercase(),
    };

    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::key_name;
    use iced_native::keyboard::KeyCode;

    #[test]
    fn same_names_as_hook() {
        use crate::keyboard::hook;

        for (key_code, key) in [
            (KeyCode::LShift, rdev::Key::ShiftLeft),
            (KeyCode::RShift, rdev::Key::ShiftRight),
            (KeyCode::Numpad0, rdev::Key::Kp0),
            (KeyCode::Numpad9, rdev::Key::Kp9),
            (KeyCode::A, rdev::Key::KeyA),
            (KeyCode::Key7, rdev::Key::Num7),
            (KeyCode::F5, rdev::Key::F5),
            (KeyCode::Space, rdev::Key::Space),
            (KeyCode::Enter, rdev::Key::Return),
            (KeyCode::Left, rdev::Key::LeftArrow),
            (KeyCode::PageUp, rdev::Key::PageUp),
            (KeyCode::LControl, rdev::Key::ControlLeft),
            (KeyCode::Semicolon, rdev::Key::SemiColon),
        ] {
            assert_eq!(key_name(key_code), hook::key_name(key), "{key_code:?}");
        }
    }
}
