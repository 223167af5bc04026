use std::{
    borrow::Cow,
    sync::{Arc, Mutex, PoisonError},
    thread,
    time::Duration,
};

use super::{Error, KeyEvent, KeyEventSource};

/// Time given to the OS hook to report an installation failure.
const STARTUP_GRACE: Duration = Duration::from_millis(200);

type Sink = Arc<Mutex<Option<flume::Sender<KeyEvent>>>>;

/// Global keyboard hook based on `rdev`.
///
/// `rdev` can't remove its hook once installed, so the listening thread
/// lives until the process exits. Uninstalling detaches the sink and
/// events are dropped until the next `install`.
#[derive(Default)]
pub struct GlobalHook {
    sink: Sink,
    thread: Option<thread::JoinHandle<()>>,
}

impl GlobalHook {
    fn is_listening(&self) -> bool {
        self.thread
            .as_ref()
            .map_or(false, |thread| !thread.is_finished())
    }

    fn spawn(&mut self) -> Result<(), Error> {
        let (err_tx, err_rx) = flume::bounded(1);
        let sink = self.sink.clone();

        let thread = thread::Builder::new()
            .name("keyboard hook".to_string())
            .spawn(move || {
                let res = rdev::listen(move |event| forward(&sink, event));
                if let Err(err) = res {
                    let _ = err_tx.send(Error::Listen(format!("{err:?}")));
                }
            })
            .map_err(|err| Error::Spawn(err.to_string()))?;

        match err_rx.recv_timeout(STARTUP_GRACE) {
            Err(flume::RecvTimeoutError::Timeout) => {
                log::debug!("Keyboard hook listening");
                self.thread = Some(thread);

                Ok(())
            }
            Ok(err) => Err(err),
            Err(flume::RecvTimeoutError::Disconnected) => Err(Error::HookExited),
        }
    }
}

impl KeyEventSource for GlobalHook {
    fn install(&mut self, sink: flume::Sender<KeyEvent>) -> Result<(), Error> {
        *self.sink.lock().unwrap_or_else(PoisonError::into_inner) = Some(sink);

        if !self.is_listening() {
            if let Err(err) = self.spawn() {
                self.uninstall();
                return Err(err);
            }
        }

        log::debug!("Keyboard hook installed");

        Ok(())
    }

    fn uninstall(&mut self) {
        if self
            .sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
        {
            log::debug!("Keyboard hook uninstalled");
        }
    }
}

fn forward(sink: &Sink, event: rdev::Event) {
    let event = match event.event_type {
        rdev::EventType::KeyPress(key) => KeyEvent::Down(key_name(key).into()),
        rdev::EventType::KeyRelease(key) => KeyEvent::Up(key_name(key).into()),
        _ => return,
    };

    if let Some(sink) = sink.lock().unwrap_or_else(PoisonError::into_inner).as_ref() {
        if sink.send(event).is_err() {
            log::trace!("Key event dropped: receiver is gone");
        }
    }
}

/// Canonical name for an `rdev` key.
pub fn key_name(key: rdev::Key) -> Cow<'static, str> {
    use rdev::Key::*;

    let name = match key {
        Alt => "alt_l",
        AltGr => "alt_gr",
        Backspace => "backspace",
        CapsLock => "caps_lock",
        ControlLeft => "ctrl_l",
        ControlRight => "ctrl_r",
        Delete => "delete",
        DownArrow => "down",
        End => "end",
        Escape => "esc",
        F1 => "f1",
        F2 => "f2",
        F3 => "f3",
        F4 => "f4",
        F5 => "f5",
        F6 => "f6",
        F7 => "f7",
        F8 => "f8",
        F9 => "f9",
        F10 => "f10",
        F11 => "f11",
        F12 => "f12",
        Home => "home",
        LeftArrow => "left",
        MetaLeft => "cmd",
        MetaRight => "cmd_r",
        PageDown => "page_down",
        PageUp => "page_up",
        Return => "enter",
        RightArrow => "right",
        ShiftLeft => "shift",
        ShiftRight => "shift_r",
        Space => "space",
        Tab => "tab",
        UpArrow => "up",
        PrintScreen => "print_screen",
        ScrollLock => "scroll_lock",
        Pause => "pause",
        NumLock => "num_lock",
        BackQuote => "`",
        Num1 => "1",
        Num2 => "2",
        Num3 => "3",
        Num4 => "4",
        Num5 => "5",
        Num6 => "6",
        Num7 => "7",
        Num8 => "8",
        Num9 => "9",
        Num0 => "0",
        Minus => "-",
        Equal => "=",
        KeyQ => "q",
        KeyW => "w",
        KeyE => "e",
        KeyR => "r",
        KeyT => "t",
        KeyY => "y",
        KeyU => "u",
        KeyI => "i",
        KeyO => "o",
        KeyP => "p",
        LeftBracket => "[",
        RightBracket => "]",
        KeyA => "a",
        KeyS => "s",
        KeyD => "d",
        KeyF => "f",
        KeyG => "g",
        KeyH => "h",
        KeyJ => "j",
        KeyK => "k",
        KeyL => "l",
        SemiColon => ";",
        Quote => "'",
        BackSlash | IntlBackslash => "\\",
        KeyZ => "z",
        KeyX => "x",
        KeyC => "c",
        KeyV => "v",
        KeyB => "b",
        KeyN => "n",
        KeyM => "m",
        Comma => ",",
        Dot => ".",
        Slash => "/",
        Insert => "insert",
        KpReturn => "numpad_enter",
        KpMinus => "numpad_subtract",
        KpPlus => "numpad_add",
        KpMultiply => "numpad_multiply",
        KpDivide => "numpad_divide",
        Kp0 => "numpad0",
        Kp1 => "numpad1",
        Kp2 => "numpad2",
        Kp3 => "numpad3",
        Kp4 => "numpad4",
        Kp5 => "numpad5",
        Kp6 => "numpad6",
        Kp7 => "numpad7",
        Kp8 => "numpad8",
        Kp9 => "numpad9",
        KpDelete => "numpad_decimal",
        Function => "fn",
        Unknown(code) => return format!("<{code}>").into(),
        #[allow(unreachable_patterns)]
        other => return format!("{other:?}").to_lowercase().into(),
    };

    name.into()
}

#[cfg(test)]
mod tests {
    use super::key_name;
    use crate::keyboard::{normalize, KeyEvent};

    #[test]
    fn canonical_names() {
        assert_eq!(key_name(rdev::Key::ShiftLeft), "shift");
        assert_eq!(key_name(rdev::Key::ShiftRight), "shift_r");
        assert_eq!(key_name(rdev::Key::Kp0), "numpad0");
        assert_eq!(key_name(rdev::Key::KeyA), "a");
        assert_eq!(key_name(rdev::Key::Num0), "0");
        assert_eq!(key_name(rdev::Key::Unknown(96)), "<96>");
    }

    #[test]
    fn names_are_normalized() {
        for key in [
            rdev::Key::ShiftLeft,
            rdev::Key::Kp5,
            rdev::Key::KeyZ,
            rdev::Key::F12,
            rdev::Key::Space,
        ] {
            let name = key_name(key);
            assert_eq!(normalize(&name), name);
        }
    }

    #[test]
    fn forward_to_sink() {
        let hook = super::GlobalHook::default();
        let (tx, rx) = flume::unbounded();
        *hook.sink.lock().unwrap() = Some(tx);

        let event = |event_type| rdev::Event {
            time: std::time::SystemTime::now(),
            name: None,
            event_type,
        };

        super::forward(&hook.sink, event(rdev::EventType::KeyPress(rdev::Key::Kp0)));
        super::forward(&hook.sink, event(rdev::EventType::MouseMove { x: 0.0, y: 0.0 }));
        super::forward(&hook.sink, event(rdev::EventType::KeyRelease(rdev::Key::Kp0)));

        assert_eq!(rx.try_recv().unwrap(), KeyEvent::Down("numpad0".into()));
        assert_eq!(rx.try_recv().unwrap(), KeyEvent::Up("numpad0".into()));
        assert!(rx.try_recv().is_err());

        // Detached sink drops events
        hook.sink.lock().unwrap().take();
        super::forward(&hook.sink, event(rdev::EventType::KeyPress(rdev::Key::Kp0)));
        assert!(rx.try_recv().is_err());
    }
}
