//! Sustain pedal toggle state machine.

use std::fmt;

mod error;
pub use error::Error;

mod trigger_keys;
pub use trigger_keys::TriggerKeys;

use crate::{
    keyboard,
    midi::{self, CcOutput, CC},
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ListenerState {
    #[default]
    Stopped,
    Running,
}

/// Snapshot of the controller, as shown to the user.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Status {
    pub running: bool,
    pub pedal_on: bool,
}

impl Status {
    /// The displayed pedal state: always off while stopped.
    pub fn is_on(self) -> bool {
        self.running && self.pedal_on
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_on() { "ON" } else { "OFF" })
    }
}

pub struct Controller<O> {
    trigger_keys: TriggerKeys,
    pedal_on: bool,
    key_held: bool,
    listener: ListenerState,
    output: Option<O>,
    chan: midi::Channel,
}

impl<O: CcOutput> Controller<O> {
    pub fn new(trigger_keys: TriggerKeys) -> Self {
        Controller {
            trigger_keys,
            pedal_on: false,
            key_held: false,
            listener: ListenerState::Stopped,
            output: None,
            chan: midi::Channel::default(),
        }
    }

    pub fn status(&self) -> Status {
        Status {
            running: self.is_running(),
            pedal_on: self.pedal_on,
        }
    }

    pub fn is_running(&self) -> bool {
        self.listener == ListenerState::Running
    }

    pub fn trigger_keys(&self) -> &TriggerKeys {
        &self.trigger_keys
    }

    /// Starts listening, sending through `output`.
    ///
    /// The pedal state is kept from previous runs and nothing is sent.
    pub fn start(&mut self, output: O) -> Status {
        self.output = Some(output);
        self.key_held = false;
        self.listener = ListenerState::Running;

        log::debug!("Listener started, pedal {}", on_off(self.pedal_on));

        self.status()
    }

    /// Stops listening and releases the MIDI output.
    pub fn stop(&mut self) -> Status {
        self.listener = ListenerState::Stopped;
        if self.output.take().is_some() {
            log::debug!("Released MIDI output");
        }

        self.status()
    }

    /// Handles a key press.
    ///
    /// Returns the new status if the pedal was toggled.
    pub fn handle_key_down(&mut self, raw_name: &str) -> Option<Status> {
        if !self.is_running() {
            return None;
        }

        if self.key_held || !self.trigger_keys.matches(&keyboard::normalize(raw_name)) {
            return None;
        }

        self.pedal_on = !self.pedal_on;
        self.key_held = true;
        log::debug!("Pedal {} on '{raw_name}'", on_off(self.pedal_on));

        self.send_pedal();

        Some(self.status())
    }

    /// Handles a key release.
    ///
    /// Releasing any trigger key clears the hold guard.
    pub fn handle_key_up(&mut self, raw_name: &str) {
        if self.trigger_keys.matches(&keyboard::normalize(raw_name)) {
            self.key_held = false;
        }
    }

    pub fn add_trigger_key(&mut self, name: &str) -> Result<bool, Error> {
        self.trigger_keys.add(name)
    }

    pub fn remove_trigger_key(&mut self, name: &str) -> Result<String, Error> {
        self.trigger_keys.remove(name)
    }

    fn send_pedal(&mut self) {
        let Some(output) = self.output.as_mut() else {
            log::warn!("No MIDI output to send pedal state");
            return;
        };

        let cc = CC::sustain(self.pedal_on);
        match output.send_cc(self.chan, cc) {
            Ok(()) => log::debug!("Sent pedal value {}", cc.value.as_u8()),
            Err(err) => log::error!("{err}"),
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on {
        "ON"
    } else {
        "OFF"
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::{Controller, Status, TriggerKeys};
    use crate::midi::{self, CcOutput, CC};

    /// Records the values sent, optionally failing.
    #[derive(Clone, Default)]
    pub struct Recorder {
        pub sent: Rc<RefCell<Vec<[u8; 3]>>>,
        pub fail: bool,
    }

    impl Recorder {
        pub fn values(&self) -> Vec<u8> {
            self.sent.borrow().iter().map(|msg| msg[2]).collect()
        }
    }

    impl CcOutput for Recorder {
        fn send_cc(&mut self, chan: midi::Channel, cc: CC) -> Result<(), midi::Error> {
            if self.fail {
                return Err(midi::Error::Connection("unplugged".into()));
            }

            self.sent.borrow_mut().push(cc.to_bytes(chan));

            Ok(())
        }
    }

    fn default_keys() -> TriggerKeys {
        ["shift", "numpad0"].into_iter().collect()
    }

    fn running() -> (Controller<Recorder>, Recorder) {
        let rec = Recorder::default();
        let mut ctrl = Controller::new(default_keys());
        ctrl.start(rec.clone());

        (ctrl, rec)
    }

    #[test]
    fn unmatched_keys_dont_toggle() {
        let (mut ctrl, rec) = running();

        for name in ["a", "numpad1", "Key.ctrl_l", "", "shift_r"] {
            assert!(ctrl.handle_key_down(name).is_none());
            ctrl.handle_key_up(name);
        }

        assert!(!ctrl.status().pedal_on);
        assert!(rec.values().is_empty());
    }

    #[test]
    fn toggle_sends_cc64() {
        let (mut ctrl, rec) = running();

        let status = ctrl.handle_key_down("shift").unwrap();
        assert_eq!(
            status,
            Status {
                running: true,
                pedal_on: true,
            }
        );
        assert_eq!(*rec.sent.borrow(), [[0xb0, 64, 127]]);

        ctrl.handle_key_up("shift");
        let status = ctrl.handle_key_down("Key.shift").unwrap();
        assert!(!status.pedal_on);
        assert_eq!(rec.values(), [127, 0]);
    }

    #[test]
    fn held_key_toggles_once() {
        let (mut ctrl, rec) = running();

        assert!(ctrl.handle_key_down("numpad0").is_some());
        for _ in 0..10 {
            assert!(ctrl.handle_key_down("numpad0").is_none());
        }
        ctrl.handle_key_up("numpad0");

        assert!(ctrl.status().pedal_on);
        assert_eq!(rec.values(), [127]);
    }

    #[test]
    fn stopped_ignores_key_down() {
        let rec = Recorder::default();
        let mut ctrl = Controller::<Recorder>::new(default_keys());

        assert!(ctrl.handle_key_down("shift").is_none());
        assert_eq!(ctrl.status(), Status::default());
        assert!(rec.values().is_empty());
    }

    #[test]
    fn second_trigger_key_while_held_is_suppressed() {
        let (mut ctrl, rec) = running();

        assert!(ctrl.handle_key_down("shift").is_some());
        // "numpad0" is a trigger key too, but the guard is still set by "shift"
        assert!(ctrl.handle_key_down("numpad0").is_none());
        assert!(ctrl.status().pedal_on);
        assert_eq!(rec.values(), [127]);

        // Releasing either key clears the guard
        ctrl.handle_key_up("numpad0");
        assert!(ctrl.handle_key_down("numpad0").is_some());
        assert_eq!(rec.values(), [127, 0]);
    }

    #[test]
    fn stop_then_key_down() {
        let (mut ctrl, rec) = running();
        ctrl.handle_key_down("shift");
        ctrl.handle_key_up("shift");

        let status = ctrl.stop();
        assert!(!status.running);
        assert!(status.pedal_on);
        assert!(!status.is_on());
        assert_eq!(status.to_string(), "OFF");

        assert!(ctrl.handle_key_down("shift").is_none());
        assert!(ctrl.status().pedal_on);
        assert_eq!(rec.values(), [127]);
    }

    #[test]
    fn restart_keeps_pedal_and_resets_guard() {
        let (mut ctrl, rec) = running();
        ctrl.handle_key_down("shift");
        ctrl.stop();

        let status = ctrl.start(rec.clone());
        assert!(status.is_on());
        assert_eq!(status.to_string(), "ON");
        // No message on start
        assert_eq!(rec.values(), [127]);

        // Guard reset even though "shift" was never released
        assert!(ctrl.handle_key_down("shift").is_some());
        assert_eq!(rec.values(), [127, 0]);
    }

    #[test]
    fn send_failure_still_toggles() {
        let rec = Recorder {
            fail: true,
            ..Default::default()
        };
        let mut ctrl = Controller::new(default_keys());
        ctrl.start(rec.clone());

        let status = ctrl.handle_key_down("shift").unwrap();
        assert!(status.pedal_on);
        assert!(rec.values().is_empty());
    }

    #[test]
    fn added_key_triggers() {
        let (mut ctrl, rec) = running();
        assert!(ctrl.add_trigger_key("A").unwrap());
        assert!(!ctrl.add_trigger_key("a").unwrap());
        assert_eq!(ctrl.trigger_keys().len(), 3);

        assert!(ctrl.handle_key_down("'a'").is_some());
        assert_eq!(rec.values(), [127]);

        ctrl.handle_key_up("a");
        ctrl.remove_trigger_key("a").unwrap();
        assert!(ctrl.handle_key_down("a").is_none());
        assert!(ctrl.remove_trigger_key("a").unwrap_err().is_not_found());
    }
}
