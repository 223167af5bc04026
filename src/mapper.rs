use std::sync::Arc;

use crate::{
    config::{self, Config},
    keyboard::{self, KeyEvent, KeyEventSource},
    midi::CcOutput,
    pedal::{self, Controller, Status, TriggerKeys},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}", .0)]
    Keyboard(#[from] keyboard::Error),

    #[error("{}", .0)]
    Pedal(#[from] pedal::Error),
}

/// The pedal `Controller` along with its key source and its persisted `Config`.
pub struct Mapper<O, K> {
    controller: Controller<O>,
    source: K,
    store: Option<config::Store>,
    midi_port: Arc<str>,
    events_tx: flume::Sender<KeyEvent>,
    events_rx: flume::Receiver<KeyEvent>,
}

impl<O: CcOutput, K: KeyEventSource> Mapper<O, K> {
    /// Builds a `Mapper` from the `Config`.
    ///
    /// Changes are saved to `store`, if any.
    pub fn new(source: K, store: Option<config::Store>, config: Config) -> Self {
        let (events_tx, events_rx) = flume::unbounded();

        Mapper {
            controller: Controller::new(config.trigger_keys),
            source,
            store,
            midi_port: config.midi_port.into(),
            events_tx,
            events_rx,
        }
    }

    /// The key events delivered by the installed source.
    pub fn events(&self) -> flume::Receiver<KeyEvent> {
        self.events_rx.clone()
    }

    pub fn status(&self) -> Status {
        self.controller.status()
    }

    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    pub fn trigger_keys(&self) -> &TriggerKeys {
        self.controller.trigger_keys()
    }

    pub fn midi_port(&self) -> Arc<str> {
        self.midi_port.clone()
    }

    /// Selects the MIDI port, which will be saved on next start.
    pub fn set_midi_port(&mut self, port_name: Arc<str>) {
        self.midi_port = port_name;
    }

    pub fn config(&self) -> Config {
        Config {
            trigger_keys: self.controller.trigger_keys().clone(),
            midi_port: self.midi_port.to_string(),
        }
    }

    /// Starts listening to key events, sending to `output`.
    ///
    /// If the key hook can't be installed, `output` is dropped
    /// and the listener remains stopped.
    pub fn start(&mut self, output: O) -> Result<Status, Error> {
        if self.controller.is_running() {
            self.stop();
        }

        self.source.install(self.events_tx.clone())?;
        let status = self.controller.start(output);
        self.save();

        Ok(status)
    }

    pub fn stop(&mut self) -> Status {
        self.source.uninstall();
        // Events still queued belong to the previous run
        let pending = self.events_rx.drain().count();
        if pending > 0 {
            log::trace!("Discarded {pending} pending key events");
        }

        self.controller.stop()
    }

    /// Handles a key event, returning the new status if the pedal was toggled.
    pub fn handle(&mut self, event: &KeyEvent) -> Option<Status> {
        match event {
            KeyEvent::Down(name) => self.controller.handle_key_down(name),
            KeyEvent::Up(name) => {
                self.controller.handle_key_up(name);
                None
            }
        }
    }

    /// Adds a trigger key, returning `false` if it was already present.
    pub fn add_trigger_key(&mut self, name: &str) -> Result<bool, Error> {
        let added = self.controller.add_trigger_key(name)?;
        if added {
            log::info!("Added trigger key '{name}'");
        }
        self.save();

        Ok(added)
    }

    pub fn remove_trigger_key(&mut self, name: &str) -> Result<(), Error> {
        let removed = self.controller.remove_trigger_key(name)?;
        log::info!("Removed trigger key '{removed}'");
        self.save();

        Ok(())
    }

    fn save(&self) {
        if let Some(store) = self.store.as_ref() {
            if let Err(err) = store.save(&self.config()) {
                log::error!("{err}");
            }
        }
    }
}
