use std::{collections::BTreeMap, sync::Arc};

use super::Error;

/// Available MIDI output ports, by name.
pub struct PortsOut {
    map: BTreeMap<Arc<str>, midir::MidiOutputPort>,
    cur: Option<Arc<str>>,
    client_name: Arc<str>,
}

impl PortsOut {
    pub fn new(client_name: Arc<str>) -> Self {
        Self {
            map: BTreeMap::new(),
            cur: None,
            client_name,
        }
    }

    pub fn list(&self) -> impl Iterator<Item = Arc<str>> + '_ {
        self.map.keys().cloned()
    }

    pub fn disconnect(&mut self) {
        if let Some(cur) = self.cur.take() {
            log::debug!("Disconnected Output from {}", cur);
        }
    }

    pub fn refresh(&mut self) -> Result<(), Error> {
        let conn = midir::MidiOutput::new(&format!("{} refresh Out ports", self.client_name))?;

        self.map.clear();

        let mut prev = self.cur.take();
        for port in conn.ports().iter() {
            let name = conn.port_name(port)?;
            // Skip our own virtual ports
            if !name.starts_with(self.client_name.as_ref()) {
                if let Some(ref prev_ref) = prev {
                    if prev_ref.as_ref() == name {
                        self.cur = prev.take();
                    }
                }

                self.map.insert(name.into(), port.clone());
            }
        }

        log::debug!("Found {} MIDI Output ports", self.map.len());

        Ok(())
    }

    pub fn connect(&mut self, port_name: Arc<str>) -> Result<midir::MidiOutputConnection, Error> {
        if port_name.is_empty() {
            return Err(Error::NoPortSelected);
        }

        let port = self
            .map
            .get(&port_name)
            .ok_or_else(|| Error::PortNotFound(port_name.clone()))?
            .clone();

        let midi_conn = midir::MidiOutput::new(&self.client_name)?
            .connect(&port, &port_name)
            .map_err(|err| {
                log::error!("{err}");
                self.cur = None;
                Error::Connection(port_name.clone())
            })?;

        log::debug!("Connected for Output to {}", port_name);
        self.cur = Some(port_name);

        Ok(midi_conn)
    }
}
