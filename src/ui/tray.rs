//! System tray icon, mirroring the pedal status.

use ksni::blocking::TrayMethods;

use crate::ui::APP_NAME;

const ICON_SIZE: usize = 64;
/// Status bar: left, top, right, bottom (inclusive).
const BAR: (usize, usize, usize, usize) = (16, 24, 48, 40);

const WHITE: [u8; 4] = [0xff, 0xff, 0xff, 0xff];
const GREEN: [u8; 4] = [0xff, 0x00, 0x80, 0x00];
const RED: [u8; 4] = [0xff, 0xff, 0x00, 0x00];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    ToggleListener,
    Quit,
}

struct PedalTray {
    is_on: bool,
    cmd_tx: flume::Sender<Command>,
}

impl PedalTray {
    fn send(&self, cmd: Command) {
        if self.cmd_tx.send(cmd).is_err() {
            log::warn!("Tray command {cmd:?} dropped: application is gone");
        }
    }
}

impl ksni::Tray for PedalTray {
    fn id(&self) -> String {
        env!("CARGO_PKG_NAME").to_string()
    }

    fn title(&self) -> String {
        APP_NAME.to_string()
    }

    fn icon_pixmap(&self) -> Vec<ksni::Icon> {
        vec![ksni::Icon {
            width: ICON_SIZE as i32,
            height: ICON_SIZE as i32,
            data: icon_argb(self.is_on),
        }]
    }

    fn menu(&self) -> Vec<ksni::MenuItem<Self>> {
        use ksni::menu::StandardItem;

        vec![
            StandardItem {
                label: "Toggle Pedal".into(),
                activate: Box::new(|this: &mut Self| this.send(Command::ToggleListener)),
                ..Default::default()
            }
            .into(),
            StandardItem {
                label: "Quit".into(),
                activate: Box::new(|this: &mut Self| this.send(Command::Quit)),
                ..Default::default()
            }
            .into(),
        ]
    }
}

pub struct Tray {
    handle: ksni::blocking::Handle<PedalTray>,
}

impl Tray {
    /// Spawns the tray service, which posts its commands to `cmd_tx`.
    pub fn spawn(cmd_tx: flume::Sender<Command>) -> Result<Self, ksni::Error> {
        let handle = PedalTray {
            is_on: false,
            cmd_tx,
        }
        .spawn()?;

        log::debug!("Tray icon spawned");

        Ok(Tray { handle })
    }

    pub fn set_on(&self, is_on: bool) {
        self.handle.update(|tray| tray.is_on = is_on);
    }

    pub fn shutdown(&self) {
        let _ = self.handle.shutdown();
    }
}

/// The icon bitmap in ARGB32, network byte order.
pub fn icon_argb(is_on: bool) -> Vec<u8> {
    let color = if is_on { GREEN } else { RED };
    let (left, top, right, bottom) = BAR;

    let mut data = Vec::with_capacity(ICON_SIZE * ICON_SIZE * 4);
    for y in 0..ICON_SIZE {
        for x in 0..ICON_SIZE {
            if (left..=right).contains(&x) && (top..=bottom).contains(&y) {
                data.extend_from_slice(&color);
            } else {
                data.extend_from_slice(&WHITE);
            }
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::{icon_argb, GREEN, ICON_SIZE, RED, WHITE};

    fn pixel(data: &[u8], x: usize, y: usize) -> [u8; 4] {
        let idx = (y * ICON_SIZE + x) * 4;
        data[idx..idx + 4].try_into().unwrap()
    }

    #[test]
    fn icon() {
        let on = icon_argb(true);
        assert_eq!(on.len(), ICON_SIZE * ICON_SIZE * 4);
        assert_eq!(pixel(&on, 0, 0), WHITE);
        assert_eq!(pixel(&on, 16, 24), GREEN);
        assert_eq!(pixel(&on, 48, 40), GREEN);
        assert_eq!(pixel(&on, 49, 40), WHITE);
        assert_eq!(pixel(&on, 32, 23), WHITE);

        let off = icon_argb(false);
        assert_eq!(pixel(&off, 32, 32), RED);
        assert_eq!(pixel(&off, 63, 63), WHITE);
    }
}
