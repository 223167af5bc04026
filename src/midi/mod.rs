mod error;
pub use error::Error;

pub mod cc;
pub use cc::CC;

pub mod port;
pub use port::PortsOut;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Channel(u8);

impl Channel {
    pub const MAX: Channel = Channel(0x0f);

    pub fn into_inner(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Channel {
    type Error = Error;

    fn try_from(chan: u8) -> Result<Self, Self::Error> {
        if chan > Self::MAX.0 {
            return Err(Error::ChannelOutOfRange(chan));
        }

        Ok(Channel(chan))
    }
}

/// Something which can send Control Change messages.
///
/// Implemented for the `midir` output connection and for test doubles.
pub trait CcOutput {
    fn send_cc(&mut self, chan: Channel, cc: CC) -> Result<(), Error>;
}

impl CcOutput for midir::MidiOutputConnection {
    fn send_cc(&mut self, chan: Channel, cc: CC) -> Result<(), Error> {
        self.send(&cc.to_bytes(chan))?;

        Ok(())
    }
}
