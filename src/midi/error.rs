use std::sync::Arc;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("MIDI initialization failed")]
    Init(#[from] midir::InitError),

    #[error("MIDI channel out of range {}", .0)]
    ChannelOutOfRange(u8),

    #[error("Could not open MIDI port '{}'", .0)]
    Connection(Arc<str>),

    #[error("No MIDI port selected")]
    NoPortSelected,

    #[error("Couldn't retrieve a MIDI port name")]
    PortInfoError(#[from] midir::PortInfoError),

    #[error("Invalid MIDI port name {}", .0)]
    PortNotFound(Arc<str>),

    #[error("Couldn't send MIDI message: {}", .0)]
    Send(#[from] midir::SendError),
}

