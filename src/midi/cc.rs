use crate::midi::Channel;

/// A Control Change message.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CC {
    pub param: Parameter,
    pub value: Value,
}

impl CC {
    pub const TAG: u8 = 0xb0;

    /// Sustain pedal: down if `on`, up otherwise.
    pub fn sustain(on: bool) -> Self {
        CC {
            param: Parameter::SUSTAIN,
            value: if on { Value::MAX } else { Value::MIN },
        }
    }

    pub fn to_bytes(self, chan: Channel) -> [u8; 3] {
        [Self::TAG | chan.into_inner(), self.param.0, self.value.0]
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Parameter(u8);

impl Parameter {
    pub const SUSTAIN: Parameter = Parameter(64);

    pub fn as_u8(self) -> u8 {
        self.0
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Value(u8);

impl Value {
    pub const MIN: Value = Value(0);
    pub const MAX: Value = Value(0x7f);

    pub fn as_u8(self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Parameter, Value, CC};
    use crate::midi::Channel;

    #[test]
    fn sustain_bytes() {
        let chan = Channel::default();
        assert_eq!(CC::sustain(true).to_bytes(chan), [0xb0, 64, 127]);
        assert_eq!(CC::sustain(false).to_bytes(chan), [0xb0, 64, 0]);

        let chan = Channel::try_from(0x0f).unwrap();
        assert_eq!(CC::sustain(true).to_bytes(chan), [0xbf, 64, 127]);
    }

    #[test]
    fn sustain_values() {
        assert_eq!(CC::sustain(true).param, Parameter::SUSTAIN);
        assert_eq!(CC::sustain(true).value, Value::MAX);
        assert_eq!(CC::sustain(false).value.as_u8(), 0);
        assert_eq!(Parameter::SUSTAIN.as_u8(), 64);
    }

    #[test]
    fn channel_range() {
        assert_eq!(Channel::try_from(0x0f).unwrap(), Channel::MAX);
        assert!(Channel::try_from(0x10).is_err());
    }
}
