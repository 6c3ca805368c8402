use std::fmt;

use crate::sysex::{
    SystemExclusiveData, INITIATOR, TERMINATOR, UNIVERSAL_NON_REALTIME, UNIVERSAL_REALTIME,
};

/// Target device channel, `7F` addresses all devices.
pub type Channel = u8;

pub const ALL_DEVICES: Channel = 0x7F;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniversalHeader {
    pub device_channel: Channel,
    pub sub_id1: u8,
    pub sub_id2: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniversalMessage {
    pub realtime: bool,
    pub header: UniversalHeader,
    pub payload: Vec<u8>,
}

impl UniversalMessage {
    pub fn new(realtime: bool, header: UniversalHeader, payload: Vec<u8>) -> Self {
        UniversalMessage {
            realtime,
            header,
            payload,
        }
    }

    /// Non-realtime identity request (`06 01`) sent to every device.
    pub fn identity_request() -> Self {
        UniversalMessage::new(
            false,
            UniversalHeader {
                device_channel: ALL_DEVICES,
                sub_id1: 0x06,
                sub_id2: 0x01,
            },
            vec![],
        )
    }

    fn tag(&self) -> u8 {
        if self.realtime {
            UNIVERSAL_REALTIME
        } else {
            UNIVERSAL_NON_REALTIME
        }
    }
}

impl SystemExclusiveData for UniversalMessage {
    fn write_to(&self, out: &mut Vec<u8>) {
        out.push(INITIATOR);
        out.push(self.tag());
        out.push(self.header.device_channel);
        out.push(self.header.sub_id1);
        out.push(self.header.sub_id2);
        out.extend_from_slice(&self.payload);
        out.push(TERMINATOR);
    }

    fn encoded_len(&self) -> usize {
        2 + 3 + self.payload.len() + 1
    }
}

impl fmt::Display for UniversalMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Universal System Exclusive Message, {}",
            if self.realtime { "Real-time" } else { "Non-Real-time" }
        )?;
        writeln!(f, "Device Channel = {}", self.header.device_channel as u16 + 1)?;
        writeln!(
            f,
            "Sub Id 1 = {:02X}H, Sub Id 2 = {:02X}H",
            self.header.sub_id1, self.header.sub_id2
        )?;
        writeln!(f, "Payload: {} bytes", self.payload.len())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn identity_request_bytes() {
        let msg = UniversalMessage::identity_request();
        assert_eq!(msg.to_bytes(), vec![0xF0, 0x7E, 0x7F, 0x06, 0x01, 0xF7]);
        assert_eq!(msg.encoded_len(), 6);
    }

    #[test]
    fn realtime_tag() {
        let msg = UniversalMessage::new(
            true,
            UniversalHeader {
                device_channel: 0x10,
                sub_id1: 0x04,
                sub_id2: 0x01,
            },
            vec![0x7F, 0x7F],
        );
        assert_eq!(
            msg.to_bytes(),
            vec![0xF0, 0x7F, 0x10, 0x04, 0x01, 0x7F, 0x7F, 0xF7]
        );
        assert_eq!(msg.encoded_len(), 8);
    }

    #[test]
    fn display_channel_is_one_based() {
        let msg = UniversalMessage::new(
            false,
            UniversalHeader {
                device_channel: 0x00,
                sub_id1: 0x06,
                sub_id2: 0x02,
            },
            vec![0x41],
        );
        let text = msg.to_string();
        assert!(text.contains("Non-Real-time"));
        assert!(text.contains("Device Channel = 1\n"));
        assert!(text.contains("Sub Id 1 = 06H, Sub Id 2 = 02H"));
        assert!(text.contains("Payload: 1 bytes"));
    }
}
