use crate::checksum::{checksum, verify};
use zerocopy::byteorder::network_endian;
use zerocopy::IntoBytes;
use zerocopy_derive::{FromBytes, Immutable, IntoBytes, KnownLayout};

pub(crate) const ECHO_REQUEST: u8 = 8;

#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Debug)]
#[repr(C)]
pub(crate) struct IcmpEchoRequest {
    icmp_type: u8,
    icmp_code: u8,
    checksum: network_endian::U16,
    sequence_number: network_endian::U16,
    data: network_endian::U16,
}

impl IcmpEchoRequest {
    pub fn new(sequence: u16) -> Self {
        let mut packet = Self {
            icmp_type: ECHO_REQUEST,
            icmp_code: 0,
            checksum: 0.into(),
            sequence_number: sequence.into(),
            data: 0.into(),
        };
        packet.calculate_checksum();
        debug_assert!(verify(packet.as_bytes()));
        packet
    }

    fn calculate_checksum(&mut self) {
        self.checksum = 0.into();
        self.checksum = checksum(self.as_bytes()).into();
    }

    pub(crate) fn sequence(&self) -> u16 {
        self.sequence_number.get()
    }

    pub(crate) fn checksum(&self) -> u16 {
        self.checksum.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zerocopy::FromBytes;

    #[test]
    fn wire_layout() {
        let packet = IcmpEchoRequest::new(1);
        assert_eq!(packet.as_bytes(), &[8, 0, 0xF7, 0xFE, 0, 1, 0, 0]);
    }

    #[test]
    fn sequence_is_big_endian() {
        let packet = IcmpEchoRequest::new(0x1234);
        let bytes = packet.as_bytes();
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[4..6], &[0x12, 0x34]);
        assert_eq!(&bytes[6..8], &[0, 0]);
        assert_eq!(packet.sequence(), 0x1234);
    }

    #[test]
    fn checksum_is_embedded() {
        for seq in [1u16, 2, 255, 256, 0xFFFF] {
            let packet = IcmpEchoRequest::new(seq);
            assert!(verify(packet.as_bytes()), "seq {seq}");
        }
    }

    #[test]
    fn parses_back_from_wire() {
        let packet = IcmpEchoRequest::new(7);
        let parsed = IcmpEchoRequest::ref_from_bytes(packet.as_bytes()).unwrap();
        assert_eq!(parsed.icmp_type, ECHO_REQUEST);
        assert_eq!(parsed.icmp_code, 0);
        assert_eq!(parsed.sequence(), 7);
        assert_eq!(parsed.checksum(), packet.checksum());
        assert_eq!(parsed.data.get(), 0);
    }
}
