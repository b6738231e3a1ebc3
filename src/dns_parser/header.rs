use byteorder::{BigEndian, ByteOrder};

use super::{Error, ResponseCode};

mod flag {
    pub const QUERY: u16 = 0b1000_0000_0000_0000;
    pub const OPCODE_MASK: u16 = 0b0111_1000_0000_0000;
    pub const AUTHORITATIVE: u16 = 0b0000_0100_0000_0000;
    pub const TRUNCATED: u16 = 0b0000_0010_0000_0000;
    pub const RECURSION_DESIRED: u16 = 0b0000_0001_0000_0000;
    pub const RECURSION_AVAILABLE: u16 = 0b0000_0000_1000_0000;
    pub const RESERVED_MASK: u16 = 0b0000_0000_0111_0000;
    pub const RESPONSE_CODE_MASK: u16 = 0b0000_0000_0000_1111;
}

pub const HEADER_SIZE: usize = 12;

/// Represents parsed header of the packet
///
/// Opcode, reserved bits and response code are kept raw; validating them is
/// left to the message parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    /// `true` for a response, matching the QR bit
    pub response: bool,
    pub opcode: u8,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub reserved: u8,
    pub response_code: u8,
    pub questions: u16,
    pub answers: u16,
    pub nameservers: u16,
    pub additional: u16,
}

impl Header {
    pub fn parse(data: &[u8]) -> Result<Header, Error> {
        if data.len() < HEADER_SIZE {
            return Err(Error::HeaderTooShort);
        }
        let flags = BigEndian::read_u16(&data[2..4]);
        Ok(Header {
            id: BigEndian::read_u16(&data[..2]),
            response: flags & flag::QUERY != 0,
            opcode: ((flags & flag::OPCODE_MASK) >> 11) as u8,
            authoritative: flags & flag::AUTHORITATIVE != 0,
            truncated: flags & flag::TRUNCATED != 0,
            recursion_desired: flags & flag::RECURSION_DESIRED != 0,
            recursion_available: flags & flag::RECURSION_AVAILABLE != 0,
            reserved: ((flags & flag::RESERVED_MASK) >> 4) as u8,
            response_code: (flags & flag::RESPONSE_CODE_MASK) as u8,
            questions: BigEndian::read_u16(&data[4..6]),
            answers: BigEndian::read_u16(&data[6..8]),
            nameservers: BigEndian::read_u16(&data[8..10]),
            additional: BigEndian::read_u16(&data[10..12]),
        })
    }

    /// Header of a response carrying `response_code`, with every other flag
    /// cleared and all sections empty
    pub fn response(id: u16, response_code: ResponseCode) -> Header {
        Header {
            id: id,
            response: true,
            opcode: 0,
            authoritative: false,
            truncated: false,
            recursion_desired: false,
            recursion_available: false,
            reserved: 0,
            response_code: response_code as u8,
            questions: 0,
            answers: 0,
            nameservers: 0,
            additional: 0,
        }
    }

    /// Write a header to a buffer slice
    ///
    /// # Panics
    ///
    /// When buffer size is not exactly 12 bytes
    pub fn write(&self, data: &mut [u8]) {
        if data.len() != HEADER_SIZE {
            panic!("Header size is exactly 12 bytes");
        }
        let mut flags = 0u16;
        flags |= (u16::from(self.opcode) << 11) & flag::OPCODE_MASK;
        flags |= (u16::from(self.reserved) << 4) & flag::RESERVED_MASK;
        flags |= u16::from(self.response_code) & flag::RESPONSE_CODE_MASK;
        if self.response {
            flags |= flag::QUERY;
        }
        if self.authoritative {
            flags |= flag::AUTHORITATIVE;
        }
        if self.truncated {
            flags |= flag::TRUNCATED;
        }
        if self.recursion_desired {
            flags |= flag::RECURSION_DESIRED;
        }
        if self.recursion_available {
            flags |= flag::RECURSION_AVAILABLE;
        }
        BigEndian::write_u16(&mut data[..2], self.id);
        BigEndian::write_u16(&mut data[2..4], flags);
        BigEndian::write_u16(&mut data[4..6], self.questions);
        BigEndian::write_u16(&mut data[6..8], self.answers);
        BigEndian::write_u16(&mut data[8..10], self.nameservers);
        BigEndian::write_u16(&mut data[10..12], self.additional);
    }

    pub fn question_count(data: &[u8]) -> u16 {
        BigEndian::read_u16(&data[4..6])
    }

    pub fn answer_count(data: &[u8]) -> u16 {
        BigEndian::read_u16(&data[6..8])
    }

    /// Returns `None` when the count would overflow
    pub fn inc_questions(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(&mut data[4..6])
    }

    pub fn inc_answers(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(&mut data[6..8])
    }

    fn inc_count(field: &mut [u8]) -> Option<u16> {
        let count = BigEndian::read_u16(field).checked_add(1)?;
        BigEndian::write_u16(field, count);
        Some(count)
    }
}
