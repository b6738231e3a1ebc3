use super::Error;

/// The OPCODE value of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    StandardQuery = 0,
    InverseQuery = 1,
    ServerStatusRequest = 2,
}

impl Opcode {
    /// Codes 3 to 15 are reserved or unsupported
    pub fn parse(code: u8) -> Result<Opcode, Error> {
        match code {
            0 => Ok(Opcode::StandardQuery),
            1 => Ok(Opcode::InverseQuery),
            2 => Ok(Opcode::ServerStatusRequest),
            code => Err(Error::UnsupportedOpcode(code)),
        }
    }
}

/// The RCODE value of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    NoError = 0,
    NameError = 3,
    NotImplemented = 4,
}

/// The QTYPE value of a question
///
/// Only address records are told apart, everything else is kept as a raw
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum QueryType {
    /// a host address
    A,
    /// IPv6 host address
    AAAA,
    Other(u16),
}

impl QueryType {
    pub fn parse(code: u16) -> QueryType {
        match code {
            1 => QueryType::A,
            28 => QueryType::AAAA,
            code => QueryType::Other(code),
        }
    }

    pub fn code(self) -> u16 {
        match self {
            QueryType::A => 1,
            QueryType::AAAA => 28,
            QueryType::Other(code) => code,
        }
    }
}

/// The QCLASS value of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryClass {
    /// the Internet
    IN,
    Other(u16),
}

impl QueryClass {
    pub fn parse(code: u16) -> QueryClass {
        match code {
            1 => QueryClass::IN,
            code => QueryClass::Other(code),
        }
    }

    pub fn code(self) -> u16 {
        match self {
            QueryClass::IN => 1,
            QueryClass::Other(code) => code,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn opcodes() {
        assert_eq!(Opcode::parse(0), Ok(Opcode::StandardQuery));
        assert_eq!(Opcode::parse(1), Ok(Opcode::InverseQuery));
        assert_eq!(Opcode::parse(2), Ok(Opcode::ServerStatusRequest));
        for code in 3..16 {
            assert_eq!(Opcode::parse(code), Err(Error::UnsupportedOpcode(code)));
        }
    }

    #[test]
    fn query_types() {
        assert_eq!(QueryType::parse(1), QueryType::A);
        assert_eq!(QueryType::parse(28), QueryType::AAAA);
        assert_eq!(QueryType::parse(15), QueryType::Other(15));
        assert_eq!(QueryType::Other(255).code(), 255);
        assert_eq!(QueryClass::parse(1), QueryClass::IN);
        assert_eq!(QueryClass::parse(3), QueryClass::Other(3));
    }
}
