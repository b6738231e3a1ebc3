use super::{Name, Opcode, QueryClass, QueryType};

/// Parsed DNS query
///
/// Questions are kept in the order they appear in the packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPacketInfo {
    pub id: u16,
    pub opcode: Opcode,
    pub recursion_desired: bool,
    pub questions: Vec<Question>,
}

/// A parsed chunk of data in the Query section of the packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub qname: Name,
    pub qtype: QueryType,
    pub qclass: QueryClass,
}
