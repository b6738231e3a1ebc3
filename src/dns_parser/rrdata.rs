use std::net::{Ipv4Addr, Ipv6Addr};

use super::QueryType;

/// Payload of an answer record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum RRData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
}

impl RRData {
    pub fn typ(&self) -> QueryType {
        match *self {
            RRData::A(..) => QueryType::A,
            RRData::AAAA(..) => QueryType::AAAA,
        }
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        match *self {
            RRData::A(ip) => buf.extend_from_slice(&ip.octets()),
            RRData::AAAA(ip) => buf.extend_from_slice(&ip.octets()),
        }
    }
}
