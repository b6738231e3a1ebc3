use crate::dns_parser::{Name, QueryType, RRData};
use multimap::MultiMap;
use std::fmt::Debug;
use std::net::{Ipv4Addr, Ipv6Addr};

/// An answer the responder may hand out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record {
    pub ttl: u32,
    pub data: RRData,
}

/// Source of answers for the responder
pub trait Lookup: Debug + Send + Sync {
    /// Zero or one record of type `qtype` owned by `name`
    fn lookup(&self, name: &Name, qtype: QueryType) -> Option<Record>;
}

/// Records kept in memory, keyed by owner name
///
/// Names are matched without regard to ASCII case.
#[derive(Clone, Debug, Default)]
pub struct StaticZone {
    records: MultiMap<Name, Record>,
}

impl StaticZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &Name, record: Record) {
        self.records.insert(name.to_ascii_lowercase(), record);
    }

    pub fn with_a(mut self, name: &Name, ttl: u32, addr: Ipv4Addr) -> Self {
        self.insert(
            name,
            Record {
                ttl,
                data: RRData::A(addr),
            },
        );
        self
    }

    pub fn with_aaaa(mut self, name: &Name, ttl: u32, addr: Ipv6Addr) -> Self {
        self.insert(
            name,
            Record {
                ttl,
                data: RRData::AAAA(addr),
            },
        );
        self
    }

    pub fn len(&self) -> usize {
        self.records.iter_all().map(|(_, records)| records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Lookup for StaticZone {
    fn lookup(&self, name: &Name, qtype: QueryType) -> Option<Record> {
        self.records
            .get_vec(&name.to_ascii_lowercase())?
            .iter()
            .find(|record| record.data.typ() == qtype)
            .copied()
    }
}
