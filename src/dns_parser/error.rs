use thiserror::Error;

/// Error parsing DNS packet or building a name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("packet is smaller than header size")]
    HeaderTooShort,
    #[error("packet is a response, not a query")]
    NotAQuery,
    #[error("opcode {0} is not supported")]
    UnsupportedOpcode(u8),
    #[error("packet is truncated")]
    Truncated,
    #[error("packet has non-zero reserved bits")]
    ReservedBitsAreNonZero,
    #[error("packet has no questions")]
    NoQuestions,
    #[error("query carries {answers} answers, {nameservers} nameservers and {additional} additional records")]
    UnexpectedRecords {
        answers: u16,
        nameservers: u16,
        additional: u16,
    },
    #[error("packet has no data after the header")]
    EmptyPayload,
    #[error("question name is empty")]
    EmptyName,
    #[error("packet has incomplete data")]
    UnexpectedEOF,
    #[error("question is not followed by exactly four bytes of type and class")]
    WrongQuestionLength,
    #[error("domain name contains an empty label")]
    EmptyLabel,
    #[error("label of {0} bytes is longer than 255")]
    LabelTooLong(usize),
}

/// Coarse classification of a decode [`Error`]
///
/// A `Malformed` packet is best dropped silently; an `Unsupported` one has a
/// sound header and can be answered with a refusal. A query carrying records
/// outside the question section, such as an EDNS0 OPT record, is unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Malformed,
    Unsupported,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Error::UnsupportedOpcode(..)
            | Error::Truncated
            | Error::NoQuestions
            | Error::UnexpectedRecords { .. } => ErrorKind::Unsupported,
            _ => ErrorKind::Malformed,
        }
    }
}
