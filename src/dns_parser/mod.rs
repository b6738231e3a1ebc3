//! Wire format of the DNS queries we accept and the responses we send

mod builder;
mod cursor;
mod enums;
mod error;
mod header;
mod name;
mod parser;
mod rrdata;
mod structs;

pub use self::builder::{name_not_found, refusal, single_ipv4_answer, single_ipv6_answer};
pub use self::builder::{Answers, Builder, MoveTo, Questions};
pub use self::cursor::Cursor;
pub use self::enums::{Opcode, QueryClass, QueryType, ResponseCode};
pub use self::error::{Error, ErrorKind};
pub use self::header::{Header, HEADER_SIZE};
pub use self::name::{Name, MAX_LABEL_LEN};
pub use self::rrdata::RRData;
pub use self::structs::{Question, RequestPacketInfo};
