use byteorder::{BigEndian, ByteOrder};

use super::header::HEADER_SIZE;
use super::{Cursor, Error, Header, Name, Opcode, QueryClass, QueryType};
use super::{Question, RequestPacketInfo};

/// One-byte label, terminator, type and class
const MIN_QUESTION_LEN: usize = 7;

impl RequestPacketInfo {
    /// Parse a query packet
    ///
    /// Either the whole packet is accepted or an error is returned, nothing
    /// is parsed on a best effort basis.
    pub fn parse(data: &[u8]) -> Result<RequestPacketInfo, Error> {
        let header = Header::parse(data)?;
        if header.response {
            return Err(Error::NotAQuery);
        }
        let opcode = Opcode::parse(header.opcode)?;
        if header.truncated {
            return Err(Error::Truncated);
        }
        if header.reserved != 0 {
            return Err(Error::ReservedBitsAreNonZero);
        }
        if header.questions == 0 {
            return Err(Error::NoQuestions);
        }
        if header.answers != 0 || header.nameservers != 0 || header.additional != 0 {
            return Err(Error::UnexpectedRecords {
                answers: header.answers,
                nameservers: header.nameservers,
                additional: header.additional,
            });
        }
        let payload = &data[HEADER_SIZE..];
        if payload.is_empty() {
            return Err(Error::EmptyPayload);
        }

        let mut cursor = Cursor::new(payload);
        let mut questions = Vec::with_capacity(question_capacity(header.questions, &cursor));
        for _ in 0..header.questions {
            let qname = Name::scan(&mut cursor)?;
            let qtype = read_u16(&mut cursor)?;
            let qclass = read_u16(&mut cursor)?;
            questions.push(Question {
                qname: qname,
                qtype: QueryType::parse(qtype),
                qclass: QueryClass::parse(qclass),
            });
        }
        // a question has no length field, so the last one must end the packet
        if !cursor.at_end() {
            return Err(Error::WrongQuestionLength);
        }

        Ok(RequestPacketInfo {
            id: header.id,
            opcode: opcode,
            recursion_desired: header.recursion_desired,
            questions: questions,
        })
    }
}

/// The count comes off the wire, so never reserve more than the payload can hold
fn question_capacity(count: u16, cursor: &Cursor) -> usize {
    (count as usize).min(cursor.remaining() / MIN_QUESTION_LEN)
}

fn read_u16(cursor: &mut Cursor) -> Result<u16, Error> {
    let hi = cursor.advance().ok_or(Error::WrongQuestionLength)?;
    let lo = cursor.advance().ok_or(Error::WrongQuestionLength)?;
    Ok(BigEndian::read_u16(&[hi, lo]))
}
