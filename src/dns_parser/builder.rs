use std::marker::PhantomData;
use std::net::{Ipv4Addr, Ipv6Addr};

use byteorder::{BigEndian, ByteOrder};

use super::header::HEADER_SIZE;
use super::{Header, Name, QueryClass, QueryType, RRData, RequestPacketInfo, ResponseCode};

/// Compression pointer to the name right after the header
const QUESTION_NAME_POINTER: u16 = 0b1100_0000_0000_0000 | HEADER_SIZE as u16;

pub enum Questions {}
pub enum Answers {}

pub trait MoveTo<T> {}
impl<T> MoveTo<T> for T {}

impl MoveTo<Answers> for Questions {}

/// Allows to build a DNS response packet
///
/// Sections can only be filled in wire order, the type parameter tracks which
/// section is being written.
pub struct Builder<S> {
    buf: Vec<u8>,
    _state: PhantomData<S>,
}

impl Builder<Questions> {
    /// Creates a response with only the QR bit and `response_code` set
    pub fn new_response(id: u16, response_code: ResponseCode) -> Builder<Questions> {
        let mut buf = Vec::with_capacity(512);
        buf.extend([0u8; HEADER_SIZE].iter());
        Header::response(id, response_code).write(&mut buf[..HEADER_SIZE]);
        Builder {
            buf: buf,
            _state: PhantomData,
        }
    }

    /// Adds a question to the packet
    ///
    /// # Panics
    ///
    /// * There are already 65535 questions in the buffer.
    pub fn add_question(
        mut self,
        qname: &Name,
        qtype: QueryType,
        qclass: QueryClass,
    ) -> Builder<Questions> {
        qname.write_to(&mut self.buf);
        put_u16(&mut self.buf, qtype.code());
        put_u16(&mut self.buf, qclass.code());
        Header::inc_questions(&mut self.buf).expect("Too many questions");
        self
    }
}

impl<T> Builder<T> {
    /// Returns the final packet
    pub fn build(self) -> Vec<u8> {
        self.buf
    }

    pub fn move_to<U>(self) -> Builder<U>
    where
        T: MoveTo<U>,
    {
        Builder {
            buf: self.buf,
            _state: PhantomData,
        }
    }
}

impl<T: MoveTo<Answers>> Builder<T> {
    /// Adds an Internet class answer for the first question
    ///
    /// The owner name is written as a pointer to offset 12, which is only
    /// right when exactly one question was added.
    ///
    /// # Panics
    ///
    /// * There are already 65535 answers in the buffer.
    pub fn add_answer(self, ttl: u32, data: &RRData) -> Builder<Answers> {
        let mut builder = self.move_to::<Answers>();

        put_u16(&mut builder.buf, QUESTION_NAME_POINTER);
        put_u16(&mut builder.buf, data.typ().code());
        put_u16(&mut builder.buf, QueryClass::IN.code());
        put_u32(&mut builder.buf, ttl);

        let size_offset = builder.buf.len();
        put_u16(&mut builder.buf, 0);

        let data_offset = builder.buf.len();
        data.write_to(&mut builder.buf);
        let data_size = builder.buf.len() - data_offset;

        BigEndian::write_u16(
            &mut builder.buf[size_offset..size_offset + 2],
            data_size as u16,
        );
        Header::inc_answers(&mut builder.buf).expect("Too many answers");

        builder
    }
}

fn put_u16(buf: &mut Vec<u8>, value: u16) {
    let mut field = [0; 2];
    BigEndian::write_u16(&mut field, value);
    buf.extend_from_slice(&field);
}

fn put_u32(buf: &mut Vec<u8>, value: u32) {
    let mut field = [0; 4];
    BigEndian::write_u32(&mut field, value);
    buf.extend_from_slice(&field);
}

/// Header-only "not implemented" response
pub fn refusal(id: u16) -> Vec<u8> {
    Builder::new_response(id, ResponseCode::NotImplemented).build()
}

/// "Name error" response echoing the first question of `request`
///
/// The echoed type is AAAA when that was asked for and A otherwise; the class
/// is always IN.
pub fn name_not_found(request: &RequestPacketInfo) -> Vec<u8> {
    let builder = Builder::new_response(request.id, ResponseCode::NameError);
    match request.questions.first() {
        Some(question) => {
            let qtype = match question.qtype {
                QueryType::AAAA => QueryType::AAAA,
                _ => QueryType::A,
            };
            builder
                .add_question(&question.qname, qtype, QueryClass::IN)
                .build()
        }
        None => builder.build(),
    }
}

pub fn single_ipv4_answer(id: u16, qname: &Name, ttl: u32, addr: Ipv4Addr) -> Vec<u8> {
    single_answer(id, qname, ttl, &RRData::A(addr))
}

pub fn single_ipv6_answer(id: u16, qname: &Name, ttl: u32, addr: Ipv6Addr) -> Vec<u8> {
    single_answer(id, qname, ttl, &RRData::AAAA(addr))
}

fn single_answer(id: u16, qname: &Name, ttl: u32, data: &RRData) -> Vec<u8> {
    Builder::new_response(id, ResponseCode::NoError)
        .add_question(qname, data.typ(), QueryClass::IN)
        .add_answer(ttl, data)
        .build()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dns_parser::{Opcode, Question};

    fn request(qtype: QueryType) -> RequestPacketInfo {
        RequestPacketInfo {
            id: 0x1234,
            opcode: Opcode::StandardQuery,
            recursion_desired: true,
            questions: vec![Question {
                qname: "my-service.com".parse().unwrap(),
                qtype: qtype,
                qclass: QueryClass::IN,
            }],
        }
    }

    fn read_u16(data: &[u8], pos: usize) -> u16 {
        BigEndian::read_u16(&data[pos..pos + 2])
    }

    /// Answer record read straight from the bytes, independent of the parser
    struct RawAnswer {
        pointer: u16,
        typ: u16,
        class: u16,
        ttl: u32,
        rdata: Vec<u8>,
    }

    fn read_single_answer(packet: &[u8]) -> RawAnswer {
        assert_eq!(read_u16(packet, 4), 1);
        assert_eq!(read_u16(packet, 6), 1);
        let mut pos = 12;
        while packet[pos] != 0 {
            pos += packet[pos] as usize + 1;
        }
        pos += 1 + 4;
        let rdlength = read_u16(packet, pos + 10) as usize;
        assert_eq!(packet.len(), pos + 12 + rdlength);
        RawAnswer {
            pointer: read_u16(packet, pos),
            typ: read_u16(packet, pos + 2),
            class: read_u16(packet, pos + 4),
            ttl: BigEndian::read_u32(&packet[pos + 6..pos + 10]),
            rdata: packet[pos + 12..].to_vec(),
        }
    }

    #[test]
    fn build_refusal() {
        let packet = refusal(0xabcd);
        assert_eq!(&packet[..], b"\xab\xcd\x80\x04\x00\x00\x00\x00\x00\x00\x00\x00");
    }

    #[test]
    fn build_name_not_found() {
        let packet = name_not_found(&request(QueryType::A));
        let result = b"\x12\x34\x80\x03\x00\x01\x00\x00\x00\x00\x00\x00\
                       \x0amy-service\x03com\x00\x00\x01\x00\x01";
        assert_eq!(&packet[..], &result[..]);
    }

    #[test]
    fn name_not_found_echoes_aaaa_only() {
        let type_at = |packet: &[u8]| read_u16(packet, packet.len() - 4);
        assert_eq!(type_at(&name_not_found(&request(QueryType::AAAA))[..]), 28);
        assert_eq!(type_at(&name_not_found(&request(QueryType::A))[..]), 1);
        assert_eq!(type_at(&name_not_found(&request(QueryType::Other(15)))[..]), 1);
    }

    #[test]
    fn name_not_found_without_question() {
        let mut req = request(QueryType::A);
        req.questions.clear();
        assert_eq!(
            &name_not_found(&req)[..],
            b"\x12\x34\x80\x03\x00\x00\x00\x00\x00\x00\x00\x00"
        );
    }

    #[test]
    fn build_ipv4_answer() {
        let name: Name = "my-service.com".parse().unwrap();
        let packet = single_ipv4_answer(0x1234, &name, 3000, Ipv4Addr::new(127, 0, 0, 1));
        let result = b"\x12\x34\x80\x00\x00\x01\x00\x01\x00\x00\x00\x00\
                       \x0amy-service\x03com\x00\x00\x01\x00\x01\
                       \xc0\x0c\x00\x01\x00\x01\x00\x00\x0b\xb8\x00\x04\x7f\x00\x00\x01";
        assert_eq!(&packet[..], &result[..]);
    }

    #[test]
    fn answer_to_parsed_query() {
        let query = b"\x12\x34\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\
                      \x0amy-service\x03com\x00\x00\x01\x00\x01";
        let req = RequestPacketInfo::parse(query).unwrap();
        let packet = single_ipv4_answer(
            req.id,
            &req.questions[0].qname,
            3000,
            Ipv4Addr::new(127, 0, 0, 1),
        );
        assert_eq!(read_u16(&packet, 0), 0x1234);
        let answer = read_single_answer(&packet);
        assert_eq!(answer.pointer, 0xc00c);
        assert_eq!(answer.typ, 1);
        assert_eq!(answer.class, 1);
        assert_eq!(answer.ttl, 3000);
        assert_eq!(answer.rdata, vec![127, 0, 0, 1]);
    }

    #[test]
    fn build_ipv6_answer() {
        let name: Name = "v6.example".parse().unwrap();
        let addr = Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1);
        let packet = single_ipv6_answer(7, &name, 60, addr);
        assert_eq!(read_u16(&packet, 2), 0x8000);
        assert_eq!(read_u16(&packet, 12 + name.wire_len()), 28);
        let answer = read_single_answer(&packet);
        assert_eq!(answer.typ, 28);
        assert_eq!(answer.ttl, 60);
        assert_eq!(answer.rdata, addr.octets().to_vec());
    }

    #[test]
    fn builder_counts_sections() {
        let name: Name = "a.b".parse().unwrap();
        let packet = Builder::new_response(1, ResponseCode::NoError)
            .add_question(&name, QueryType::A, QueryClass::IN)
            .add_question(&name, QueryType::AAAA, QueryClass::IN)
            .build();
        assert_eq!(Header::question_count(&packet), 2);
        assert_eq!(Header::answer_count(&packet), 0);
    }
}
