use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::sync::Arc;
use std::time::Duration;

use unidns::dns_parser::{self, Name};
use unidns::{Responder, ResponderConfig, StaticZone};

const QUERY_A: &[u8] = b"\x12\x34\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\
                         \x0amy-service\x03com\x00\x00\x01\x00\x01";

fn responder() -> Responder {
    let _ = env_logger::builder().is_test(true).try_init();
    let zone = StaticZone::new().with_a(
        &"my-service.com".parse().unwrap(),
        3000,
        Ipv4Addr::new(127, 0, 0, 1),
    );
    let bind_addr = SocketAddr::new(Ipv4Addr::LOCALHOST.into(), 0);
    Responder::new(ResponderConfig::new(bind_addr, Arc::new(zone))).unwrap()
}

fn client() -> UdpSocket {
    let socket = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    socket
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    socket
}

fn exchange(socket: &UdpSocket, server: SocketAddr, query: &[u8]) -> Vec<u8> {
    socket.send_to(query, server).unwrap();
    let mut buf = [0u8; 512];
    let (len, from) = socket.recv_from(&mut buf).unwrap();
    assert_eq!(from, server);
    buf[..len].to_vec()
}

#[test]
fn answers_over_udp() {
    let responder = responder();
    let socket = client();

    let response = exchange(&socket, responder.local_addr(), QUERY_A);
    let name: Name = "my-service.com".parse().unwrap();
    assert_eq!(
        response,
        dns_parser::single_ipv4_answer(0x1234, &name, 3000, Ipv4Addr::new(127, 0, 0, 1))
    );
}

#[test]
fn keeps_serving_after_bad_datagram() {
    let responder = responder();
    let socket = client();

    socket.send_to(b"\x00\x01garbage", responder.local_addr()).unwrap();

    let mut unknown = QUERY_A.to_vec();
    unknown[13] = b'x';
    let response = exchange(&socket, responder.local_addr(), &unknown);
    assert_eq!(&response[..4], b"\x12\x34\x80\x03");

    let response = exchange(&socket, responder.local_addr(), QUERY_A);
    assert_eq!(&response[..4], b"\x12\x34\x80\x00");
}

#[test]
fn drop_stops_responder() {
    let responder = responder();
    let addr = responder.local_addr();
    drop(responder);

    // the port is free again once the responder is gone
    UdpSocket::bind(addr).unwrap();
}

#[test]
fn second_responder_on_same_port_fails() {
    let first = responder();
    let config = ResponderConfig::new(first.local_addr(), Arc::new(StaticZone::new()));
    assert!(Responder::new(config).is_err());

    // the first one is still the one answering
    let socket = client();
    let response = exchange(&socket, first.local_addr(), QUERY_A);
    assert_eq!(&response[..4], b"\x12\x34\x80\x00");
}
