use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

pub fn main() {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters("unidns=debug");
    builder.init();

    // optional bind address, e.g. 127.0.0.1:5353
    let bind_addr = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<SocketAddr>().expect("invalid bind address"),
        None => SocketAddr::new(Ipv4Addr::LOCALHOST.into(), unidns::DNS_PORT),
    };

    let zone = unidns::StaticZone::new().with_a(
        &"my-service.com".parse().unwrap(),
        unidns::DEFAULT_TTL,
        Ipv4Addr::new(127, 0, 0, 1),
    );

    let responder =
        unidns::Responder::new(unidns::ResponderConfig::new(bind_addr, Arc::new(zone))).unwrap();
    log::info!("serving my-service.com on {}", responder.local_addr());

    loop {
        ::std::thread::sleep(::std::time::Duration::from_secs(10));
    }
}
