use crate::dns_parser::{self, ErrorKind, Header, Opcode, QueryType, RRData, RequestPacketInfo};
use crate::zone::Lookup;
use log::{debug, error, trace, warn};
use std::collections::VecDeque;
use std::io;
use std::io::ErrorKind::WouldBlock;
use std::net::SocketAddr;
use std::sync::Arc;
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tokio::{net::UdpSocket, sync::mpsc};

#[derive(Clone, Debug)]
pub enum Command {
    Shutdown,
}

/// Decides how to answer one datagram
///
/// Returns `None` when the datagram should be dropped without a reply.
pub fn respond(zone: &dyn Lookup, buffer: &[u8]) -> Option<Vec<u8>> {
    let request = match RequestPacketInfo::parse(buffer) {
        Ok(request) => request,
        Err(err) => {
            return match err.kind() {
                ErrorKind::Unsupported => {
                    debug!("refusing query: {}", err);
                    // a header was parsed, so the id is there
                    Header::parse(buffer)
                        .ok()
                        .map(|header| dns_parser::refusal(header.id))
                }
                ErrorKind::Malformed => {
                    warn!("dropping malformed packet: {}", err);
                    None
                }
            };
        }
    };

    let question = match request.questions.as_slice() {
        [question] if request.opcode == Opcode::StandardQuery => question,
        _ => {
            debug!(
                "refusing {:?} with {} questions",
                request.opcode,
                request.questions.len()
            );
            return Some(dns_parser::refusal(request.id));
        }
    };
    debug!(
        "received question: {:?} {:?} {}",
        question.qclass, question.qtype, question.qname
    );

    if let QueryType::Other(code) = question.qtype {
        debug!("refusing query type {}", code);
        return Some(dns_parser::refusal(request.id));
    }

    match zone.lookup(&question.qname, question.qtype) {
        Some(record) => match record.data {
            RRData::A(ip) => Some(dns_parser::single_ipv4_answer(
                request.id,
                &question.qname,
                record.ttl,
                ip,
            )),
            RRData::AAAA(ip) => Some(dns_parser::single_ipv6_answer(
                request.id,
                &question.qname,
                record.ttl,
                ip,
            )),
        },
        None => {
            trace!("no {:?} record for {}", question.qtype, question.qname);
            Some(dns_parser::name_not_found(&request))
        }
    }
}

pub struct FSM {
    socket: UdpSocket,
    zone: Arc<dyn Lookup>,
    commands: mpsc::UnboundedReceiver<Command>,
    outgoing: VecDeque<(Vec<u8>, SocketAddr)>,
}

impl FSM {
    // Will panic if called from outside the context of a runtime
    pub fn new(
        socket: std::net::UdpSocket,
        zone: Arc<dyn Lookup>,
    ) -> io::Result<(FSM, mpsc::UnboundedSender<Command>)> {
        let socket = UdpSocket::from_std(socket)?;

        let (tx, rx) = mpsc::unbounded_channel();

        let fsm = FSM {
            socket: socket,
            zone: zone,
            commands: rx,
            outgoing: VecDeque::new(),
        };

        Ok((fsm, tx))
    }

    fn recv_packets(&mut self, cx: &mut Context) -> io::Result<()> {
        let mut recv_buf = [0u8; 65536];
        loop {
            let mut buf = tokio::io::ReadBuf::new(&mut recv_buf);
            let addr = match self.socket.poll_recv_from(cx, &mut buf) {
                Poll::Ready(Ok(addr)) => addr,
                Poll::Ready(Err(err)) => return Err(err),
                Poll::Pending => break,
            };
            self.handle_packet(buf.filled(), addr);
        }

        Ok(())
    }

    fn handle_packet(&mut self, buffer: &[u8], addr: SocketAddr) {
        trace!("received packet from {:?}", addr);

        if let Some(response) = respond(self.zone.as_ref(), buffer) {
            self.outgoing.push_back((response, addr));
        }
    }
}

impl Future for FSM {
    type Output = ();
    fn poll(self: Pin<&mut Self>, cx: &mut Context) -> Poll<()> {
        let pinned = Pin::get_mut(self);
        while let Poll::Ready(cmd) = pinned.commands.poll_recv(cx) {
            match cmd {
                Some(Command::Shutdown) => return Poll::Ready(()),
                None => {
                    warn!("responder disconnected without shutdown");
                    return Poll::Ready(());
                }
            }
        }

        // a failed receive, e.g. an ICMP port unreachable surfacing on some
        // platforms, is not fatal
        if let Err(e) = pinned.recv_packets(cx) {
            error!("ResponderRecvPacket Error: {:?}", e);
            cx.waker().wake_by_ref();
        }

        while let Some((response, addr)) = pinned.outgoing.pop_front() {
            trace!("sending packet to {:?}", addr);

            match pinned.socket.poll_send_to(cx, &response, addr) {
                Poll::Ready(Ok(bytes_sent)) if bytes_sent == response.len() => (),
                Poll::Ready(Ok(_)) => warn!("failed to send entire packet"),
                Poll::Ready(Err(ref ioerr)) if ioerr.kind() == WouldBlock => (),
                Poll::Ready(Err(err)) => warn!("error sending packet {:?}", err),
                Poll::Pending => {
                    pinned.outgoing.push_front((response, addr));
                    break;
                }
            }
        }

        Poll::Pending
    }
}
