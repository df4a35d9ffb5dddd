use route_rs_arp::cache::CacheState;
use route_rs_arp::config::ArpConfig;
use route_rs_arp::device::{IpInterface, NetDevice};
use route_rs_arp::utils::test::{CaptureDevice, ProtocolTable, StaticInterfaces};
use route_rs_arp::{Arp, Resolution};
use route_rs_packets::{ArpOp, ArpPacket, EthernetFrame, MacAddr, ARP_ETHER_TYPE};
use std::net::Ipv4Addr;
use std::sync::Arc;

const LOCAL_MAC: MacAddr = MacAddr {
    bytes: [0x02, 0, 0, 0, 0, 1],
};
const PEER_MAC: MacAddr = MacAddr {
    bytes: [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff],
};

fn local_addr() -> Ipv4Addr {
    Ipv4Addr::new(192, 0, 2, 1)
}

fn peer_addr() -> Ipv4Addr {
    Ipv4Addr::new(192, 0, 2, 5)
}

struct Stack {
    arp: Arc<Arp>,
    registry: ProtocolTable,
    device: Arc<dyn NetDevice>,
    iface: IpInterface,
}

fn stack() -> (Stack, crossbeam::crossbeam_channel::Receiver<EthernetFrame>) {
    let (device, frames) = CaptureDevice::new("net0", LOCAL_MAC);
    let device: Arc<dyn NetDevice> = device;
    let iface = IpInterface::new(Arc::clone(&device), local_addr());
    let arp = Arc::new(Arp::new(
        ArpConfig::default(),
        Arc::new(StaticInterfaces::new(vec![iface.clone()])),
    ));
    let registry = ProtocolTable::new();
    Arp::init(&arp, &registry).unwrap();

    let stack = Stack {
        arp,
        registry,
        device,
        iface,
    };
    (stack, frames)
}

#[test]
fn resolve_completes_once_the_reply_arrives() {
    let (stack, frames) = stack();

    assert_eq!(
        stack.arp.resolve(&stack.iface, peer_addr()),
        Ok(Resolution::Incomplete)
    );

    let request_frame = frames.try_recv().unwrap();
    assert_eq!(request_frame.dest_mac(), MacAddr::BROADCAST);
    let request = ArpPacket::parse(&request_frame.payload()).unwrap();
    assert_eq!(request.op(), Some(ArpOp::Request));
    assert_eq!(request.target_protocol_addr, peer_addr());
    assert!(frames.try_recv().is_err());

    let reply = ArpPacket::reply(PEER_MAC, peer_addr(), LOCAL_MAC, local_addr());
    let mut reply_frame = EthernetFrame::encap_arp(&reply);
    reply_frame.set_dest_mac(LOCAL_MAC);
    reply_frame.set_src_mac(PEER_MAC);
    assert!(stack.registry.dispatch(&reply_frame, &stack.device));

    assert_eq!(
        stack.arp.resolve(&stack.iface, peer_addr()),
        Ok(Resolution::Found(PEER_MAC))
    );
    assert_eq!(
        stack.arp.lookup(peer_addr()).unwrap().state,
        CacheState::Resolved
    );
    // Neither the reply nor the second resolve put anything on the wire
    assert!(frames.try_recv().is_err());
}

#[test]
fn request_for_our_address_is_answered_and_learned() {
    let (stack, frames) = stack();

    let request = ArpPacket::request(PEER_MAC, peer_addr(), local_addr());
    let mut request_frame = EthernetFrame::encap_arp(&request);
    request_frame.set_dest_mac(MacAddr::BROADCAST);
    request_frame.set_src_mac(PEER_MAC);
    assert!(stack.registry.dispatch(&request_frame, &stack.device));

    let reply_frame = frames.try_recv().unwrap();
    assert_eq!(reply_frame.dest_mac(), PEER_MAC);
    assert_eq!(reply_frame.src_mac(), LOCAL_MAC);
    assert_eq!(reply_frame.ether_type(), ARP_ETHER_TYPE);
    let reply = ArpPacket::parse(&reply_frame.payload()).unwrap();
    assert_eq!(reply.op(), Some(ArpOp::Reply));
    assert_eq!(reply.sender_hardware_addr, LOCAL_MAC);
    assert_eq!(reply.sender_protocol_addr, local_addr());
    assert_eq!(reply.target_hardware_addr, PEER_MAC);
    assert_eq!(reply.target_protocol_addr, peer_addr());
    assert!(frames.try_recv().is_err());

    // The requester was learned on the way in, so talking back needs no request
    assert_eq!(
        stack.arp.resolve(&stack.iface, peer_addr()),
        Ok(Resolution::Found(PEER_MAC))
    );
    assert!(frames.try_recv().is_err());
}

#[test]
fn garbage_on_the_arp_ether_type_is_dropped() {
    let (stack, frames) = stack();

    let mut frame = EthernetFrame::empty();
    frame.set_ether_type(ARP_ETHER_TYPE);
    frame.set_payload(&[0xff; 12]);
    assert!(stack.registry.dispatch(&frame, &stack.device));

    assert!(stack.arp.entries().is_empty());
    assert!(frames.try_recv().is_err());
}
