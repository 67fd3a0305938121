// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! ARP request construction and reply parsing.
//!
//! Requests are broadcast on the local segment; replies are matched against
//! the queried protocol address before the sender's hardware address is
//! accepted.

use crate::ethernet;
use crate::utils::{ARP_LEN, MIN_ETH_FRAME_NO_FCS};
use anyhow::{Context, bail, ensure};
use pnet::datalink::MacAddr;
use pnet::packet::Packet;
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, ArpPacket, MutableArpPacket};
use pnet::packet::ethernet::{EtherTypes, EthernetPacket};
use std::net::Ipv4Addr;

/// Builds a who-has request for `dst_addr`, padded to the minimum frame size.
pub fn create_request(
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    dst_addr: Ipv4Addr,
) -> anyhow::Result<Vec<u8>> {
    let eth_header: Vec<u8> =
        ethernet::make_header(src_mac, MacAddr::broadcast(), EtherTypes::Arp)?;

    let mut arp_buffer: [u8; ARP_LEN] = [0u8; ARP_LEN];
    {
        let mut arp_packet: MutableArpPacket = MutableArpPacket::new(&mut arp_buffer)
            .context("failed to create mutable ARP packet")?;
        arp_packet.set_hardware_type(ArpHardwareTypes::Ethernet);
        arp_packet.set_protocol_type(EtherTypes::Ipv4);
        arp_packet.set_hw_addr_len(6);
        arp_packet.set_proto_addr_len(4);
        arp_packet.set_operation(ArpOperations::Request);
        arp_packet.set_sender_hw_addr(src_mac);
        arp_packet.set_target_hw_addr(MacAddr::zero());
        arp_packet.set_sender_proto_addr(src_addr);
        arp_packet.set_target_proto_addr(dst_addr);
    }

    let mut final_packet: Vec<u8> = Vec::with_capacity(MIN_ETH_FRAME_NO_FCS);

    final_packet.extend_from_slice(&eth_header);
    final_packet.extend_from_slice(&arp_buffer);
    final_packet.resize(MIN_ETH_FRAME_NO_FCS, 0u8);

    Ok(final_packet)
}

/// Extracts the hardware address from a reply sent by `expected_addr`.
///
/// Frames that are not ARP replies, or replies from any other sender,
/// are rejected so the caller can keep listening.
pub fn parse_reply(frame: &EthernetPacket, expected_addr: Ipv4Addr) -> anyhow::Result<MacAddr> {
    if frame.get_ethertype() != EtherTypes::Arp {
        bail!("not an ARP frame ({:?})", frame.get_ethertype());
    }

    let arp_packet: ArpPacket = ArpPacket::new(frame.payload()).context(format!(
        "truncated or invalid ARP packet (payload len {})",
        frame.payload().len()
    ))?;

    ensure!(
        arp_packet.get_operation() == ArpOperations::Reply,
        "not an ARP reply"
    );

    let sender_addr: Ipv4Addr = arp_packet.get_sender_proto_addr();
    ensure!(
        sender_addr == expected_addr,
        "reply from unexpected sender {sender_addr}"
    );

    Ok(arp_packet.get_sender_hw_addr())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use pnet::packet::ethernet::MutableEthernetPacket;

    const ETH_HDR_LEN: usize = 14;

    fn build_mock_reply(
        sender_mac: MacAddr,
        sender_ip: Ipv4Addr,
        payload_size: usize,
    ) -> Vec<u8> {
        let mut eth_buffer = vec![0u8; ETH_HDR_LEN];
        {
            let mut eth_pkt = MutableEthernetPacket::new(&mut eth_buffer).unwrap();
            eth_pkt.set_destination(MacAddr::broadcast());
            eth_pkt.set_source(sender_mac);
            eth_pkt.set_ethertype(EtherTypes::Arp);
        }

        let mut arp_buffer = vec![0u8; payload_size];

        if payload_size >= ARP_LEN {
            let mut arp_pkt = MutableArpPacket::new(&mut arp_buffer[..ARP_LEN]).unwrap();

            arp_pkt.set_hardware_type(ArpHardwareTypes::Ethernet);
            arp_pkt.set_protocol_type(EtherTypes::Ipv4);
            arp_pkt.set_hw_addr_len(6);
            arp_pkt.set_proto_addr_len(4);
            arp_pkt.set_operation(ArpOperations::Reply);
            arp_pkt.set_sender_hw_addr(sender_mac);
            arp_pkt.set_sender_proto_addr(sender_ip);
            arp_pkt.set_target_hw_addr(MacAddr::zero());
            arp_pkt.set_target_proto_addr(Ipv4Addr::new(192, 168, 1, 1));
        }

        [eth_buffer, arp_buffer].concat()
    }

    #[test]
    fn create_request_is_well_formed() {
        let src_mac = MacAddr::new(0x01, 0x02, 0x03, 0x04, 0x05, 0x06);
        let src_addr = Ipv4Addr::new(192, 168, 1, 10);
        let dst_addr = Ipv4Addr::new(192, 168, 1, 1);

        let buffer = create_request(src_mac, src_addr, dst_addr).expect("packet creation failed");

        assert!(buffer.len() >= MIN_ETH_FRAME_NO_FCS);

        let frame = EthernetPacket::new(&buffer).expect("failed to parse Ethernet frame");
        assert_eq!(frame.get_destination(), MacAddr::broadcast());
        assert_eq!(frame.get_source(), src_mac);
        assert_eq!(frame.get_ethertype(), EtherTypes::Arp);

        let arp_packet = ArpPacket::new(frame.payload()).expect("failed to parse ARP packet");
        assert_eq!(arp_packet.get_operation(), ArpOperations::Request);
        assert_eq!(arp_packet.get_hardware_type(), ArpHardwareTypes::Ethernet);
        assert_eq!(arp_packet.get_protocol_type(), EtherTypes::Ipv4);
        assert_eq!(arp_packet.get_hw_addr_len(), 6);
        assert_eq!(arp_packet.get_proto_addr_len(), 4);
        assert_eq!(arp_packet.get_sender_hw_addr(), src_mac);
        assert_eq!(arp_packet.get_sender_proto_addr(), src_addr);
        assert_eq!(arp_packet.get_target_hw_addr(), MacAddr::zero());
        assert_eq!(arp_packet.get_target_proto_addr(), dst_addr);
    }

    #[test]
    fn parse_reply_returns_sender_mac() {
        let sender_mac = MacAddr::new(0xaa, 0xbb, 0xcc, 0x01, 0x02, 0x03);
        let sender_ip = Ipv4Addr::new(192, 168, 1, 123);

        let buffer = build_mock_reply(sender_mac, sender_ip, ARP_LEN);
        let frame = EthernetPacket::new(&buffer).unwrap();

        let mac = parse_reply(&frame, sender_ip).expect("reply should parse");
        assert_eq!(mac, sender_mac);
    }

    #[test]
    fn parse_reply_rejects_truncated_payload() {
        let sender_mac = MacAddr::new(0xaa, 0xbb, 0xcc, 0x01, 0x02, 0x03);
        let buffer = build_mock_reply(sender_mac, Ipv4Addr::UNSPECIFIED, 10);
        let frame = EthernetPacket::new(&buffer).unwrap();

        let result = parse_reply(&frame, Ipv4Addr::UNSPECIFIED);
        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("truncated or invalid ARP packet"));
    }

    #[test]
    fn parse_reply_rejects_other_senders() {
        let sender_mac = MacAddr::new(0xaa, 0xbb, 0xcc, 0x01, 0x02, 0x03);
        let sender_ip = Ipv4Addr::new(192, 168, 1, 123);
        let queried_ip = Ipv4Addr::new(192, 168, 1, 200);

        let buffer = build_mock_reply(sender_mac, sender_ip, ARP_LEN);
        let frame = EthernetPacket::new(&buffer).unwrap();

        let result = parse_reply(&frame, queried_ip);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("unexpected sender")
        );
    }

    #[test]
    fn parse_reply_rejects_non_arp_frames() {
        let sender_mac = MacAddr::new(0xaa, 0xbb, 0xcc, 0x01, 0x02, 0x03);
        let mut buffer = build_mock_reply(sender_mac, Ipv4Addr::UNSPECIFIED, ARP_LEN);

        let mut eth_pkt = MutableEthernetPacket::new(&mut buffer).unwrap();
        eth_pkt.set_ethertype(EtherTypes::Ipv4);

        let frame = EthernetPacket::new(&buffer).unwrap();
        let result = parse_reply(&frame, Ipv4Addr::UNSPECIFIED);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not an ARP frame"));
    }

    #[test]
    fn parse_reply_rejects_requests() {
        let src_mac = MacAddr::new(0x01, 0x02, 0x03, 0x04, 0x05, 0x06);
        let src_addr = Ipv4Addr::new(192, 168, 1, 10);
        let dst_addr = Ipv4Addr::new(192, 168, 1, 1);

        let buffer = create_request(src_mac, src_addr, dst_addr).unwrap();
        let frame = EthernetPacket::new(&buffer).unwrap();

        let result = parse_reply(&frame, src_addr);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not an ARP reply"));
    }
}
