use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use serde::Serialize;

use crate::error::{require_input, Result, ToolError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IpClass {
    Unspecified,
    Loopback,
    Private,
    SharedAddressSpace,
    LinkLocal,
    Multicast,
    Broadcast,
    Documentation,
    UniqueLocal,
    Ipv4Mapped,
    Public,
}

impl IpClass {
    pub fn label(self) -> &'static str {
        match self {
            IpClass::Unspecified => "unspecified",
            IpClass::Loopback => "loopback",
            IpClass::Private => "private",
            IpClass::SharedAddressSpace => "shared address space (CGNAT)",
            IpClass::LinkLocal => "link-local",
            IpClass::Multicast => "multicast",
            IpClass::Broadcast => "broadcast",
            IpClass::Documentation => "documentation",
            IpClass::UniqueLocal => "unique local",
            IpClass::Ipv4Mapped => "IPv4-mapped",
            IpClass::Public => "public",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpReport {
    pub address: String,
    pub version: u8,
    pub class: IpClass,
    /// Fully expanded form for IPv6, dotted binary for IPv4.
    pub expanded: String,
}

pub fn inspect_ip(input: &str) -> Result<IpReport> {
    let input = require_input(input)?.trim();
    let addr: IpAddr = input
        .parse()
        .map_err(|_| ToolError::invalid(format!("'{input}' is not a valid IPv4 or IPv6 address")))?;

    Ok(match addr {
        IpAddr::V4(v4) => IpReport {
            address: v4.to_string(),
            version: 4,
            class: classify_v4(v4),
            expanded: v4
                .octets()
                .iter()
                .map(|o| format!("{o:08b}"))
                .collect::<Vec<_>>()
                .join("."),
        },
        IpAddr::V6(v6) => IpReport {
            address: v6.to_string(),
            version: 6,
            class: classify_v6(v6),
            expanded: v6
                .segments()
                .iter()
                .map(|s| format!("{s:04x}"))
                .collect::<Vec<_>>()
                .join(":"),
        },
    })
}

pub fn classify_v4(ip: Ipv4Addr) -> IpClass {
    let [a, b, c, _] = ip.octets();
    if ip.is_unspecified() {
        IpClass::Unspecified
    } else if ip.is_loopback() {
        IpClass::Loopback
    } else if ip.is_private() {
        IpClass::Private
    } else if a == 100 && (64..128).contains(&b) {
        IpClass::SharedAddressSpace
    } else if ip.is_link_local() {
        IpClass::LinkLocal
    } else if ip.is_multicast() {
        IpClass::Multicast
    } else if ip.is_broadcast() {
        IpClass::Broadcast
    } else if (a, b, c) == (192, 0, 2) || (a, b, c) == (198, 51, 100) || (a, b, c) == (203, 0, 113)
    {
        IpClass::Documentation
    } else {
        IpClass::Public
    }
}

pub fn classify_v6(ip: Ipv6Addr) -> IpClass {
    let first = ip.segments()[0];
    if ip.is_unspecified() {
        IpClass::Unspecified
    } else if ip.is_loopback() {
        IpClass::Loopback
    } else if ip.is_multicast() {
        IpClass::Multicast
    } else if first & 0xfe00 == 0xfc00 {
        IpClass::UniqueLocal
    } else if first & 0xffc0 == 0xfe80 {
        IpClass::LinkLocal
    } else if first == 0x2001 && ip.segments()[1] == 0x0db8 {
        IpClass::Documentation
    } else if ip.to_ipv4_mapped().is_some() {
        IpClass::Ipv4Mapped
    } else {
        IpClass::Public
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subnet {
    pub cidr: String,
    pub network: Ipv4Addr,
    pub broadcast: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub wildcard: Ipv4Addr,
    pub prefix: u8,
    pub first_host: Ipv4Addr,
    pub last_host: Ipv4Addr,
    pub usable_hosts: u64,
}

/// IPv4 subnet for `a.b.c.d/n`. `/31` has two usable hosts and `/32` one.
pub fn subnet(input: &str) -> Result<Subnet> {
    let input = require_input(input)?.trim();
    let (addr, prefix) = input
        .split_once('/')
        .ok_or_else(|| ToolError::parse(format!("Expected CIDR notation like 10.0.0.0/8, got '{input}'")))?;
    let addr: Ipv4Addr = addr
        .trim()
        .parse()
        .map_err(|_| ToolError::invalid(format!("'{}' is not a valid IPv4 address", addr.trim())))?;
    let prefix: u8 = prefix
        .trim()
        .parse()
        .ok()
        .filter(|p| *p <= 32)
        .ok_or_else(|| ToolError::invalid(format!("Prefix must be 0-32, got '{}'", prefix.trim())))?;

    let mask: u32 = if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix))
    };
    let network = u32::from(addr) & mask;
    let broadcast = network | !mask;

    let (first, last, usable) = match prefix {
        32 => (network, network, 1),
        31 => (network, broadcast, 2),
        _ => (network + 1, broadcast - 1, u64::from(broadcast - network) - 1),
    };

    Ok(Subnet {
        cidr: format!("{}/{prefix}", Ipv4Addr::from(network)),
        network: Ipv4Addr::from(network),
        broadcast: Ipv4Addr::from(broadcast),
        netmask: Ipv4Addr::from(mask),
        wildcard: Ipv4Addr::from(!mask),
        prefix,
        first_host: Ipv4Addr::from(first),
        last_host: Ipv4Addr::from(last),
        usable_hosts: usable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(s: &str) -> IpClass {
        inspect_ip(s).unwrap().class
    }

    #[test]
    fn test_classify_v4() {
        assert_eq!(class("127.0.0.1"), IpClass::Loopback);
        assert_eq!(class("10.1.2.3"), IpClass::Private);
        assert_eq!(class("172.20.0.1"), IpClass::Private);
        assert_eq!(class("100.100.0.1"), IpClass::SharedAddressSpace);
        assert_eq!(class("169.254.1.1"), IpClass::LinkLocal);
        assert_eq!(class("224.0.0.1"), IpClass::Multicast);
        assert_eq!(class("255.255.255.255"), IpClass::Broadcast);
        assert_eq!(class("203.0.113.9"), IpClass::Documentation);
        assert_eq!(class("8.8.8.8"), IpClass::Public);
    }

    #[test]
    fn test_classify_v6() {
        assert_eq!(class("::1"), IpClass::Loopback);
        assert_eq!(class("fd12:3456::1"), IpClass::UniqueLocal);
        assert_eq!(class("fe80::1"), IpClass::LinkLocal);
        assert_eq!(class("2001:db8::1"), IpClass::Documentation);
        assert_eq!(class("::ffff:192.168.0.1"), IpClass::Ipv4Mapped);
        assert_eq!(class("2606:4700::1111"), IpClass::Public);
    }

    #[test]
    fn test_expanded_forms() {
        assert_eq!(
            inspect_ip("2001:db8::1").unwrap().expanded,
            "2001:0db8:0000:0000:0000:0000:0000:0001"
        );
        assert_eq!(
            inspect_ip("192.168.0.1").unwrap().expanded,
            "11000000.10101000.00000000.00000001"
        );
    }

    #[test]
    fn test_invalid_address() {
        assert!(matches!(inspect_ip("256.1.1.1"), Err(ToolError::Validation(_))));
        assert!(inspect_ip("hello").is_err());
    }

    #[test]
    fn test_subnet_24() {
        let net = subnet("192.168.1.77/24").unwrap();
        assert_eq!(net.cidr, "192.168.1.0/24");
        assert_eq!(net.broadcast.to_string(), "192.168.1.255");
        assert_eq!(net.netmask.to_string(), "255.255.255.0");
        assert_eq!(net.wildcard.to_string(), "0.0.0.255");
        assert_eq!(net.first_host.to_string(), "192.168.1.1");
        assert_eq!(net.last_host.to_string(), "192.168.1.254");
        assert_eq!(net.usable_hosts, 254);
    }

    #[test]
    fn test_subnet_edges() {
        assert_eq!(subnet("10.0.0.5/32").unwrap().usable_hosts, 1);
        assert_eq!(subnet("10.0.0.5/31").unwrap().usable_hosts, 2);
        let all = subnet("1.2.3.4/0").unwrap();
        assert_eq!(all.usable_hosts, 4_294_967_294);
        assert_eq!(all.netmask.to_string(), "0.0.0.0");
    }

    #[test]
    fn test_subnet_rejects_bad_prefix() {
        assert!(subnet("10.0.0.0/33").is_err());
        assert!(subnet("10.0.0.0").is_err());
    }
}
