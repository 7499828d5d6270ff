//! Classification of resolved addresses.
//!
//! Every check works on the binary address after resolution, never on the
//! host string, so alternative spellings of an address cannot slip past.
//! IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) are judged as IPv4.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// The three independent answers for one address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressClass {
    /// 127.0.0.0/8, ::1, or an unspecified address
    pub loopback: bool,
    /// 169.254.0.0/16 or fe80::/10
    pub link_local: bool,
    /// Private or site-local range (link-local IPv4 included)
    pub private_network: bool,
}

/// Classify an address.
#[must_use]
pub fn classify(ip: IpAddr) -> AddressClass {
    AddressClass {
        loopback: is_loopback(ip),
        link_local: is_link_local(ip),
        private_network: is_private_network(ip),
    }
}

/// Loopback check.
///
/// `0.0.0.0` and `::` count as loopback: connecting to them reaches the
/// local host.
#[must_use]
pub fn is_loopback(ip: IpAddr) -> bool {
    let ip = ip.to_canonical();
    if ip.is_unspecified() {
        return true;
    }
    match ip {
        IpAddr::V4(v4) => v4.octets()[0] == 127,
        IpAddr::V6(v6) => v6 == Ipv6Addr::LOCALHOST,
    }
}

/// Link-local check.
#[must_use]
pub fn is_link_local(ip: IpAddr) -> bool {
    match ip.to_canonical() {
        IpAddr::V4(v4) => is_link_local_v4(v4),
        // fe80::/10
        IpAddr::V6(v6) => v6.segments()[0] & 0xffc0 == 0xfe80,
    }
}

/// Private-network check.
///
/// IPv4: 10.0.0.0/8, 172.16.0.0/12, 192.168.0.0/16 and 169.254.0.0/16.
/// Link-local overlaps here on purpose; [`is_link_local`] still reports it
/// on its own.
///
/// IPv6: site-local fec0::/10 and unique-local fc00::/7.
#[must_use]
pub fn is_private_network(ip: IpAddr) -> bool {
    match ip.to_canonical() {
        IpAddr::V4(v4) => {
            let [a, b, ..] = v4.octets();
            a == 10
                || (a == 172 && b & 0xf0 == 16)
                || (a == 192 && b == 168)
                || is_link_local_v4(v4)
        }
        IpAddr::V6(v6) => {
            let first = v6.segments()[0];
            first & 0xffc0 == 0xfec0 || first & 0xfe00 == 0xfc00
        }
    }
}

const fn is_link_local_v4(v4: Ipv4Addr) -> bool {
    let [a, b, ..] = v4.octets();
    a == 169 && b == 254
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn classification_table() {
        let private = AddressClass {
            private_network: true,
            ..AddressClass::default()
        };
        assert_eq!(classify(ip("10.0.0.5")), private);
        assert_eq!(classify(ip("172.16.0.1")), private);
        assert_eq!(classify(ip("172.31.255.255")), private);
        assert_eq!(classify(ip("172.32.0.1")), AddressClass::default());
        assert_eq!(classify(ip("192.168.1.1")), private);
        assert_eq!(classify(ip("8.8.8.8")), AddressClass::default());

        let link_local = classify(ip("169.254.1.1"));
        assert!(link_local.link_local);
        assert!(link_local.private_network);
        assert!(!link_local.loopback);
    }

    #[test]
    fn loopback_range() {
        assert!(is_loopback(ip("127.0.0.1")));
        assert!(is_loopback(ip("127.8.9.10")));
        assert!(is_loopback(ip("::1")));
        assert!(!is_loopback(ip("128.0.0.1")));
        assert!(!is_private_network(ip("127.0.0.1")));
    }

    #[test]
    fn unspecified_addresses_are_loopback() {
        assert!(is_loopback(ip("0.0.0.0")));
        assert!(is_loopback(ip("::")));
        assert!(is_loopback(ip("::ffff:0.0.0.0")));
        assert!(!is_private_network(ip("::")));
        assert!(!is_link_local(ip("0.0.0.0")));
    }

    #[test]
    fn ipv4_mapped_addresses_are_unwrapped() {
        assert!(is_loopback(ip("::ffff:127.0.0.1")));
        assert!(is_private_network(ip("::ffff:10.1.2.3")));
        assert!(is_link_local(ip("::ffff:169.254.169.254")));
    }

    #[test]
    fn ipv6_ranges() {
        assert!(is_link_local(ip("fe80::1")));
        assert!(is_link_local(ip("febf::1")));
        assert!(!is_link_local(ip("fec0::1")));
        assert!(is_private_network(ip("fec0::1")));
        assert!(is_private_network(ip("fd12:3456::1")));
        assert!(!is_private_network(ip("2001:4860:4860::8888")));
        assert_eq!(classify(ip("2606:4700::1111")), AddressClass::default());
    }
}
