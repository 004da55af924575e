use std::net::Ipv4Addr;

/// Shortest and longest dotted-quad text, "0.0.0.0" and "255.255.255.255"
pub const IPV4_MIN_LEN: usize = 7;
pub const IPV4_MAX_LEN: usize = 15;

/// IP address utilities
pub struct IpUtils;

impl IpUtils {
    /// Checks that the input is a dotted-quad IPv4 address within the form's length bounds
    pub fn is_valid_ipv4(ip: &str) -> bool {
        (IPV4_MIN_LEN..=IPV4_MAX_LEN).contains(&ip.len()) && ip.parse::<Ipv4Addr>().is_ok()
    }
}
