//! Utility functions and helpers

use std::net::IpAddr;

/// Parse an unsigned integer that may have been written as a string
pub fn parse_numeric(s: &str) -> Result<u64, String> {
    let trimmed = s.trim().replace('_', "");
    trimmed
        .parse::<u64>()
        .map_err(|e| format!("Failed to parse '{}' as an unsigned integer: {}", s, e))
}

/// Check whether a host refers to the local machine
pub fn is_loopback_host(host: &str) -> bool {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.parse::<IpAddr>()
        .map(|ip| ip.is_loopback())
        .unwrap_or(false)
}

/// Build an HTTP JSON-RPC endpoint URL for a host and port
pub fn format_endpoint(host: &str, port: u16) -> String {
    let needs_brackets = host.parse::<IpAddr>().map(|ip| ip.is_ipv6()).unwrap_or(false);
    if needs_brackets {
        format!("http://[{}]:{}", host, port)
    } else {
        format!("http://{}:{}", host, port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric("8545").unwrap(), 8545);
        assert_eq!(parse_numeric(" 6_700_000 ").unwrap(), 6_700_000);
        assert!(parse_numeric("-1").is_err());
        assert!(parse_numeric("lots").is_err());
    }

    #[test]
    fn test_is_loopback_host() {
        assert!(is_loopback_host("127.0.0.1"));
        assert!(is_loopback_host("localhost"));
        assert!(is_loopback_host("::1"));
        assert!(is_loopback_host("[::1]"));
        assert!(!is_loopback_host("10.0.0.8"));
        assert!(!is_loopback_host("rpc.example.org"));
    }

    #[test]
    fn test_format_endpoint() {
        assert_eq!(format_endpoint("127.0.0.1", 8545), "http://127.0.0.1:8545");
        assert_eq!(format_endpoint("::1", 8545), "http://[::1]:8545");
        assert_eq!(format_endpoint("ganache", 7545), "http://ganache:7545");
    }
}
