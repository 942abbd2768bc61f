//! Caller identification from proxy headers.

use std::net::SocketAddr;

use axum::http::HeaderMap;

/// Identifier used when no header carries the caller's address.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Header set by the hosting provider's edge network.
pub const PROVIDER_FORWARDED_FOR: &str = "x-vercel-forwarded-for";

/// Extract the caller's address from standard proxy headers.
///
/// Order of precedence:
/// 1. X-Forwarded-For header (first IP in list)
/// 2. X-Real-IP header
/// 3. Hosting provider forwarded-for header
/// 4. The literal `"unknown"`
pub fn client_identifier(headers: &HeaderMap) -> String {
    // Take the first IP (client IP, before any proxies)
    if let Some(first_ip) = header_str(headers, "x-forwarded-for")
        .and_then(|forwarded| forwarded.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
    {
        return first_ip.to_string();
    }

    for name in ["x-real-ip", PROVIDER_FORWARDED_FOR] {
        if let Some(value) = header_str(headers, name)
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
        {
            return value.to_string();
        }
    }

    UNKNOWN_CLIENT.to_string()
}

/// Like [`client_identifier`], falling back to the socket peer address
/// when no proxy header is present.
pub fn client_identifier_or_peer(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let identifier = client_identifier(headers);
    match peer {
        Some(addr) if identifier == UNKNOWN_CLIENT => addr.ip().to_string(),
        _ => identifier,
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|h| h.to_str().ok())
}
