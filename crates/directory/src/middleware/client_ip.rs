//! Client IP extraction for the access logs.
//!
//! Behind the office reverse proxy the peer address is the proxy itself, so
//! `X-Forwarded-For` is honoured when `DIRECTORY_TRUST_FORWARDED_FOR` is set.
//! Otherwise the socket peer is used.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};

use crate::state::AppState;

/// Header set by reverse proxies.
const FORWARDED_FOR: &str = "x-forwarded-for";

/// Recorded when no address is available (e.g. in-process tests).
pub const UNKNOWN_IP: &str = "unknown";

/// The requesting client's IP address, as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl FromRequestParts<AppState> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve(parts, state.config().trust_forwarded_for)))
    }
}

fn resolve(parts: &Parts, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for && let Some(ip) = first_forwarded(&parts.headers) {
        return ip;
    }

    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| UNKNOWN_IP.to_string(), |ConnectInfo(addr)| addr.ip().to_string())
}

/// Left-most `X-Forwarded-For` entry: the original client.
fn first_forwarded(headers: &HeaderMap) -> Option<String> {
    headers
        .get(FORWARDED_FOR)?
        .to_str()
        .ok()?
        .split(',')
        .map(str::trim)
        .find(|ip| !ip.is_empty())
        .map(String::from)
}
