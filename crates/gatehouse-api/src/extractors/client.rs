//! Client metadata recorded alongside new sessions.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;

use gatehouse_entity::session::ClientMetadata;

/// User agent and address of the caller. Never rejects.
#[derive(Debug, Clone)]
pub struct ClientInfo(pub ClientMetadata);

impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        Ok(ClientInfo(client_metadata(&parts.headers, peer)))
    }
}

/// Build metadata from request headers, falling back to the socket peer.
///
/// The first `X-Forwarded-For` hop wins over the peer address.
pub fn client_metadata(headers: &HeaderMap, peer: Option<String>) -> ClientMetadata {
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from);

    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from);

    ClientMetadata {
        user_agent,
        ip_address: forwarded.or(peer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_forwarded_first_hop_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("curl/8.0"));

        let meta = client_metadata(&headers, Some("127.0.0.1".to_string()));
        assert_eq!(meta.ip_address.as_deref(), Some("203.0.113.7"));
        assert_eq!(meta.user_agent.as_deref(), Some("curl/8.0"));
    }

    #[test]
    fn test_peer_fallback() {
        let meta = client_metadata(&HeaderMap::new(), Some("127.0.0.1".to_string()));
        assert_eq!(meta.ip_address.as_deref(), Some("127.0.0.1"));
        assert_eq!(meta.user_agent, None);
    }
}
