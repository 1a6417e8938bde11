use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use tracing::warn;

use taskgate_core::AppError;

/// Keyed token bucket for one endpoint. Each route gets its own instance, so
/// clients are limited per IP and per endpoint.
#[derive(Clone)]
pub struct ClientRateLimiter {
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
}

impl ClientRateLimiter {
    pub fn new(quota: Quota) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
        }
    }

    /// Takes one token for `client`; false when the bucket is empty.
    pub fn check(&self, client: IpAddr) -> bool {
        self.limiter.check_key(&client).is_ok()
    }
}

fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let header_ip = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .and_then(|ip| ip.trim().parse::<IpAddr>().ok())
    };

    header_ip("x-forwarded-for").or_else(|| header_ip("x-real-ip"))
}

/// First `X-Forwarded-For` hop, then `X-Real-IP`, then the socket peer.
/// Requests with none of these share one bucket.
fn client_ip(req: &Request) -> IpAddr {
    forwarded_ip(req.headers())
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip())
        })
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

pub async fn limit_requests(
    State(limiter): State<ClientRateLimiter>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let client = client_ip(&req);

    if !limiter.check(client) {
        warn!(ip = %client, path = %req.uri().path(), "Rate limit exceeded");
        return Err(AppError::too_many_requests("too many requests"));
    }

    Ok(next.run(req).await)
}
