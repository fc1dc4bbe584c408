use std::time::Duration;

use reqwest::Url;

use crate::error::ClientError;

/// User agent sent when the caller does not override it.
pub(super) const DEFAULT_USER_AGENT: &str =
    concat!("burstkit/", env!("CARGO_PKG_VERSION"));

/// The endpoint path every operation is issued against.
const API_PATH: &str = "burst";

/// One immutable transport/endpoint pair.
///
/// `update_connection` swaps the whole value atomically; operations snapshot
/// a reference once and use it for their entire round trip, so a concurrent
/// swap is never observed half-applied.
pub(super) struct Connection {
    pub(super) http: reqwest::Client,
    pub(super) endpoint: Url,
    pub(super) node_address: String,
    pub(super) user_agent: String,
}

pub(super) fn build_connection(
    node_address: &str,
    user_agent: Option<&str>,
) -> Result<Connection, ClientError> {
    let endpoint = parse_node_address(node_address)?;
    let user_agent = user_agent.unwrap_or(DEFAULT_USER_AGENT).to_owned();

    let http = reqwest::Client::builder()
        .user_agent(&user_agent)
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(32)
        .tcp_nodelay(true)
        .build()
        .expect("reqwest client builder uses valid static config");

    Ok(Connection {
        http,
        endpoint,
        node_address: node_address.to_owned(),
        user_agent,
    })
}

/// Validate the node base address and resolve the API endpoint under it.
pub(super) fn parse_node_address(node_address: &str) -> Result<Url, ClientError> {
    let parsed = Url::parse(node_address).map_err(|e| {
        ClientError::InvalidArgument(format!(
            "invalid node address `{node_address}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ClientError::InvalidArgument(format!(
                "unsupported node address scheme `{other}`; expected http or https"
            )))
        }
    }

    let base = format!("{}/{API_PATH}", node_address.trim_end_matches('/'));
    Url::parse(&base).map_err(|e| {
        ClientError::InvalidArgument(format!("invalid node address `{node_address}`: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_under_the_base_address() {
        let url = parse_node_address("http://127.0.0.1:8125").expect("should parse");
        assert_eq!(url.as_str(), "http://127.0.0.1:8125/burst");
    }

    #[test]
    fn trailing_slash_does_not_double_up() {
        let url = parse_node_address("http://wallet.example:8125/").expect("should parse");
        assert_eq!(url.as_str(), "http://wallet.example:8125/burst");
    }

    #[test]
    fn rejects_non_http_schemes() {
        let err = parse_node_address("ftp://example.com").expect_err("must reject ftp");
        assert!(err.to_string().contains("unsupported node address scheme"));
    }

    #[test]
    fn rejects_unparseable_addresses() {
        assert!(parse_node_address("not a url").is_err());
    }
}
