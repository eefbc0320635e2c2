//! HTTP transport types and the transport invoker.
//!
//! # Design
//! Requests and responses are plain data. The gateway builds `HttpRequest`
//! values and parses `HttpResponse` values; the only code that touches the
//! network is a [`Transport`] implementation. [`UreqTransport`] is the
//! default and performs one blocking round trip per call. Hosts that already
//! own an HTTP stack can implement [`Transport`] themselves, or skip it and
//! use the gateway's `build_*` / `parse_*` methods directly.
//!
//! Every request is a `POST` with a JSON body, so there is no method field.

use std::time::Duration;

use crate::error::TransportFault;

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Performs a single HTTP round trip.
///
/// Implementations must not retry. A response with any status code is a
/// successful round trip; only failures to obtain a response are faults.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportFault>;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, TransportFault>,
{
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportFault> {
        self(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
///
/// Status-code-as-error is disabled so 4xx/5xx responses come back as data
/// and the response interpreter decides what they mean.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportFault> {
        let mut builder = self.agent.post(request.url.as_str());
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let mut response = builder.send(request.body.as_bytes())?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(key, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (key.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string()?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            url: "http://localhost:3000/api/create".to_string(),
            headers: vec![("X-RISKIFIED-SHOP-DOMAIN".to_string(), "shop.example.com".to_string())],
            body: "{}".to_string(),
        };
        assert_eq!(req.header("x-riskified-shop-domain"), Some("shop.example.com"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn success_range_is_2xx() {
        let mut response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(response.is_success());
        response.status = 204;
        assert!(response.is_success());
        response.status = 302;
        assert!(!response.is_success());
        response.status = 500;
        assert!(!response.is_success());
    }

    #[test]
    fn closures_are_transports() {
        let transport = |req: &HttpRequest| -> Result<HttpResponse, TransportFault> {
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: req.body.clone(),
            })
        };
        let req = HttpRequest {
            url: "http://localhost:3000/api/create".to_string(),
            headers: Vec::new(),
            body: r#"{"id":1}"#.to_string(),
        };
        let response = transport.send(&req).unwrap();
        assert_eq!(response.body, r#"{"id":1}"#);
    }

    #[test]
    fn refused_connection_is_a_fault() {
        // Bind then drop to get a port nothing is listening on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let req = HttpRequest {
            url: format!("http://127.0.0.1:{port}/api/create"),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: "{}".to_string(),
        };
        let result = UreqTransport::new(Some(Duration::from_secs(5))).send(&req);
        assert!(matches!(result, Err(TransportFault::Http(_))));
    }
}
