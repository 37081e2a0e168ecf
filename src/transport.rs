//! HTTP transport abstraction.
//!
//! A [`Bridge`](crate::Bridge) never talks to the network directly. Every
//! round trip goes through a [`Transport`], which makes the protocol logic
//! testable with canned replies. Any `Fn(&Request) -> Result<Response>`
//! closure is a transport, and [`HttpTransport`] is the production one.

use std::time::Duration;

use log::debug;
use strum_macros::Display;

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// HTTP methods used by the bridge API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
}

/// An outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    pub fn new(method: Method, url: &str) -> Self {
        Request {
            method,
            url: String::from(url),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Attach a JSON body and the matching content type.
    pub fn json(mut self, body: &serde_json::Value) -> Result<Self> {
        self.body = serde_json::to_vec(body).map_err(Error::JsonDump)?;
        self.headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        Ok(self)
    }
}

/// A fully read response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    /// A `200 OK` response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Response {
            status: 200,
            body: body.into(),
        }
    }
}

/// Performs one request/response round trip.
///
/// Implementations must be safe to share between threads; a single
/// transport is typically used by every bridge found during discovery.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &Request) -> Result<Response>;
}

impl<F> Transport for F
where
    F: Fn(&Request) -> Result<Response> + Send + Sync,
{
    fn execute(&self, request: &Request) -> Result<Response> {
        self(request)
    }
}

/// Blocking HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new() -> Result<Self> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    /// Every request fails with [`Error::Network`] once `timeout` elapses.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::network("build client", e))?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &Request) -> Result<Response> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let response = builder.send().map_err(|e| Error::network("send", e))?;
        let status = response.status().as_u16();
        // Consumes the response, so the connection is released on both paths.
        let body = response
            .bytes()
            .map_err(|e| Error::network("read body", e))?;

        debug!("{} {} -> {}", request.method, request.url, status);
        Ok(Response {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Replays canned bodies in order and remembers every request.
    #[derive(Default)]
    pub(crate) struct RecordingTransport {
        replies: Mutex<VecDeque<Result<Response>>>,
        requests: Mutex<Vec<Request>>,
    }

    impl RecordingTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn reply(self, body: &str) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Ok(Response::ok(body)));
            self
        }

        pub(crate) fn fail(self, action: &str, reason: &str) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Err(Error::network(action, reason.to_string())));
            self
        }

        pub(crate) fn requests(&self) -> Vec<Request> {
            self.requests.lock().unwrap().clone()
        }

        pub(crate) fn urls(&self) -> Vec<String> {
            self.requests().into_iter().map(|r| r.url).collect()
        }
    }

    impl Transport for RecordingTransport {
        fn execute(&self, request: &Request) -> Result<Response> {
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::network("send", "no canned reply left")))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(Method::Put.to_string(), "PUT");
    }

    #[test]
    fn test_json_request() {
        let request = Request::new(Method::Put, "http://10.0.0.2/api/abc/lights/1/state")
            .json(&json!({"on": true}))
            .unwrap();
        assert_eq!(request.body, br#"{"on":true}"#.to_vec());
        assert_eq!(
            request.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn test_closure_transport() {
        let transport = |request: &Request| -> Result<Response> {
            assert_eq!(request.method, Method::Get);
            Ok(Response::ok("[]"))
        };
        let response = transport
            .execute(&Request::new(Method::Get, "http://example.invalid"))
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"[]".to_vec());
    }

    #[test]
    fn test_http_timeout_is_network_error() {
        // Connections complete in the backlog but nothing ever answers.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/api/lights", listener.local_addr().unwrap());

        let transport = HttpTransport::with_timeout(Duration::from_millis(200)).unwrap();
        let err = transport
            .execute(&Request::new(Method::Get, &url))
            .unwrap_err();

        assert!(matches!(err, Error::Network { .. }));
        drop(listener);
    }
}
