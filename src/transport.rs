//! The HTTP transport used to reach Steam.
//!
//! Every operation builds an [`HttpRequest`] and hands it to a [`Transport`]. The default
//! [`HttpTransport`] sends it with `reqwest` using the session's cookie jar. Timeouts, proxies and
//! any retry policy are properties of the client given to the transport.

use std::fmt;
use std::sync::Arc;
use bytes::Bytes;
use futures::future::BoxFuture;
use reqwest::cookie::Jar;
use reqwest::header::{self, REFERER};
use reqwest::{Method, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use url::Url;

/// Default user agent for requests.
pub const USER_AGENT_STRING: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.71 Safari/537.36";

/// A request to send.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// The request method.
    pub method: Method,
    /// The URL including the query string.
    pub url: Url,
    /// Value of the `Referer` header. Steam validates this on offer pages.
    pub referer: Option<String>,
    /// Urlencoded form body.
    pub form: Option<Vec<(String, String)>>,
}

impl HttpRequest {
    /// A GET request.
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            referer: None,
            form: None,
        }
    }

    /// A POST request with a form body.
    pub fn post(url: Url, form: Vec<(String, String)>) -> Self {
        Self {
            method: Method::POST,
            url,
            referer: None,
            form: Some(form),
        }
    }

    /// Sets the referer.
    pub fn referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// Gets the value of a form field.
    pub fn form_value(&self, name: &str) -> Option<&str> {
        self.form
            .as_ref()?
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Gets the value of a query parameter.
    pub fn query_value(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// A received response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The status code.
    pub status: StatusCode,
    /// The response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends requests. Implement this to route requests through something other than `reqwest`.
pub trait Transport: fmt::Debug + Send + Sync {
    /// Sends the request and reads the full response body.
    fn execute(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'_, Result<HttpResponse, reqwest_middleware::Error>>;
}

/// A [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: ClientWithMiddleware,
}

impl HttpTransport {
    /// Creates a transport from an existing client.
    pub fn new(client: ClientWithMiddleware) -> Self {
        Self {
            client,
        }
    }
}

impl Transport for HttpTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'_, Result<HttpResponse, reqwest_middleware::Error>> {
        Box::pin(async move {
            let mut builder = self.client.request(request.method, request.url);

            if let Some(referer) = request.referer {
                builder = builder.header(REFERER, referer);
            }

            if let Some(form) = &request.form {
                builder = builder.form(form);
            }

            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?;

            Ok(HttpResponse {
                status,
                body,
            })
        })
    }
}

/// Builds a client using the given cookie jar and user agent.
pub fn get_default_client(
    cookies: Arc<Jar>,
    user_agent: &'static str,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut headers = header::HeaderMap::new();

    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(user_agent));

    let client = reqwest::ClientBuilder::new()
        .cookie_provider(cookies)
        .default_headers(headers)
        .build()?;

    Ok(ClientBuilder::new(client).build())
}

#[cfg(test)]
pub(crate) mod mock {
    //! An in-memory transport replaying canned responses.

    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// A canned outcome for one request.
    #[derive(Debug)]
    pub enum Reply {
        Response(HttpResponse),
        TransportError(&'static str),
    }

    #[derive(Debug, Default)]
    pub struct MockTransport {
        replies: Mutex<VecDeque<Reply>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues a response with the given status and body.
        pub fn respond(&self, status: u16, body: &str) -> &Self {
            let status = StatusCode::from_u16(status).unwrap();

            self.replies.lock().unwrap()
                .push_back(Reply::Response(HttpResponse::new(status, body.to_string())));
            self
        }

        /// Queues a 200 response with the given body.
        pub fn ok(&self, body: &str) -> &Self {
            self.respond(200, body)
        }

        /// Queues a transport failure.
        pub fn fail(&self, message: &'static str) -> &Self {
            self.replies.lock().unwrap().push_back(Reply::TransportError(message));
            self
        }

        /// The requests received so far.
        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for MockTransport {
        fn execute(
            &self,
            request: HttpRequest,
        ) -> BoxFuture<'_, Result<HttpResponse, reqwest_middleware::Error>> {
            self.requests.lock().unwrap().push(request);

            let reply = self.replies.lock().unwrap().pop_front()
                .expect("no reply queued for request");

            Box::pin(async move {
                match reply {
                    Reply::Response(response) => Ok(response),
                    Reply::TransportError(message) => {
                        Err(reqwest_middleware::Error::Middleware(anyhow::anyhow!(message)))
                    },
                }
            })
        }
    }
}
