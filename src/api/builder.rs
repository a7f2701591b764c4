use super::{SteamTradeOfferAPI, DEFAULT_MAX_INVENTORY_PAGES};
use crate::diagnostics::{DiagnosticHook, LogHook};
use crate::error::{Error, ParameterError};
use crate::session::Session;
use crate::transport::{HttpTransport, Transport, USER_AGENT_STRING, get_default_client};
use std::sync::Arc;
use reqwest::cookie::Jar;
use reqwest_middleware::ClientWithMiddleware;
use url::Url;

/// Builder for constructing a [`SteamTradeOfferAPI`].
///
/// An API key is required for the `IEconService` methods (getting, declining and canceling
/// offers). Accepting and sending offers, and loading inventories and receipts, only need the
/// session cookies.
#[derive(Debug, Clone)]
pub struct SteamTradeOfferAPIBuilder {
    /// Your account's API key from <https://steamcommunity.com/dev/apikey>.
    pub(crate) api_key: Option<String>,
    /// The session ID. Read from the `sessionid` cookie when not given.
    pub(crate) sessionid: Option<String>,
    /// Request cookies.
    pub(crate) cookies: Vec<String>,
    /// The language for descriptions and API responses.
    pub(crate) language: Option<String>,
    /// User agent for requests.
    pub(crate) user_agent: &'static str,
    /// The most pages loaded for a single inventory. Defaults to 100.
    pub(crate) max_inventory_pages: u32,
    /// Client to use for requests along with its cookie jar.
    pub(crate) client: Option<(ClientWithMiddleware, Arc<Jar>)>,
    /// Transport to use for requests. Takes precedence over `client`.
    pub(crate) transport: Option<Arc<dyn Transport>>,
    /// Receives diagnostic events.
    pub(crate) diagnostic_hook: Option<Arc<dyn DiagnosticHook>>,
}

impl Default for SteamTradeOfferAPIBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            sessionid: None,
            cookies: Vec::new(),
            language: None,
            user_agent: USER_AGENT_STRING,
            max_inventory_pages: DEFAULT_MAX_INVENTORY_PAGES,
            client: None,
            transport: None,
            diagnostic_hook: None,
        }
    }
}

impl SteamTradeOfferAPIBuilder {
    /// Creates a new [`SteamTradeOfferAPIBuilder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// The session ID posted with web forms.
    pub fn sessionid(mut self, sessionid: impl Into<String>) -> Self {
        self.sessionid = Some(sessionid.into());
        self
    }

    /// Cookies for `steamcommunity.com`, e.g. `steamLoginSecure=...` and `sessionid=...`.
    pub fn cookies(mut self, cookies: Vec<String>) -> Self {
        self.cookies = cookies;
        self
    }

    /// The language for descriptions and API responses, e.g. `"english"`.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// The user agent for requests made with the default client.
    pub fn user_agent(mut self, user_agent: &'static str) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// The most pages loaded for a single inventory. Defaults to 100. Must be at least 1.
    pub fn max_inventory_pages(mut self, max_inventory_pages: u32) -> Self {
        self.max_inventory_pages = max_inventory_pages;
        self
    }

    /// Client to use for requests. The cookies given with [`Self::cookies`] are added to `cookies`
    /// so it must be the jar the client uses.
    pub fn client(mut self, client: ClientWithMiddleware, cookies: Arc<Jar>) -> Self {
        self.client = Some((client, cookies));
        self
    }

    /// Transport to send requests through. Cookies are not added to a custom transport, though
    /// the session ID is still read from them.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Receives diagnostic events. Defaults to [`LogHook`].
    pub fn diagnostic_hook(mut self, hook: Arc<dyn DiagnosticHook>) -> Self {
        self.diagnostic_hook = Some(hook);
        self
    }

    /// Builds the [`SteamTradeOfferAPI`].
    pub fn build(self) -> Result<SteamTradeOfferAPI, Error> {
        if self.max_inventory_pages == 0 {
            return Err(ParameterError::NoInventoryPages.into());
        }

        let sessionid = self.sessionid
            .or_else(|| Session::sessionid_from_cookies(&self.cookies))
            .filter(|sessionid| !sessionid.is_empty());
        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let (client, jar) = match self.client {
                    Some((client, jar)) => (client, jar),
                    None => {
                        let jar = Arc::new(Jar::default());

                        (get_default_client(Arc::clone(&jar), self.user_agent)?, jar)
                    },
                };
                let url = format!("https://{}", SteamTradeOfferAPI::HOSTNAME)
                    .parse::<Url>()
                    .map_err(ParameterError::from)?;

                for cookie in &self.cookies {
                    jar.add_cookie_str(cookie, &url);
                }

                Arc::new(HttpTransport::new(client))
            },
        };
        let session = Session {
            api_key: self.api_key,
            sessionid,
            language: self.language,
        };

        Ok(SteamTradeOfferAPI {
            transport,
            session: Arc::new(session),
            diagnostic_hook: self.diagnostic_hook.unwrap_or_else(|| Arc::new(LogHook)),
            max_inventory_pages: self.max_inventory_pages,
        })
    }
}
