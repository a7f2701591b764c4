/// Session configuration applied once when building the client. Read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// The Steam Web API key, used for `IEconService` calls.
    pub api_key: Option<String>,
    /// The session ID from the `sessionid` cookie, posted with every web form.
    pub sessionid: Option<String>,
    /// Language passed to inventory and API requests, e.g. `"english"`.
    pub language: Option<String>,
}

impl Session {
    /// Extracts the session ID from a list of cookie strings.
    pub fn sessionid_from_cookies(cookies: &[String]) -> Option<String> {
        cookies
            .iter()
            .filter_map(|cookie| cookie.split(';').next())
            .filter_map(|pair| pair.split_once('='))
            .find(|(name, _)| name.trim() == "sessionid")
            .map(|(_, value)| value.trim().to_string())
    }
}
