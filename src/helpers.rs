use crate::error::Error;
use crate::transport::HttpResponse;
use lazy_regex::{regex_captures, regex_is_match};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Fields Steam uses to report failures inside otherwise successful responses.
#[derive(Deserialize, Debug, Default)]
struct FailureFields {
    #[serde(default, rename = "strError")]
    str_error: Option<String>,
    #[serde(default)]
    success: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

impl FailureFields {
    fn message(self) -> Option<String> {
        if let Some(message) = self.str_error {
            return Some(message);
        }

        let unsuccessful = match self.success {
            Some(Value::Bool(success)) => !success,
            Some(Value::Number(n)) => n.as_u64() != Some(1),
            _ => false,
        };

        if !unsuccessful {
            return None;
        }

        Some(match self.error {
            Some(Value::String(message)) => message,
            Some(Value::Null) | None => String::from("Unsuccessful response"),
            Some(other) => other.to_string(),
        })
    }
}

/// Gets the failure message embedded in a JSON body, if any.
pub(crate) fn application_error(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<FailureFields>(body)
        .ok()
        .and_then(FailureFields::message)
}

/// Checks the status of a response, then any failure reported in its body, and deserializes its
/// JSON body.
pub(crate) fn parses_response<D>(response: &HttpResponse) -> Result<D, Error>
where
    D: DeserializeOwned,
{
    if !response.status.is_success() {
        return Err(Error::Http(response.status));
    }

    if let Some(message) = application_error(&response.body) {
        return Err(Error::Application(message));
    }

    deserialize_body(response)
}

/// Like [`parses_response`] but for the web forms used to accept and send offers. These respond
/// with an error status along with a `strError` describing the problem, so the body is checked
/// first.
pub(crate) fn parses_form_response<D>(response: &HttpResponse) -> Result<D, Error>
where
    D: DeserializeOwned,
{
    if let Some(message) = application_error(&response.body) {
        return Err(Error::Application(message));
    }

    if !response.status.is_success() {
        return Err(Error::Http(response.status));
    }

    deserialize_body(response)
}

fn deserialize_body<D>(response: &HttpResponse) -> Result<D, Error>
where
    D: DeserializeOwned,
{
    match serde_json::from_slice::<D>(&response.body) {
        Ok(body) => Ok(body),
        Err(parse_error) => {
            // unexpected response
            let html = String::from_utf8_lossy(&response.body);

            if regex_is_match!(r#"<h1>Sorry!</h1>"#, &html) {
                if let Some((_, message)) = regex_captures!("<h3>(.+)</h3>", &html) {
                    Err(Error::Application(message.into()))
                } else {
                    Err(Error::Application("Unexpected error".into()))
                }
            } else if regex_is_match!(r#"<h1>Sign In</h1>"#, &html) && regex_is_match!(r#"g_steamID = false;"#, &html) {
                Err(Error::Session("Not logged in".into()))
            } else {
                Err(Error::InvalidResponse(parse_error.to_string()))
            }
        },
    }
}

/// Checks the status of a response expected to contain HTML and returns the body.
pub(crate) fn check_html_response(response: &HttpResponse) -> Result<String, Error> {
    if !response.status.is_success() {
        return Err(Error::Http(response.status));
    }

    Ok(response.text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[derive(Deserialize, Debug)]
    struct Body {
        tradeofferid: String,
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse::new(StatusCode::from_u16(status).unwrap(), body.to_string())
    }

    #[test]
    fn parses_successful_response() {
        let body: Body = parses_response(&response(200, r#"{"tradeofferid":"1"}"#)).unwrap();

        assert_eq!(body.tradeofferid, "1");
    }

    #[test]
    fn reports_http_status() {
        let error = parses_response::<Body>(&response(503, "")).unwrap_err();

        assert!(matches!(error, Error::Http(status) if status.as_u16() == 503));
    }

    #[test]
    fn form_response_reports_str_error_before_status() {
        let error = parses_form_response::<Body>(&response(500, r#"{"strError":"There was an error sending your trade offer. (26)"}"#)).unwrap_err();

        assert!(matches!(error, Error::Application(message) if message == "There was an error sending your trade offer. (26)"));
    }

    #[test]
    fn status_is_checked_before_body() {
        let error = parses_response::<Body>(&response(403, r#"{"success":false,"error":"Access is denied"}"#)).unwrap_err();

        assert!(matches!(error, Error::Http(status) if status.as_u16() == 403));
    }

    #[test]
    fn form_response_parses_successful_body() {
        let body: Body = parses_form_response(&response(200, r#"{"tradeofferid":"2"}"#)).unwrap();

        assert_eq!(body.tradeofferid, "2");
    }

    #[test]
    fn reports_unsuccessful_body_with_error_message() {
        let error = parses_response::<Body>(&response(200, r#"{"success":false,"error":"This profile is private."}"#)).unwrap_err();

        assert!(matches!(error, Error::Application(message) if message == "This profile is private."));
    }

    #[test]
    fn reports_invalid_response() {
        let error = parses_response::<Body>(&response(200, r#"{"response":{}}"#)).unwrap_err();

        assert!(matches!(error, Error::InvalidResponse(_)));
    }

    #[test]
    fn reports_sign_in_page_as_session_error() {
        let html = "<html><h1>Sign In</h1><script>g_steamID = false;</script></html>";
        let error = parses_response::<Body>(&response(200, html)).unwrap_err();

        assert!(matches!(error, Error::Session(_)));
    }

    #[test]
    fn successful_flag_is_not_an_error() {
        assert_eq!(application_error(br#"{"success":1}"#), None);
        assert_eq!(application_error(br#"{"success":true,"rgInventory":[]}"#), None);
        assert_eq!(application_error(br#"{"success":0}"#), Some("Unsuccessful response".into()));
    }
}
