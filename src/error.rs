//! Error types.

use crate::types::{AppId, ClassId, InstanceId};
use reqwest::StatusCode;
use std::fmt;

/// Any error that can occur when performing an operation.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be completed by the transport.
    #[error("Transport error: {}", .0)]
    Transport(#[from] reqwest_middleware::Error),
    /// The response had a non-success status code.
    #[error("Error {}", .0)]
    Http(StatusCode),
    /// The response carried an explicit failure from Steam, e.g. a `strError` field or
    /// `success: false` with an `error` message.
    #[error("{}", .0)]
    Application(String),
    /// The response was missing required fields or could not be decoded.
    #[error("Invalid response: {}", .0)]
    InvalidResponse(String),
    /// A page did not contain the data expected for the current session. This occurs when not
    /// logged in, when viewing a page belonging to another account, or when a link has expired.
    #[error("Session error: {}", .0)]
    Session(String),
    /// An identifier could not be converted.
    #[error("{}", .0)]
    Identity(#[from] IdentityError),
    /// A parameter supplied by the caller is invalid.
    #[error("Invalid parameter: {}", .0)]
    Parameter(#[from] ParameterError),
    /// A payload could not be serialized.
    #[error("Error serializing payload: {}", .0)]
    Parse(#[from] serde_json::Error),
    /// An embedded script could not be interpreted.
    #[error("Error parsing HTML document: {}", .0)]
    Html(#[from] ParseHtmlError),
    /// An item did not have a matching description.
    #[error("{}", .0)]
    MissingDescription(#[from] MissingDescriptionError),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Error {
        Error::Transport(reqwest_middleware::Error::Reqwest(error))
    }
}

/// An error converting between account IDs and community IDs.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum IdentityError {
    /// Neither an account ID nor a community ID was given.
    #[error("No account ID or community ID given")]
    Missing,
    /// The identifier is not a valid decimal number.
    #[error("Malformed identifier: {}", .0)]
    Malformed(String),
    /// The community ID does not belong to an individual account in the public universe.
    #[error("{} is not an individual account", .0)]
    NotIndividual(u64),
}

/// An error with a parameter supplied by the caller.
#[derive(thiserror::Error, Debug)]
pub enum ParameterError {
    /// The offer does not contain any items.
    #[error("Cannot send an empty offer")]
    EmptyOffer,
    /// At least one inventory page must be allowed.
    #[error("max_inventory_pages must be at least 1")]
    NoInventoryPages,
    /// A URL could not be built.
    #[error("{}", .0)]
    UrlParse(#[from] url::ParseError),
}

/// An error interpreting an embedded script or HTML page.
#[derive(thiserror::Error, Debug, PartialEq, Clone)]
pub enum ParseHtmlError {
    /// The document is not in the expected format.
    #[error("{}", .0)]
    Malformed(&'static str),
    /// A statement in an embedded script is not one of the recognized forms.
    #[error("Unexpected {} at offset {}", .found, .offset)]
    UnexpectedToken {
        /// What was found.
        found: String,
        /// Byte offset into the script.
        offset: usize,
    },
    /// A CSS selector could not be parsed.
    #[error("Invalid selector")]
    ParseSelector,
}

/// An item could not be matched to a description.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub struct MissingDescriptionError {
    /// The app ID of the item.
    pub appid: AppId,
    /// The class ID of the item.
    pub classid: ClassId,
    /// The instance ID of the item.
    pub instanceid: InstanceId,
}

impl fmt::Display for MissingDescriptionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Missing description for {}:{}_{}",
            self.appid, self.classid, self.instanceid
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_missing_description() {
        let error = Error::from(MissingDescriptionError {
            appid: 440,
            classid: 10,
            instanceid: 0,
        });

        assert_eq!(error.to_string(), "Missing description for 440:10_0");
    }

    #[test]
    fn application_error_message_is_unchanged() {
        let error = Error::Application("There was an error sending your trade offer.".into());

        assert_eq!(error.to_string(), "There was an error sending your trade offer.");
    }
}
