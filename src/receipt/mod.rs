//! Items received in a completed trade, read from the trade's receipt page.

mod parser;

use crate::error::Error;
use crate::serialize::{self, string};
use crate::types::{AppId, ContextId, AssetId, ClassId, InstanceId, Amount};
use lazy_regex::regex_captures;
use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

/// An item registered on a trade receipt.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReceiptItem {
    /// The app ID e.g. 440 for Team Fortress 2.
    #[serde(deserialize_with = "serialize::string_or_number")]
    pub appid: AppId,
    /// The context ID.
    #[serde(deserialize_with = "serialize::string_or_number", serialize_with = "string::serialize")]
    pub contextid: ContextId,
    /// The asset ID of the item after the trade.
    #[serde(rename = "id", deserialize_with = "serialize::string_or_number", serialize_with = "string::serialize")]
    pub assetid: AssetId,
    /// The ID of the description.
    #[serde(deserialize_with = "serialize::string_or_number", serialize_with = "string::serialize")]
    pub classid: ClassId,
    /// The instance ID of the description.
    #[serde(default, deserialize_with = "serialize::string_or_number_or_zero", serialize_with = "string::serialize")]
    pub instanceid: InstanceId,
    /// The amount.
    #[serde(deserialize_with = "serialize::string_or_number")]
    pub amount: Amount,
    /// Every other attribute the page gave the item, e.g. its name and tags.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Reads the items from a trade receipt page.
pub fn parse_receipt_page(html: &str) -> Result<Vec<ReceiptItem>, Error> {
    if let Some((_, message)) = regex_captures!(r#"<div id="error_msg">\s*([^<]+)\s*</div>"#, html) {
        return Err(Error::Application(message.trim().into()));
    }

    let Some((_, script)) = regex_captures!(r#"(var oItem;[\s\S]*?)</script>"#, html) else {
        return Err(Error::Session("No session".into()));
    };

    parser::evaluate_receipt_script(script)?
        .into_iter()
        .map(|item| {
            ReceiptItem::deserialize(item)
                .map_err(|error| Error::InvalidResponse(format!("Invalid receipt item: {error}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_receipt_page() {
        let items = parse_receipt_page(include_str!("fixtures/receipt.html")).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].assetid, 11292488054);
        assert_eq!(items[1].assetid, 11292488061);

        let key = &items[0];

        assert_eq!(key.appid, 440);
        assert_eq!(key.contextid, 2);
        assert_eq!(key.classid, 101785959);
        assert_eq!(key.instanceid, 11040578);
        assert_eq!(key.amount, 1);
        assert_eq!(key.attributes["name"], "Mann Co. Supply Crate Key");
        assert_eq!(key.attributes["is_stackable"], false);
    }

    #[test]
    fn page_without_script_is_a_session_error() {
        let error = parse_receipt_page("<html><body><h1>Sign In</h1></body></html>").unwrap_err();

        assert!(matches!(error, Error::Session(_)));
    }

    #[test]
    fn error_message_is_reported() {
        let html = r#"<div id="error_msg">
            The trade you are looking for does not exist.
        </div>"#;
        let error = parse_receipt_page(html).unwrap_err();

        assert!(matches!(error, Error::Application(message) if message == "The trade you are looking for does not exist."));
    }

    #[test]
    fn malformed_script_is_an_html_error() {
        let html = "<script>var oItem; oItem = {\"id\":\"1\"}; eval('x');</script>";
        let error = parse_receipt_page(html).unwrap_err();

        assert!(matches!(error, Error::Html(_)));
    }

    #[test]
    fn item_missing_fields_is_invalid() {
        let html = "<script>var oItem; oItem = {\"id\":\"1\"}; BuildHover('item0', oItem);</script>";
        let error = parse_receipt_page(html).unwrap_err();

        assert!(matches!(error, Error::InvalidResponse(_)));
    }
}
