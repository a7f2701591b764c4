use serde::{Serialize, Deserialize};
use crate::{types::TradeId, serialize::option_string};

/// The result of accepting a trade offer.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AcceptedOffer {
    /// The ID of the trade. Present when the exchange happened without further confirmation.
    #[serde(default, with = "option_string")]
    pub tradeid: Option<TradeId>,
    /// Whether the acceptance needs mobile confirmation.
    #[serde(default)]
    pub needs_mobile_confirmation: bool,
    /// Whether the acceptance needs email confirmation.
    #[serde(default)]
    pub needs_email_confirmation: bool,
    /// The email domain if email confirmation is needed.
    pub email_domain: Option<String>,
}
