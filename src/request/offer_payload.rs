//! The body Steam expects when creating or countering an offer.

use super::{NewTradeOffer, NewTradeOfferItem};
use crate::api::SteamTradeOfferAPI;
use crate::error::{Error, ParameterError};
use crate::identity::Identity;
use crate::types::{CommunityId, TradeOfferId};
use serde::Serialize;
use url::Url;

/// The items one side of an offer puts in.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OfferParty {
    /// Items in the offer.
    pub assets: Vec<NewTradeOfferItem>,
    /// Always empty. Currencies are not sent through offers.
    pub currency: Vec<NewTradeOfferItem>,
    /// Always `false` when creating an offer.
    pub ready: bool,
}

impl OfferParty {
    fn new(assets: &[NewTradeOfferItem]) -> Self {
        Self {
            assets: assets.to_vec(),
            currency: Vec::new(),
            ready: false,
        }
    }
}

/// The `json_tradeoffer` document.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OfferPayload {
    pub newversion: bool,
    pub version: u32,
    /// Items we give.
    pub me: OfferParty,
    /// Items we receive.
    pub them: OfferParty,
}

/// Builds the offer document from the items on each side.
pub fn build_offer(
    items_from_me: &[NewTradeOfferItem],
    items_from_them: &[NewTradeOfferItem],
) -> OfferPayload {
    OfferPayload {
        newversion: true,
        version: 2,
        me: OfferParty::new(items_from_me),
        them: OfferParty::new(items_from_them),
    }
}

/// The form fields posted to `tradeoffer/new/send`.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferForm {
    pub sessionid: String,
    pub serverid: u32,
    /// The partner's community ID.
    pub partner: CommunityId,
    /// The message, or an empty string.
    pub tradeoffermessage: String,
    /// The serialized [`OfferPayload`].
    pub json_tradeoffer: String,
    /// Present when an access token is used.
    pub trade_offer_create_params: Option<String>,
    /// Present when countering an offer.
    pub tradeofferid_countered: Option<TradeOfferId>,
}

impl OfferForm {
    /// The fields in the order they are posted.
    pub fn into_pairs(self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("sessionid".to_string(), self.sessionid),
            ("serverid".to_string(), self.serverid.to_string()),
            ("partner".to_string(), self.partner.to_string()),
            ("tradeoffermessage".to_string(), self.tradeoffermessage),
            ("json_tradeoffer".to_string(), self.json_tradeoffer),
        ];

        if let Some(params) = self.trade_offer_create_params {
            pairs.push(("trade_offer_create_params".to_string(), params));
        }

        if let Some(tradeofferid) = self.tradeofferid_countered {
            pairs.push(("tradeofferid_countered".to_string(), tradeofferid.to_string()));
        }

        pairs
    }
}

#[derive(Serialize)]
struct CreateParams<'a> {
    trade_offer_access_token: &'a str,
}

/// Builds the form fields for an offer.
pub fn build_form_fields(
    offer: &OfferPayload,
    sessionid: &str,
    partner: &Identity,
    message: Option<&str>,
    counter_tradeofferid: Option<TradeOfferId>,
    access_token: Option<&str>,
) -> Result<OfferForm, Error> {
    let trade_offer_create_params = access_token
        .map(|trade_offer_access_token| serde_json::to_string(&CreateParams {
            trade_offer_access_token,
        }))
        .transpose()?;

    Ok(OfferForm {
        sessionid: sessionid.to_string(),
        serverid: 1,
        partner: partner.community_id(),
        tradeoffermessage: message.unwrap_or_default().to_string(),
        json_tradeoffer: serde_json::to_string(offer)?,
        trade_offer_create_params,
        tradeofferid_countered: counter_tradeofferid,
    })
}

/// The page Steam expects the request to come from. A counter offer comes from the offer being
/// countered, otherwise from the new offer page for the partner.
pub fn offer_referer(
    partner: &Identity,
    counter_tradeofferid: Option<TradeOfferId>,
    access_token: Option<&str>,
) -> Result<String, ParameterError> {
    if let Some(tradeofferid) = counter_tradeofferid {
        return Ok(format!("https://{}/tradeoffer/{tradeofferid}/", SteamTradeOfferAPI::HOSTNAME));
    }

    let base = format!("https://{}/tradeoffer/new/", SteamTradeOfferAPI::HOSTNAME);
    let mut params = vec![("partner", partner.account_id().to_string())];

    if let Some(token) = access_token {
        params.push(("token", token.to_string()));
    }

    Ok(Url::parse_with_params(&base, &params)?.into())
}

/// Everything needed to post an offer.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferSubmission {
    pub form: OfferForm,
    pub referer: String,
}

/// Validates an offer and builds its form and referer.
pub fn build_submission(
    offer: &NewTradeOffer,
    sessionid: &str,
) -> Result<OfferSubmission, Error> {
    if offer.is_empty() {
        return Err(ParameterError::EmptyOffer.into());
    }

    let partner = offer.partner.resolve()?;
    let token = offer.token.as_deref();
    let payload = build_offer(&offer.items_to_give, &offer.items_to_receive);
    let form = build_form_fields(
        &payload,
        sessionid,
        &partner,
        offer.message.as_deref(),
        offer.counter_tradeofferid,
        token,
    )?;
    let referer = offer_referer(&partner, offer.counter_tradeofferid, token)?;

    Ok(OfferSubmission {
        form,
        referer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::PartnerIdentity;
    use serde_json::json;

    fn item(assetid: u64) -> NewTradeOfferItem {
        NewTradeOfferItem {
            appid: 440,
            contextid: 2,
            assetid,
            amount: 1,
        }
    }

    #[test]
    fn offer_document_matches_expected_shape() {
        let payload = build_offer(&[item(1)], &[]);
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value, json!({
            "newversion": true,
            "version": 2,
            "me": {
                "assets": [{"appid": 440, "contextid": "2", "assetid": "1", "amount": 1}],
                "currency": [],
                "ready": false
            },
            "them": {
                "assets": [],
                "currency": [],
                "ready": false
            }
        }));
    }

    #[test]
    fn form_fields_for_new_offer() {
        let partner = Identity::from_account_id(12345);
        let payload = build_offer(&[item(1)], &[item(2)]);
        let form = build_form_fields(&payload, "abc", &partner, None, None, None).unwrap();

        assert_eq!(form.serverid, 1);
        assert_eq!(form.partner, 76561197960278073);
        assert_eq!(form.tradeoffermessage, "");
        assert_eq!(form.trade_offer_create_params, None);
        assert_eq!(form.tradeofferid_countered, None);

        let pairs = form.into_pairs();
        let keys = pairs.iter().map(|(key, _)| key.as_str()).collect::<Vec<_>>();

        assert_eq!(keys, ["sessionid", "serverid", "partner", "tradeoffermessage", "json_tradeoffer"]);
    }

    #[test]
    fn form_fields_with_token_and_counter() {
        let partner = Identity::from_account_id(12345);
        let payload = build_offer(&[], &[item(2)]);
        let form = build_form_fields(&payload, "abc", &partner, Some("hello"), Some(99), Some("tok")).unwrap();

        assert_eq!(form.tradeoffermessage, "hello");
        assert_eq!(form.trade_offer_create_params.as_deref(), Some(r#"{"trade_offer_access_token":"tok"}"#));
        assert_eq!(form.tradeofferid_countered, Some(99));
    }

    #[test]
    fn referer_for_new_offer() {
        let partner = Identity::from_account_id(12345);

        assert_eq!(
            offer_referer(&partner, None, None).unwrap(),
            "https://steamcommunity.com/tradeoffer/new/?partner=12345",
        );
        assert_eq!(
            offer_referer(&partner, None, Some("abc")).unwrap(),
            "https://steamcommunity.com/tradeoffer/new/?partner=12345&token=abc",
        );
    }

    #[test]
    fn referer_for_counter_offer() {
        let partner = Identity::from_account_id(12345);

        assert_eq!(
            offer_referer(&partner, Some(4321), Some("abc")).unwrap(),
            "https://steamcommunity.com/tradeoffer/4321/",
        );
    }

    #[test]
    fn empty_offer_is_rejected() {
        let offer = NewTradeOffer::builder(PartnerIdentity::account_id(12345)).build();
        let error = build_submission(&offer, "abc").unwrap_err();

        assert!(matches!(error, Error::Parameter(ParameterError::EmptyOffer)));
    }

    #[test]
    fn offer_without_partner_is_rejected() {
        let offer = NewTradeOffer::builder(PartnerIdentity::default())
            .items_to_give([item(1)])
            .build();
        let error = build_submission(&offer, "abc").unwrap_err();

        assert!(matches!(error, Error::Identity(_)));
    }
}
