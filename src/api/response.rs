use crate::enums::{ConfirmationMethod, TradeOfferState};
use crate::identity::account_id_to_community_id;
use crate::response::{Asset, Description, TradeOffer, TradeOffers};
use crate::serialize::{self, string, option_string};
use crate::types::{AccountId, ServerTime, TradeId, TradeOfferId};
use chrono::serde::ts_seconds;
use serde::Deserialize;

/// The `response` object every `IEconService` method wraps its result in.
#[derive(Deserialize, Debug)]
pub(crate) struct ApiResponse<T> {
    pub response: T,
}

#[derive(Deserialize, Debug)]
pub(crate) struct RawTradeOffer {
    #[serde(with = "string")]
    pub tradeofferid: TradeOfferId,
    #[serde(default, with = "option_string")]
    pub tradeid: Option<TradeId>,
    pub accountid_other: AccountId,
    #[serde(default, deserialize_with = "serialize::empty_string_is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub items_to_give: Vec<Asset>,
    #[serde(default)]
    pub items_to_receive: Vec<Asset>,
    #[serde(default)]
    pub is_our_offer: bool,
    #[serde(default)]
    pub from_real_time_trade: bool,
    #[serde(with = "ts_seconds")]
    pub expiration_time: ServerTime,
    #[serde(with = "ts_seconds")]
    pub time_created: ServerTime,
    #[serde(with = "ts_seconds")]
    pub time_updated: ServerTime,
    pub trade_offer_state: TradeOfferState,
    #[serde(default, deserialize_with = "serialize::ts_seconds_option_none_when_zero")]
    pub escrow_end_date: Option<ServerTime>,
    #[serde(default)]
    pub confirmation_method: ConfirmationMethod,
}

impl From<RawTradeOffer> for TradeOffer {
    fn from(offer: RawTradeOffer) -> Self {
        Self {
            tradeofferid: offer.tradeofferid,
            tradeid: offer.tradeid,
            accountid_other: offer.accountid_other,
            steamid_other: account_id_to_community_id(offer.accountid_other),
            message: offer.message,
            items_to_give: offer.items_to_give,
            items_to_receive: offer.items_to_receive,
            is_our_offer: offer.is_our_offer,
            from_real_time_trade: offer.from_real_time_trade,
            expiration_time: offer.expiration_time,
            time_created: offer.time_created,
            time_updated: offer.time_updated,
            trade_offer_state: offer.trade_offer_state,
            escrow_end_date: offer.escrow_end_date,
            confirmation_method: offer.confirmation_method,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct GetTradeOffersBody {
    pub trade_offers_sent: Vec<RawTradeOffer>,
    pub trade_offers_received: Vec<RawTradeOffer>,
    pub descriptions: Vec<Description>,
    pub next_cursor: Option<u32>,
}

impl From<GetTradeOffersBody> for TradeOffers {
    fn from(body: GetTradeOffersBody) -> Self {
        Self {
            trade_offers_sent: body.trade_offers_sent.into_iter().map(TradeOffer::from).collect(),
            trade_offers_received: body.trade_offers_received.into_iter().map(TradeOffer::from).collect(),
            descriptions: body.descriptions,
            // 0 means there are no more offers
            next_cursor: body.next_cursor.filter(|cursor| *cursor != 0),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct GetTradeOfferBody {
    pub offer: Option<RawTradeOffer>,
}
