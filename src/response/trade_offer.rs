use super::{Asset, Description};
use crate::enums::{ConfirmationMethod, TradeOfferState};
use crate::identity::Identity;
use crate::types::{AccountId, CommunityId, ServerTime, TradeId, TradeOfferId};
use serde::Serialize;

/// A trade offer as returned by the Steam Web API.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TradeOffer {
    /// The ID for this offer.
    pub tradeofferid: TradeOfferId,
    /// The trade ID for this offer. This should be present when the `trade_offer_state` of this
    /// offer is [`TradeOfferState::Accepted`].
    pub tradeid: Option<TradeId>,
    /// The account ID of our partner.
    pub accountid_other: AccountId,
    /// The community ID of our partner, derived from `accountid_other`.
    pub steamid_other: CommunityId,
    /// The message included in the offer. `None` if the message is empty.
    pub message: Option<String>,
    /// The items we're giving in this offer.
    pub items_to_give: Vec<Asset>,
    /// The items we're receiving in this offer.
    pub items_to_receive: Vec<Asset>,
    /// Whether this offer was created by us or not.
    pub is_our_offer: bool,
    /// Whether this offer originated from a real time trade.
    pub from_real_time_trade: bool,
    /// The time before the offer expires if it has not been acted on.
    pub expiration_time: ServerTime,
    /// The time this offer was created.
    pub time_created: ServerTime,
    /// The time this offer last had an action e.g. accepting or declining the offer.
    pub time_updated: ServerTime,
    /// The state of this offer.
    pub trade_offer_state: TradeOfferState,
    /// The end date if this trade is in escrow.
    pub escrow_end_date: Option<ServerTime>,
    /// The confirmation method for this offer.
    pub confirmation_method: ConfirmationMethod,
}

impl TradeOffer {
    /// Our partner in this offer.
    pub fn partner(&self) -> Identity {
        Identity::from_account_id(self.accountid_other)
    }

    /// Checks whether the trade offer is glitched by checking if no items are present.
    pub fn is_glitched(&self) -> bool {
        self.items_to_receive.is_empty() && self.items_to_give.is_empty()
    }
}

/// Trade offers returned by `GetTradeOffers`.
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct TradeOffers {
    /// Offers we sent.
    pub trade_offers_sent: Vec<TradeOffer>,
    /// Offers we received.
    pub trade_offers_received: Vec<TradeOffer>,
    /// Descriptions for the items in the offers when requested.
    pub descriptions: Vec<Description>,
    /// Cursor for the next page of offers, if any.
    pub next_cursor: Option<u32>,
}
