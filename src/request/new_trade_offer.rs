use crate::identity::PartnerIdentity;
use crate::response::Asset;
use crate::serialize;
use crate::types::{AppId, ContextId, AssetId, Amount, TradeOfferId};
use serde::{Serialize, Deserialize};
use url::Url;

/// An item to send in a trade offer.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct NewTradeOfferItem {
    /// The app ID e.g. `440` for Team Fortress 2 or `730` for Counter-Strike 2.
    pub appid: AppId,
    /// The context ID.
    #[serde(with = "serialize::string")]
    pub contextid: ContextId,
    /// The unique asset ID. This value is unique to the item's `appid` and `contextid`.
    #[serde(with = "serialize::string")]
    pub assetid: AssetId,
    /// The amount. If this item is not stackable the amount will be `1`.
    pub amount: Amount,
}

impl From<&Asset> for NewTradeOfferItem {
    fn from(asset: &Asset) -> Self {
        Self {
            appid: asset.appid,
            contextid: asset.contextid,
            assetid: asset.assetid,
            amount: asset.amount,
        }
    }
}

impl From<Asset> for NewTradeOfferItem {
    fn from(asset: Asset) -> Self {
        Self::from(&asset)
    }
}

/// Represents a trade offer not yet sent, or a counter offer to an existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTradeOffer {
    /// The partner receiving the offer.
    pub partner: PartnerIdentity,
    /// Items we give.
    pub items_to_give: Vec<NewTradeOfferItem>,
    /// Items we receive.
    pub items_to_receive: Vec<NewTradeOfferItem>,
    /// The message to include.
    pub message: Option<String>,
    /// The access token for sending an offer if you are not friends with the partner.
    pub token: Option<String>,
    /// The offer this offer counters.
    pub counter_tradeofferid: Option<TradeOfferId>,
}

impl NewTradeOffer {
    /// Creates a builder for an offer to the given partner.
    pub fn builder<T>(partner: T) -> NewTradeOfferBuilder
    where
        T: Into<PartnerIdentity>,
    {
        NewTradeOfferBuilder::new(partner.into())
    }

    /// Checks if any items are included in the offer.
    pub fn is_empty(&self) -> bool {
        self.items_to_give.is_empty() &&
        self.items_to_receive.is_empty()
    }
}

/// Builder for constructing new trade offers.
#[derive(Debug, Clone)]
pub struct NewTradeOfferBuilder {
    offer: NewTradeOffer,
}

impl NewTradeOfferBuilder {
    /// Creates a new [`NewTradeOfferBuilder`] with the given partner.
    pub fn new(partner: PartnerIdentity) -> Self {
        Self {
            offer: NewTradeOffer {
                partner,
                items_to_give: Vec::new(),
                items_to_receive: Vec::new(),
                message: None,
                token: None,
                counter_tradeofferid: None,
            },
        }
    }

    /// The items to give in this offer.
    pub fn items_to_give<T>(mut self, items: T) -> Self
    where
        T: IntoIterator,
        T::Item: Into<NewTradeOfferItem>,
    {
        self.offer.items_to_give = items.into_iter().map(|i| i.into()).collect();
        self
    }

    /// The items to receive in this offer.
    pub fn items_to_receive<T>(mut self, items: T) -> Self
    where
        T: IntoIterator,
        T::Item: Into<NewTradeOfferItem>,
    {
        self.offer.items_to_receive = items.into_iter().map(|i| i.into()).collect();
        self
    }

    /// The partner's trade offer URL. Silently ignored if the URL does not contain a token.
    pub fn trade_offer_url(mut self, trade_offer_url: &str) -> Self {
        self.offer.token = parse_offer_access_token(trade_offer_url);
        self
    }

    /// The token for sending an offer if you are not friends with the partner.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.offer.token = Some(token.into());
        self
    }

    /// The message to send in this offer.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.offer.message = Some(message.into());
        self
    }

    /// Makes this offer a counter offer to an existing offer.
    pub fn counter(mut self, tradeofferid: TradeOfferId) -> Self {
        self.offer.counter_tradeofferid = Some(tradeofferid);
        self
    }

    /// Builds into [`NewTradeOffer`].
    pub fn build(self) -> NewTradeOffer {
        self.offer
    }
}

/// Gets the `token` query parameter from a trade offer URL.
pub fn parse_offer_access_token(trade_offer_url: &str) -> Option<String> {
    Url::parse(trade_offer_url)
        .ok()?
        .query_pairs()
        .find(|(key, _)| key == "token")
        .map(|(_, token)| token.into_owned())
}
