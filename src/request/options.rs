use crate::identity::PartnerIdentity;
use crate::types::{AppId, ContextId, ServerTime, TradeOfferId};

fn flag(value: bool) -> String {
    value.to_string()
}

/// Options for getting trade offers.
#[derive(Debug, Clone, PartialEq)]
pub struct GetTradeOffersOptions {
    /// Whether to get sent trade offers.
    pub get_sent_offers: bool,
    /// Whether to get received trade offers.
    pub get_received_offers: bool,
    /// Whether to get descriptions for items in the trade offers.
    pub get_descriptions: bool,
    /// Whether to get only active trade offers.
    pub active_only: bool,
    /// Whether to get only historical trade offers.
    pub historical_only: bool,
    /// The time to get historical trade offers from.
    pub historical_cutoff: Option<ServerTime>,
    /// The cursor returned with the previous page.
    pub cursor: Option<u32>,
}

impl Default for GetTradeOffersOptions {
    fn default() -> Self {
        Self {
            get_sent_offers: true,
            get_received_offers: true,
            get_descriptions: false,
            active_only: false,
            historical_only: false,
            historical_cutoff: None,
            cursor: None,
        }
    }
}

impl GetTradeOffersOptions {
    /// Only active offers, both sent and received.
    pub fn active() -> Self {
        Self {
            active_only: true,
            ..Default::default()
        }
    }

    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("get_sent_offers", flag(self.get_sent_offers)),
            ("get_received_offers", flag(self.get_received_offers)),
            ("get_descriptions", flag(self.get_descriptions)),
            ("active_only", flag(self.active_only)),
            ("historical_only", flag(self.historical_only)),
        ];

        if let Some(cutoff) = self.historical_cutoff {
            query.push(("time_historical_cutoff", cutoff.timestamp().to_string()));
        }

        if let Some(cursor) = self.cursor {
            query.push(("cursor", cursor.to_string()));
        }

        query
    }
}

/// Options for getting the summary of trade offers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetTradeOffersSummaryOptions {
    /// Offers updated after this time are counted as new.
    pub time_last_visit: Option<ServerTime>,
}

impl GetTradeOffersSummaryOptions {
    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        self.time_last_visit
            .map(|time| ("time_last_visit", time.timestamp().to_string()))
            .into_iter()
            .collect()
    }
}

/// Options for getting our own inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryOptions {
    /// The app ID of the inventory.
    pub appid: AppId,
    /// The context ID of the inventory.
    pub contextid: ContextId,
    /// The language for descriptions. Falls back to the session's language.
    pub language: Option<String>,
    /// Whether to get only tradable items.
    pub tradable_only: bool,
}

impl InventoryOptions {
    /// Options for the inventory of `appid` in `contextid`, tradable items only.
    pub fn new(appid: AppId, contextid: ContextId) -> Self {
        Self {
            appid,
            contextid,
            language: None,
            tradable_only: true,
        }
    }
}

/// Options for getting a trade partner's inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerInventoryOptions {
    /// The partner.
    pub partner: PartnerIdentity,
    /// The app ID of the inventory.
    pub appid: AppId,
    /// The context ID of the inventory.
    pub contextid: ContextId,
    /// The language for descriptions. Falls back to the session's language.
    pub language: Option<String>,
    /// The offer the inventory is being viewed from. Without one the inventory is viewed from
    /// the new offer page.
    pub tradeofferid: Option<TradeOfferId>,
}

impl PartnerInventoryOptions {
    /// Options for the partner's inventory of `appid` in `contextid`.
    pub fn new<T>(partner: T, appid: AppId, contextid: ContextId) -> Self
    where
        T: Into<PartnerIdentity>,
    {
        Self {
            partner: partner.into(),
            appid,
            contextid,
            language: None,
            tradeofferid: None,
        }
    }
}
