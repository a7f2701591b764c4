//! Models for making requests.

mod new_trade_offer;
mod offer_payload;
mod options;

pub use new_trade_offer::{NewTradeOffer, NewTradeOfferBuilder, NewTradeOfferItem, parse_offer_access_token};
pub use offer_payload::{
    OfferForm,
    OfferParty,
    OfferPayload,
    OfferSubmission,
    build_form_fields,
    build_offer,
    build_submission,
    offer_referer,
};
pub use options::{
    GetTradeOffersOptions,
    GetTradeOffersSummaryOptions,
    InventoryOptions,
    PartnerInventoryOptions,
};
