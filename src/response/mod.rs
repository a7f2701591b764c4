//! Models for responses.

mod accepted_offer;
mod asset;
mod description;
mod inventory_item;
mod sent_offer;
mod summary;
mod trade_offer;

pub use accepted_offer::AcceptedOffer;
pub use asset::Asset;
pub use description::{Description, Tag};
pub use inventory_item::InventoryItem;
pub(crate) use inventory_item::description_key;
pub use sent_offer::SentOffer;
pub use summary::TradeOffersSummary;
pub use trade_offer::{TradeOffer, TradeOffers};
pub use crate::receipt::ReceiptItem;
