//! Types for common values in Steam responses.

/// Uniquely identifies an application on Steam. For example: 440 for Team Fortress 2.
pub type AppId = u32;
/// A context ID belonging to an [`AppId`].
pub type ContextId = u64;
/// An asset ID unique to an [`AppId`] + [`ContextId`] combination.
pub type AssetId = u64;
/// An amount for stackable items. For non-stackable items this is simply `1`.
pub type Amount = u32;
/// An ID for a [`crate::response::Description`] which provides a general overview of an item.
pub type ClassId = u64;
/// A more specific instance of a class. `0` when the item has no specific instance.
pub type InstanceId = u64;
/// An ID of a trade offer.
pub type TradeOfferId = u64;
/// An ID of a trade.
pub type TradeId = u64;
/// A 32-bit account ID.
pub type AccountId = u32;
/// A 64-bit community ID.
pub type CommunityId = u64;

pub use crate::time::ServerTime;
