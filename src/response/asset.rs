use serde::{Serialize, Deserialize};
use crate::serialize::{self, string};
use crate::types::{AppId, ContextId, AssetId, ClassId, InstanceId, Amount};

/// An item referenced by a trade offer.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Asset {
    /// The app ID e.g. 440 for Team Fortress 2 or 730 for Counter-Strike 2.
    pub appid: AppId,
    /// The context ID.
    #[serde(with = "string")]
    pub contextid: ContextId,
    /// The unique asset ID. This value is unique to the item's `appid` and `contextid`.
    #[serde(with = "string")]
    pub assetid: AssetId,
    /// The ID of the description.
    #[serde(with = "string")]
    pub classid: ClassId,
    /// The specific instance ID of the description belonging to the class ID.
    #[serde(default, deserialize_with = "serialize::string_or_number_or_zero", serialize_with = "string::serialize")]
    pub instanceid: InstanceId,
    /// The amount. If this item is not stackable the amount will be `1`.
    #[serde(deserialize_with = "serialize::string_or_number", serialize_with = "string::serialize")]
    pub amount: Amount,
    /// Whether the item no longer exists in the owner's inventory.
    #[serde(default)]
    pub missing: bool,
}
