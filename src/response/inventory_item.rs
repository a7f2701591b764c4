use super::Description;
use crate::request::NewTradeOfferItem;
use crate::serialize::string;
use crate::types::{AppId, ContextId, AssetId, ClassId, InstanceId, Amount};
use std::sync::Arc;
use serde::Serialize;

/// An item in an inventory merged with its description.
///
/// When serialized, the description's attributes appear next to the item's own fields.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct InventoryItem {
    /// The app ID e.g. 440 for Team Fortress 2.
    pub appid: AppId,
    /// The context ID the inventory was requested with.
    #[serde(with = "string")]
    pub contextid: ContextId,
    /// The unique asset ID. For currencies this is the currency ID.
    #[serde(rename = "id", with = "string")]
    pub assetid: AssetId,
    /// The ID of the description.
    #[serde(with = "string")]
    pub classid: ClassId,
    /// The instance ID of the description. `0` when the item has none.
    #[serde(with = "string")]
    pub instanceid: InstanceId,
    /// The amount. If this item is not stackable the amount will be `1`.
    pub amount: Amount,
    /// Whether this is a currency rather than an item.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_currency: bool,
    /// The description shared by all items of this class.
    #[serde(flatten)]
    pub description: Arc<Description>,
}

impl InventoryItem {
    /// The key the description was looked up by.
    pub fn description_key(&self) -> String {
        description_key(self.classid, self.instanceid)
    }
}

/// Descriptions are keyed by `classid_instanceid`.
pub(crate) fn description_key(classid: ClassId, instanceid: InstanceId) -> String {
    format!("{classid}_{instanceid}")
}

impl From<&InventoryItem> for NewTradeOfferItem {
    fn from(item: &InventoryItem) -> Self {
        Self {
            appid: item.appid,
            contextid: item.contextid,
            assetid: item.assetid,
            amount: item.amount,
        }
    }
}

impl From<InventoryItem> for NewTradeOfferItem {
    fn from(item: InventoryItem) -> Self {
        Self::from(&item)
    }
}
