use crate::error::{Error, MissingDescriptionError};
use crate::helpers::parses_response;
use crate::response::{Description, InventoryItem, description_key};
use crate::serialize;
use crate::transport::HttpResponse;
use crate::types::{AppId, ContextId, AssetId, ClassId, InstanceId, Amount};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use serde::Deserialize;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};

/// An item or currency record before it is merged with its description.
#[derive(Deserialize, Debug)]
struct RawItem {
    #[serde(deserialize_with = "serialize::string_or_number")]
    id: AssetId,
    #[serde(deserialize_with = "serialize::string_or_number")]
    classid: ClassId,
    #[serde(default, deserialize_with = "serialize::string_or_number_or_zero")]
    instanceid: InstanceId,
    #[serde(deserialize_with = "serialize::string_or_number")]
    amount: Amount,
}

/// One page from an `inventory/json` or `partnerinventory` endpoint.
#[derive(Deserialize, Debug)]
struct RawInventoryPage {
    #[serde(default, deserialize_with = "serialize::into_bool")]
    more: bool,
    #[serde(default, deserialize_with = "serialize::cursor")]
    more_start: Option<u64>,
    #[serde(default, rename = "rgInventory", deserialize_with = "present_values")]
    items: Option<Vec<RawItem>>,
    #[serde(default, rename = "rgCurrency", deserialize_with = "present_values")]
    currencies: Option<Vec<RawItem>>,
    #[serde(default, rename = "rgDescriptions", deserialize_with = "keyed_descriptions")]
    descriptions: Option<HashMap<String, Arc<Description>>>,
}

fn present_values<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    serialize::map_values_in_order(deserializer).map(Some)
}

/// Descriptions keyed by `classid_instanceid`. An empty array stands in for an empty map.
fn keyed_descriptions<'de, D>(
    deserializer: D,
) -> Result<Option<HashMap<String, Arc<Description>>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct DescriptionsVisitor;

    impl<'de> Visitor<'de> for DescriptionsVisitor {
        type Value = HashMap<String, Arc<Description>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of descriptions or an empty array")
        }

        fn visit_seq<V>(self, mut seq: V) -> Result<Self::Value, V::Error>
        where
            V: SeqAccess<'de>,
        {
            match seq.next_element::<de::IgnoredAny>()? {
                None => Ok(HashMap::new()),
                Some(_) => Err(de::Error::invalid_length(1, &self)),
            }
        }

        fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut descriptions = HashMap::with_capacity(access.size_hint().unwrap_or(0));

            while let Some((key, description)) = access.next_entry::<String, Description>()? {
                descriptions.insert(key, Arc::new(description.without_item_keys()));
            }

            Ok(descriptions)
        }
    }

    deserializer
        .deserialize_any(DescriptionsVisitor)
        .map(Some)
}

/// A page of an inventory with every item merged with its description.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryPage {
    /// Items followed by currencies, each in the order they appear in the response.
    pub items: Vec<InventoryItem>,
    /// Whether there are more pages.
    pub more: bool,
    /// The cursor for the next page.
    pub more_start: Option<u64>,
}

/// Checks an inventory response and merges its items with their descriptions. The requested
/// `appid` and `contextid` are stamped on every item since Steam omits them.
pub fn parse_inventory_page(
    response: &HttpResponse,
    appid: AppId,
    contextid: ContextId,
) -> Result<InventoryPage, Error> {
    let page: RawInventoryPage = parses_response(response)?;
    let (Some(items), Some(currencies), Some(descriptions)) = (
        page.items,
        page.currencies,
        page.descriptions,
    ) else {
        return Err(Error::InvalidResponse("Missing rgInventory, rgCurrency or rgDescriptions".into()));
    };
    let records = items
        .into_iter()
        .map(|item| (item, false))
        .chain(currencies.into_iter().map(|item| (item, true)));
    let mut merged = Vec::new();

    for (item, is_currency) in records {
        let description = descriptions
            .get(&description_key(item.classid, item.instanceid))
            .ok_or(MissingDescriptionError {
                appid,
                classid: item.classid,
                instanceid: item.instanceid,
            })?;

        merged.push(InventoryItem {
            appid,
            contextid,
            assetid: item.id,
            classid: item.classid,
            instanceid: item.instanceid,
            amount: item.amount,
            is_currency,
            description: Arc::clone(description),
        });
    }

    Ok(InventoryPage {
        items: merged,
        more: page.more,
        more_start: page.more_start,
    })
}
