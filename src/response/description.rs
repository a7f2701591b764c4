use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

/// Keys which identify a particular item rather than describe its class.
const ITEM_KEYS: [&str; 6] = ["id", "appid", "contextid", "classid", "instanceid", "amount"];

/// Display and trade attributes shared by every item of a class, e.g. the name, whether the item
/// is tradable, its tags and icon.
///
/// All attributes Steam sends are kept as-is. Accessors are provided for the common ones.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(transparent)]
pub struct Description {
    attributes: Map<String, Value>,
}

impl Description {
    /// Creates a description from a map of attributes.
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self {
            attributes,
        }
    }

    /// Removes the keys identifying a single item (`id`, `classid`, `amount`, etc.). These belong
    /// to the item the description is attached to.
    pub(crate) fn without_item_keys(mut self) -> Self {
        for key in ITEM_KEYS {
            self.attributes.remove(key);
        }

        self
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// All attributes.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Steam sends flags as `1`/`0`, `"1"`/`"0"` or booleans depending on the endpoint.
    fn get_flag(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(value)) => *value,
            Some(Value::Number(n)) => n.as_u64() == Some(1),
            Some(Value::String(s)) => s == "1",
            _ => false,
        }
    }

    /// The name of the item.
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    /// The name used to link to the item on the Steam Community Market.
    pub fn market_hash_name(&self) -> Option<&str> {
        self.get_str("market_hash_name")
    }

    /// The item's type, displayed underneath the game name in inventories.
    pub fn item_type(&self) -> Option<&str> {
        self.get_str("type")
    }

    /// The path of the item's icon.
    pub fn icon_url(&self) -> Option<&str> {
        self.get_str("icon_url")
    }

    /// Whether the item can be traded.
    pub fn tradable(&self) -> bool {
        self.get_flag("tradable")
    }

    /// Whether the item can be listed on the Steam Community Market.
    pub fn marketable(&self) -> bool {
        self.get_flag("marketable")
    }

    /// Tags for the item. Tags that cannot be read are skipped.
    pub fn tags(&self) -> Vec<Tag> {
        let tags = match self.get("tags") {
            Some(Value::Array(tags)) => tags.iter().collect::<Vec<_>>(),
            Some(Value::Object(tags)) => tags.values().collect(),
            _ => return Vec::new(),
        };

        tags
            .into_iter()
            .filter_map(|tag| Tag::deserialize(tag).ok())
            .collect()
    }
}

/// A tag for an item.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Tag {
    /// The internal name of the tag.
    pub internal_name: String,
    /// The display name of the tag.
    pub name: String,
    /// The category of the tag.
    pub category: String,
    /// The display name of the category.
    #[serde(default)]
    pub category_name: Option<String>,
    /// The color of the tag.
    #[serde(default)]
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_common_attributes() {
        let description: Description = serde_json::from_str(r#"{
            "classid": "101785959",
            "name": "Mann Co. Supply Crate Key",
            "type": "Level 5 Tool",
            "tradable": 1,
            "marketable": "0",
            "tags": [{"internal_name":"Unique","name":"Unique","category":"Quality","color":"7D6D00","category_name":"Quality"}]
        }"#).unwrap();

        assert_eq!(description.name(), Some("Mann Co. Supply Crate Key"));
        assert_eq!(description.item_type(), Some("Level 5 Tool"));
        assert!(description.tradable());
        assert!(!description.marketable());
        assert_eq!(description.tags()[0].category, "Quality");

        let description = description.without_item_keys();

        assert_eq!(description.get("classid"), None);
    }
}
