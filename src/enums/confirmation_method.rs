use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{Display, EnumString};

/// The method used to confirm a trade offer.
#[derive(Display, EnumString, Debug, PartialEq, Eq, FromPrimitive, IntoPrimitive, Clone, Copy)]
#[repr(u8)]
pub enum ConfirmationMethod {
    /// No confirmation.
    None = 0,
    /// Confirmed by email.
    Email = 1,
    /// Confirmed in the mobile app.
    MobileApp = 2,
    /// A method not listed above.
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl Default for ConfirmationMethod {
    fn default() -> Self {
        Self::None
    }
}

impl Serialize for ConfirmationMethod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(u8::from(*self))
    }
}

impl<'de> Deserialize<'de> for ConfirmationMethod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u8::deserialize(deserializer).map(Self::from)
    }
}
