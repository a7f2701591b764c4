use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{Display, EnumString};

/// The state of a trade offer. The values are the ones used by Steam. Values this crate does not
/// know are kept in [`TradeOfferState::Unknown`].
#[derive(Display, EnumString, Debug, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive, Clone, Copy)]
#[repr(u8)]
pub enum TradeOfferState {
    /// Invalid.
    Invalid = 1,
    /// This trade offer has been sent, neither party has acted on it yet.
    Active = 2,
    /// The trade offer was accepted by the recipient and items were exchanged.
    Accepted = 3,
    /// The recipient made a counter offer.
    Countered = 4,
    /// The trade offer was not accepted before the expiration date.
    Expired = 5,
    /// The sender cancelled the offer.
    Canceled = 6,
    /// The recipient declined the offer.
    Declined = 7,
    /// Some of the items in the offer are no longer available.
    InvalidItems = 8,
    /// The offer hasn't been sent yet and is awaiting email/mobile confirmation.
    CreatedNeedsConfirmation = 9,
    /// Either party canceled the offer via email/mobile confirmation.
    CanceledBySecondFactor = 10,
    /// The trade has been placed on hold.
    InEscrow = 11,
    /// A state not listed above.
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl TradeOfferState {
    /// Whether the offer can still be acted on.
    pub fn is_changeable(&self) -> bool {
        matches!(
            self,
            Self::Active |
            Self::InEscrow |
            Self::CreatedNeedsConfirmation
        )
    }
}

impl Serialize for TradeOfferState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(u8::from(*self))
    }
}

impl<'de> Deserialize<'de> for TradeOfferState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u8::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_from_remote_value() {
        assert_eq!(TradeOfferState::from(3u8), TradeOfferState::Accepted);
        assert_eq!(serde_json::from_str::<TradeOfferState>("11").unwrap(), TradeOfferState::InEscrow);
    }

    #[test]
    fn keeps_unlisted_values() {
        let state = serde_json::from_str::<TradeOfferState>("12").unwrap();

        assert_eq!(state, TradeOfferState::Unknown(12));
        assert_eq!(u8::from(state), 12);
        assert_eq!(serde_json::to_string(&state).unwrap(), "12");
        assert!(!state.is_changeable());
    }

    #[test]
    fn changeable_states() {
        assert!(TradeOfferState::Active.is_changeable());
        assert!(TradeOfferState::InEscrow.is_changeable());
        assert!(TradeOfferState::CreatedNeedsConfirmation.is_changeable());
        assert!(!TradeOfferState::Accepted.is_changeable());
        assert!(!TradeOfferState::Declined.is_changeable());
    }
}
