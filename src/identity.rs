//! Conversion between 32-bit account IDs and 64-bit community IDs.
//!
//! A community ID packs the universe (8 bits), account type (4 bits) and instance (20 bits) into
//! the high 32 bits and the account ID into the low 32 bits. Only individual accounts in the
//! public universe on the desktop instance are handled here, which is what every trade partner
//! is.

use crate::error::IdentityError;
use crate::types::{AccountId, CommunityId};
use std::fmt;
use std::str::FromStr;
use steamid_ng::SteamID;

/// The high 32 bits of a community ID for a public, individual, desktop account.
const INDIVIDUAL_HIGH_BITS: u64 = 0x0110_0001;
/// The community ID with an account ID of `0`.
const INDIVIDUAL_BASE: CommunityId = INDIVIDUAL_HIGH_BITS << 32;

/// Converts an account ID to its community ID.
pub fn account_id_to_community_id(account_id: AccountId) -> CommunityId {
    INDIVIDUAL_BASE | account_id as u64
}

/// Extracts the account ID from the low 32 bits of a community ID.
pub fn community_id_to_account_id(community_id: CommunityId) -> AccountId {
    (community_id & 0xFFFF_FFFF) as AccountId
}

/// Converts an account ID to a [`SteamID`].
pub fn account_id_to_steamid(account_id: AccountId) -> SteamID {
    SteamID::from(account_id_to_community_id(account_id))
}

/// An individual account identified by both of its IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    account_id: AccountId,
}

impl Identity {
    /// Creates an identity from an account ID.
    pub fn from_account_id(account_id: AccountId) -> Self {
        Self {
            account_id,
        }
    }

    /// Creates an identity from a community ID. Fails if the ID does not belong to an individual
    /// account in the public universe.
    pub fn from_community_id(community_id: CommunityId) -> Result<Self, IdentityError> {
        if community_id >> 32 != INDIVIDUAL_HIGH_BITS {
            return Err(IdentityError::NotIndividual(community_id));
        }

        Ok(Self::from_account_id(community_id_to_account_id(community_id)))
    }

    /// The 32-bit account ID.
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// The 64-bit community ID.
    pub fn community_id(&self) -> CommunityId {
        account_id_to_community_id(self.account_id)
    }

    /// This identity as a [`SteamID`].
    pub fn steamid(&self) -> SteamID {
        SteamID::from(self.community_id())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.community_id())
    }
}

impl TryFrom<SteamID> for Identity {
    type Error = IdentityError;

    fn try_from(steamid: SteamID) -> Result<Self, Self::Error> {
        Self::from_community_id(u64::from(steamid))
    }
}

impl From<Identity> for SteamID {
    fn from(identity: Identity) -> Self {
        identity.steamid()
    }
}

/// Parses a decimal community ID.
impl FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let community_id = s.trim().parse::<CommunityId>()
            .map_err(|_error| IdentityError::Malformed(s.to_string()))?;

        Self::from_community_id(community_id)
    }
}

/// A trade partner as supplied by the caller. Either ID may be given. When both are given the
/// community ID is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartnerIdentity {
    /// The partner's community ID.
    pub community_id: Option<CommunityId>,
    /// The partner's account ID.
    pub account_id: Option<AccountId>,
}

impl PartnerIdentity {
    /// A partner identified by community ID.
    pub fn community_id(community_id: CommunityId) -> Self {
        Self {
            community_id: Some(community_id),
            account_id: None,
        }
    }

    /// A partner identified by account ID.
    pub fn account_id(account_id: AccountId) -> Self {
        Self {
            community_id: None,
            account_id: Some(account_id),
        }
    }

    /// Resolves the partner into an [`Identity`].
    pub fn resolve(&self) -> Result<Identity, IdentityError> {
        match (self.community_id, self.account_id) {
            (Some(community_id), _) => Identity::from_community_id(community_id),
            (None, Some(account_id)) => Ok(Identity::from_account_id(account_id)),
            (None, None) => Err(IdentityError::Missing),
        }
    }
}

impl From<Identity> for PartnerIdentity {
    fn from(identity: Identity) -> Self {
        Self::community_id(identity.community_id())
    }
}

impl From<SteamID> for PartnerIdentity {
    fn from(steamid: SteamID) -> Self {
        Self::community_id(u64::from(steamid))
    }
}
