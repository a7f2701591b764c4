//! Manages Steam trade offers for a logged-in web session.
//!
//! [`SteamTradeOfferAPI`] lists, accepts, declines, cancels, sends and counters trade offers,
//! loads inventories (our own or a trade partner's) and reads the items received in a completed
//! trade from its receipt.
//!
//! ```no_run
//! use steam_tradeoffers::{SteamTradeOfferAPI, request::InventoryOptions};
//!
//! # async fn run() -> Result<(), steam_tradeoffers::Error> {
//! let api = SteamTradeOfferAPI::builder()
//!     .api_key("XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX")
//!     .cookies(vec!["steamLoginSecure=...".into(), "sessionid=...".into()])
//!     .build()?;
//! let inventory = api.get_inventory(&InventoryOptions::new(440, 2)).await?;
//!
//! println!("{} items", inventory.len());
//! # Ok(())
//! # }
//! ```

mod api;
mod helpers;
mod identity;
mod receipt;
mod serialize;
mod session;

pub mod diagnostics;
pub mod enums;
pub mod error;
pub mod inventory;
pub mod request;
pub mod response;
pub mod time;
pub mod transport;
pub mod types;

pub use api::{SteamTradeOfferAPI, SteamTradeOfferAPIBuilder};
pub use error::Error;
pub use identity::{
    Identity,
    PartnerIdentity,
    account_id_to_community_id,
    account_id_to_steamid,
    community_id_to_account_id,
};
pub use receipt::parse_receipt_page;
pub use session::Session;
pub use steamid_ng::SteamID;
