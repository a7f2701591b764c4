//! Loading complete inventories from the paginated `inventory/json` endpoints.

mod page;

pub use page::{InventoryPage, parse_inventory_page};

use crate::api::SteamTradeOfferAPI;
use crate::error::{Error, ParameterError};
use crate::request::{InventoryOptions, PartnerInventoryOptions};
use crate::response::InventoryItem;
use crate::transport::{HttpRequest, Transport};
use crate::types::{AppId, ContextId};
use url::Url;

/// Where an inventory is loaded from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct InventorySource {
    url: Url,
    referer: Option<String>,
    appid: AppId,
    contextid: ContextId,
}

impl InventorySource {
    /// Our own inventory.
    pub fn own(
        options: &InventoryOptions,
        language: Option<&str>,
    ) -> Result<Self, ParameterError> {
        let mut url = Url::parse(&format!(
            "https://{}/my/inventory/json/{}/{}/",
            SteamTradeOfferAPI::HOSTNAME,
            options.appid,
            options.contextid,
        ))?;

        {
            let mut query = url.query_pairs_mut();

            if let Some(language) = options.language.as_deref().or(language) {
                query.append_pair("l", language);
            }

            if options.tradable_only {
                query.append_pair("trading", "1");
            }
        }

        Ok(Self {
            url,
            referer: None,
            appid: options.appid,
            contextid: options.contextid,
        })
    }

    /// A trade partner's inventory as seen from an offer page.
    pub fn partner(
        options: &PartnerInventoryOptions,
        sessionid: &str,
        language: Option<&str>,
    ) -> Result<Self, Error> {
        let partner = options.partner.resolve()?;
        let offer = options.tradeofferid
            .map(|tradeofferid| tradeofferid.to_string())
            .unwrap_or_else(|| String::from("new"));
        let mut url = Url::parse(&format!(
            "https://{}/tradeoffer/{offer}/partnerinventory/",
            SteamTradeOfferAPI::HOSTNAME,
        )).map_err(ParameterError::from)?;

        {
            let mut query = url.query_pairs_mut();

            query
                .append_pair("sessionid", sessionid)
                .append_pair("partner", &partner.community_id().to_string())
                .append_pair("appid", &options.appid.to_string())
                .append_pair("contextid", &options.contextid.to_string());

            if let Some(language) = options.language.as_deref().or(language) {
                query.append_pair("l", language);
            }
        }

        let referer = format!(
            "https://{}/tradeoffer/{offer}/?partner={}",
            SteamTradeOfferAPI::HOSTNAME,
            partner.account_id(),
        );

        Ok(Self {
            url,
            referer: Some(referer),
            appid: options.appid,
            contextid: options.contextid,
        })
    }

    fn page_request(&self, start: Option<u64>) -> HttpRequest {
        let mut url = self.url.clone();

        if let Some(start) = start {
            url.query_pairs_mut().append_pair("start", &start.to_string());
        }

        let request = HttpRequest::get(url);

        match &self.referer {
            Some(referer) => request.referer(referer),
            None => request,
        }
    }
}

/// Loads every page of an inventory, one page after another.
///
/// Each page must advance the cursor. Loading stops with an error once `max_pages` pages were
/// loaded without reaching the end.
pub(crate) async fn load_inventory(
    transport: &dyn Transport,
    source: &InventorySource,
    max_pages: u32,
) -> Result<Vec<InventoryItem>, Error> {
    let mut inventory = Vec::new();
    let mut start: Option<u64> = None;

    for _ in 0..max_pages {
        log::trace!("Loading inventory page from {} at {start:?}", source.url);

        let response = transport.execute(source.page_request(start)).await?;
        let page = parse_inventory_page(&response, source.appid, source.contextid)?;

        inventory.extend(page.items);

        if !page.more {
            return Ok(inventory);
        }

        let next = page.more_start
            .ok_or_else(|| Error::InvalidResponse("More items without a cursor".into()))?;

        // shouldn't occur, but we wouldn't want to call this endlessly if it does
        if next <= start.unwrap_or(0) {
            return Err(Error::InvalidResponse(format!("Cursor did not advance past {next}")));
        }

        start = Some(next);
    }

    Err(Error::InvalidResponse(format!("Inventory exceeded {max_pages} pages")))
}
