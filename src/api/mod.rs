//! The client for Steam's trade offer endpoints.

mod builder;
mod response;

pub use builder::SteamTradeOfferAPIBuilder;

use response::{ApiResponse, GetTradeOfferBody, GetTradeOffersBody};
use crate::diagnostics::{self, SharedHook};
use crate::error::{Error, ParameterError, ParseHtmlError};
use crate::helpers::{check_html_response, parses_form_response, parses_response};
use crate::inventory::{InventorySource, load_inventory};
use crate::receipt::parse_receipt_page;
use crate::request::{
    GetTradeOffersOptions,
    GetTradeOffersSummaryOptions,
    InventoryOptions,
    NewTradeOffer,
    PartnerInventoryOptions,
    build_submission,
    parse_offer_access_token,
};
use crate::response::{
    AcceptedOffer,
    InventoryItem,
    ReceiptItem,
    SentOffer,
    TradeOffer,
    TradeOffers,
    TradeOffersSummary,
};
use crate::session::Session;
use crate::transport::{HttpRequest, HttpResponse, Transport};
use crate::types::{TradeId, TradeOfferId};
use std::sync::Arc;
use serde::de::IgnoredAny;
use url::Url;

/// The default for the most pages loaded for a single inventory.
pub(crate) const DEFAULT_MAX_INVENTORY_PAGES: u32 = 100;

/// The underlying API for Steam trade offers.
///
/// Cloning is cheap. Clones share the same transport and session.
#[derive(Debug, Clone)]
pub struct SteamTradeOfferAPI {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) session: Arc<Session>,
    pub(crate) diagnostic_hook: SharedHook,
    pub(crate) max_inventory_pages: u32,
}

impl SteamTradeOfferAPI {
    /// The hostname of the Steam Community.
    pub const HOSTNAME: &'static str = "steamcommunity.com";
    /// The hostname of the Steam Web API.
    pub const API_HOSTNAME: &'static str = "api.steampowered.com";

    /// Builder for constructing a [`SteamTradeOfferAPI`].
    pub fn builder() -> SteamTradeOfferAPIBuilder {
        SteamTradeOfferAPIBuilder::new()
    }

    /// The session this client was built with.
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn get_uri(pathname: &str) -> Result<Url, ParameterError> {
        Ok(Url::parse(&format!("https://{}{pathname}", Self::HOSTNAME))?)
    }

    /// Builds the URL for an `IEconService` method with the API key and `query` in the query
    /// string.
    fn get_api_url(
        &self,
        method: &str,
        query: &[(&'static str, String)],
    ) -> Result<Url, Error> {
        let key = self.session.api_key
            .as_deref()
            .ok_or_else(|| Error::Session("An API key is required".into()))?;
        let mut url = Url::parse(&format!(
            "https://{}/IEconService/{method}/v1/",
            Self::API_HOSTNAME,
        )).map_err(ParameterError::from)?;

        {
            let mut pairs = url.query_pairs_mut();

            pairs.append_pair("key", key);

            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }

    fn sessionid(&self) -> Result<&str, Error> {
        self.session.sessionid
            .as_deref()
            .ok_or_else(|| Error::Session("A session ID is required".into()))
    }

    fn language_query(&self) -> Vec<(&'static str, String)> {
        self.session.language
            .iter()
            .map(|language| ("language", language.clone()))
            .collect()
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        log::trace!("{} {}", request.method, request.url.path());

        let response = self.transport.execute(request).await?;

        Ok(response)
    }

    /// Reports a failed operation to the diagnostic hook.
    fn report<T>(&self, operation: &'static str, result: Result<T, Error>) -> Result<T, Error> {
        if let Err(error) = &result {
            diagnostics::emit(&self.diagnostic_hook, operation, error);
        }

        result
    }

    /// Gets trade offers.
    pub async fn get_trade_offers(
        &self,
        options: &GetTradeOffersOptions,
    ) -> Result<TradeOffers, Error> {
        let result = self.get_trade_offers_request(options).await;

        self.report("get_trade_offers", result)
    }

    async fn get_trade_offers_request(
        &self,
        options: &GetTradeOffersOptions,
    ) -> Result<TradeOffers, Error> {
        let mut query = options.query();

        query.extend(self.language_query());

        let url = self.get_api_url("GetTradeOffers", &query)?;
        let response = self.send(HttpRequest::get(url)).await?;
        let body: ApiResponse<GetTradeOffersBody> = parses_response(&response)?;

        Ok(TradeOffers::from(body.response))
    }

    /// Gets a trade offer. `None` if Steam did not return the offer.
    pub async fn get_trade_offer(
        &self,
        tradeofferid: TradeOfferId,
    ) -> Result<Option<TradeOffer>, Error> {
        let result = self.get_trade_offer_request(tradeofferid).await;

        self.report("get_trade_offer", result)
    }

    async fn get_trade_offer_request(
        &self,
        tradeofferid: TradeOfferId,
    ) -> Result<Option<TradeOffer>, Error> {
        let mut query = vec![("tradeofferid", tradeofferid.to_string())];

        query.extend(self.language_query());

        let url = self.get_api_url("GetTradeOffer", &query)?;
        let response = self.send(HttpRequest::get(url)).await?;
        let body: ApiResponse<GetTradeOfferBody> = parses_response(&response)?;

        Ok(body.response.offer.map(TradeOffer::from))
    }

    /// Gets counts of trade offers by category.
    pub async fn get_trade_offers_summary(
        &self,
        options: &GetTradeOffersSummaryOptions,
    ) -> Result<TradeOffersSummary, Error> {
        let result = self.get_trade_offers_summary_request(options).await;

        self.report("get_trade_offers_summary", result)
    }

    async fn get_trade_offers_summary_request(
        &self,
        options: &GetTradeOffersSummaryOptions,
    ) -> Result<TradeOffersSummary, Error> {
        let url = self.get_api_url("GetTradeOffersSummary", &options.query())?;
        let response = self.send(HttpRequest::get(url)).await?;
        let body: ApiResponse<TradeOffersSummary> = parses_response(&response)?;

        Ok(body.response)
    }

    async fn post_offer_action(
        &self,
        method: &str,
        tradeofferid: TradeOfferId,
    ) -> Result<(), Error> {
        let url = self.get_api_url(method, &[])?;
        let form = vec![("tradeofferid".to_string(), tradeofferid.to_string())];
        let response = self.send(HttpRequest::post(url, form)).await?;
        let _body: IgnoredAny = parses_response(&response)?;

        Ok(())
    }

    /// Declines an offer we received.
    pub async fn decline_offer(
        &self,
        tradeofferid: TradeOfferId,
    ) -> Result<(), Error> {
        let result = self.post_offer_action("DeclineTradeOffer", tradeofferid).await;

        self.report("decline_offer", result)
    }

    /// Cancels an offer we sent.
    pub async fn cancel_offer(
        &self,
        tradeofferid: TradeOfferId,
    ) -> Result<(), Error> {
        let result = self.post_offer_action("CancelTradeOffer", tradeofferid).await;

        self.report("cancel_offer", result)
    }

    /// Accepts an offer we received.
    pub async fn accept_offer(
        &self,
        tradeofferid: TradeOfferId,
    ) -> Result<AcceptedOffer, Error> {
        let result = self.accept_offer_request(tradeofferid).await;

        self.report("accept_offer", result)
    }

    async fn accept_offer_request(
        &self,
        tradeofferid: TradeOfferId,
    ) -> Result<AcceptedOffer, Error> {
        let sessionid = self.sessionid()?;
        let url = Self::get_uri(&format!("/tradeoffer/{tradeofferid}/accept"))?;
        let referer = Self::get_uri(&format!("/tradeoffer/{tradeofferid}/"))?;
        let form = vec![
            ("sessionid".to_string(), sessionid.to_string()),
            ("serverid".to_string(), "1".to_string()),
            ("tradeofferid".to_string(), tradeofferid.to_string()),
        ];
        let request = HttpRequest::post(url, form).referer(referer);
        let response = self.send(request).await?;

        parses_form_response(&response)
    }

    /// Sends an offer, or a counter offer when the offer counters an existing one.
    pub async fn send_offer(
        &self,
        offer: &NewTradeOffer,
    ) -> Result<SentOffer, Error> {
        let result = self.send_offer_request(offer).await;

        self.report("send_offer", result)
    }

    async fn send_offer_request(
        &self,
        offer: &NewTradeOffer,
    ) -> Result<SentOffer, Error> {
        let sessionid = self.sessionid()?;
        let submission = build_submission(offer, sessionid)?;
        let url = Self::get_uri("/tradeoffer/new/send")?;
        let request = HttpRequest::post(url, submission.form.into_pairs())
            .referer(submission.referer);
        let response = self.send(request).await?;

        parses_form_response(&response)
    }

    /// Gets our inventory. Every page is loaded and merged with its descriptions.
    pub async fn get_inventory(
        &self,
        options: &InventoryOptions,
    ) -> Result<Vec<InventoryItem>, Error> {
        let result = match InventorySource::own(options, self.session.language.as_deref()) {
            Ok(source) => self.load_inventory(&source).await,
            Err(error) => Err(error.into()),
        };

        self.report("get_inventory", result)
    }

    /// Gets a trade partner's inventory. Every page is loaded and merged with its descriptions.
    pub async fn get_partner_inventory(
        &self,
        options: &PartnerInventoryOptions,
    ) -> Result<Vec<InventoryItem>, Error> {
        let source = self.sessionid()
            .and_then(|sessionid| InventorySource::partner(
                options,
                sessionid,
                self.session.language.as_deref(),
            ));
        let result = match source {
            Ok(source) => self.load_inventory(&source).await,
            Err(error) => Err(error),
        };

        self.report("get_partner_inventory", result)
    }

    async fn load_inventory(&self, source: &InventorySource) -> Result<Vec<InventoryItem>, Error> {
        load_inventory(self.transport.as_ref(), source, self.max_inventory_pages).await
    }

    /// Gets the items received in a trade from its receipt page.
    pub async fn get_receipt(
        &self,
        tradeid: TradeId,
    ) -> Result<Vec<ReceiptItem>, Error> {
        let result = self.get_page(&format!("/trade/{tradeid}/receipt/")).await
            .and_then(|body| parse_receipt_page(&body));

        self.report("get_receipt", result)
    }

    /// Gets the access token from our trade offer URL. Others need it to send us offers when
    /// they are not our friend.
    pub async fn get_offer_token(&self) -> Result<String, Error> {
        let result = self.get_page("/my/tradeoffers/privacy").await
            .and_then(|body| parse_offer_token_page(&body));

        self.report("get_offer_token", result)
    }

    /// Gets the HTML of a Steam Community page.
    async fn get_page(&self, pathname: &str) -> Result<String, Error> {
        let url = Self::get_uri(pathname)?;
        let response = self.send(HttpRequest::get(url)).await?;

        check_html_response(&response)
    }
}

fn parse_offer_token_page(body: &str) -> Result<String, Error> {
    let document = scraper::Html::parse_document(body);
    let selector = scraper::Selector::parse("input#trade_offer_access_url")
        .map_err(|_error| ParseHtmlError::ParseSelector)?;
    let trade_offer_url = document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("value"))
        .ok_or_else(|| Error::Session("No trade offer URL on page".into()))?;

    parse_offer_access_token(trade_offer_url)
        .ok_or_else(|| Error::Session("No token in trade offer URL".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::recording::RecordingHook;
    use crate::enums::{ConfirmationMethod, TradeOfferState};
    use crate::identity::PartnerIdentity;
    use crate::request::NewTradeOfferItem;
    use crate::transport::mock::MockTransport;
    use reqwest::Method;

    fn api_with(transport: &Arc<MockTransport>) -> SteamTradeOfferAPI {
        SteamTradeOfferAPI::builder()
            .api_key("apikey")
            .sessionid("sid")
            .language("english")
            .transport(Arc::clone(transport) as Arc<dyn Transport>)
            .build()
            .unwrap()
    }

    fn item(assetid: u64) -> NewTradeOfferItem {
        NewTradeOfferItem {
            appid: 440,
            contextid: 2,
            assetid,
            amount: 1,
        }
    }

    #[tokio::test]
    async fn gets_trade_offers() {
        let transport = Arc::new(MockTransport::new());

        transport.ok(include_str!("fixtures/get_trade_offers.json"));

        let offers = api_with(&transport)
            .get_trade_offers(&GetTradeOffersOptions::active())
            .await
            .unwrap();
        let request = &transport.requests()[0];

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url.host_str(), Some("api.steampowered.com"));
        assert_eq!(request.url.path(), "/IEconService/GetTradeOffers/v1/");
        assert_eq!(request.query_value("key").as_deref(), Some("apikey"));
        assert_eq!(request.query_value("active_only").as_deref(), Some("true"));
        assert_eq!(request.query_value("language").as_deref(), Some("english"));

        let sent = &offers.trade_offers_sent[0];

        assert_eq!(sent.tradeofferid, 5862138725);
        assert_eq!(sent.steamid_other, 76561197960278073);
        assert_eq!(sent.message, None);
        assert_eq!(sent.escrow_end_date, None);
        assert_eq!(sent.trade_offer_state, TradeOfferState::Active);
        assert_eq!(sent.items_to_give[0].instanceid, 11040578);

        let received = &offers.trade_offers_received[0];

        assert_eq!(received.tradeid, Some(5473891053741287622));
        assert_eq!(received.steamid_other, 76561198080179568);
        assert_eq!(received.partner().account_id(), 119913840);
        assert_eq!(received.message.as_deref(), Some("thanks"));
        assert_eq!(received.confirmation_method, ConfirmationMethod::MobileApp);
        assert!(received.items_to_receive[0].missing);
        assert!(!received.is_glitched());
        assert_eq!(received.items_to_receive[0].instanceid, 0);
        assert_eq!(offers.next_cursor, None);
    }

    #[tokio::test]
    async fn unlisted_state_does_not_fail_the_list() {
        let transport = Arc::new(MockTransport::new());

        transport.ok(r#"{"response":{"trade_offers_sent":[
            {"tradeofferid":"1","accountid_other":12345,"expiration_time":1675460218,"trade_offer_state":12,"time_created":1674250618,"time_updated":1674250618,"confirmation_method":9},
            {"tradeofferid":"2","accountid_other":12345,"expiration_time":1675460218,"trade_offer_state":2,"time_created":1674250618,"time_updated":1674250618}
        ]}}"#);

        let offers = api_with(&transport)
            .get_trade_offers(&GetTradeOffersOptions::default())
            .await
            .unwrap();
        let sent = &offers.trade_offers_sent;

        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].trade_offer_state, TradeOfferState::Unknown(12));
        assert_eq!(sent[0].confirmation_method, ConfirmationMethod::Unknown(9));
        assert!(sent[0].is_glitched());
        assert_eq!(sent[1].trade_offer_state, TradeOfferState::Active);
        assert_eq!(sent[1].confirmation_method, ConfirmationMethod::None);
    }

    #[tokio::test]
    async fn gets_missing_trade_offer() {
        let transport = Arc::new(MockTransport::new());

        transport.ok(r#"{"response":{}}"#);

        let offer = api_with(&transport).get_trade_offer(1).await.unwrap();

        assert_eq!(offer, None);
        assert_eq!(transport.requests()[0].query_value("tradeofferid").as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn gets_summary() {
        let transport = Arc::new(MockTransport::new());

        transport.ok(r#"{"response":{"pending_received_count":2,"new_received_count":1}}"#);

        let summary = api_with(&transport)
            .get_trade_offers_summary(&GetTradeOffersSummaryOptions::default())
            .await
            .unwrap();

        assert_eq!(summary.pending_received_count, 2);
        assert_eq!(summary.new_received_count, 1);
        assert_eq!(summary.escrow_sent_count, 0);
    }

    #[tokio::test]
    async fn api_methods_need_a_key() {
        let transport = Arc::new(MockTransport::new());
        let api = SteamTradeOfferAPI::builder()
            .transport(Arc::clone(&transport) as Arc<dyn Transport>)
            .build()
            .unwrap();
        let error = api.decline_offer(1).await.unwrap_err();

        assert!(matches!(error, Error::Session(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn declines_and_cancels_offers() {
        let transport = Arc::new(MockTransport::new());

        transport
            .ok(r#"{"response":{}}"#)
            .ok(r#"{"response":{}}"#);

        let api = api_with(&transport);

        api.decline_offer(100).await.unwrap();
        api.cancel_offer(200).await.unwrap();

        let requests = transport.requests();

        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].url.path(), "/IEconService/DeclineTradeOffer/v1/");
        assert_eq!(requests[0].query_value("key").as_deref(), Some("apikey"));
        assert_eq!(requests[0].form_value("tradeofferid"), Some("100"));
        assert_eq!(requests[1].url.path(), "/IEconService/CancelTradeOffer/v1/");
        assert_eq!(requests[1].form_value("tradeofferid"), Some("200"));
    }

    #[tokio::test]
    async fn non_success_status_is_http_error() {
        let transport = Arc::new(MockTransport::new());

        transport.respond(503, "");

        let error = api_with(&transport).cancel_offer(1).await.unwrap_err();

        assert!(matches!(error, Error::Http(status) if status.as_u16() == 503));
    }

    #[tokio::test]
    async fn status_is_reported_over_unsuccessful_body() {
        let transport = Arc::new(MockTransport::new());

        transport.respond(403, r#"{"success":false,"error":"Access is denied"}"#);

        let error = api_with(&transport).cancel_offer(1).await.unwrap_err();

        assert!(matches!(error, Error::Http(status) if status.as_u16() == 403));
    }

    #[tokio::test]
    async fn accepts_offer() {
        let transport = Arc::new(MockTransport::new());

        transport.ok(r#"{"tradeid":"5473891053741287622"}"#);

        let accepted = api_with(&transport).accept_offer(4321).await.unwrap();
        let request = &transport.requests()[0];

        assert_eq!(accepted.tradeid, Some(5473891053741287622));
        assert!(!accepted.needs_mobile_confirmation);
        assert_eq!(request.url.as_str(), "https://steamcommunity.com/tradeoffer/4321/accept");
        assert_eq!(request.referer.as_deref(), Some("https://steamcommunity.com/tradeoffer/4321/"));
        assert_eq!(request.form_value("sessionid"), Some("sid"));
        assert_eq!(request.form_value("serverid"), Some("1"));
        assert_eq!(request.form_value("tradeofferid"), Some("4321"));
    }

    #[tokio::test]
    async fn accept_error_message_is_reported_over_status() {
        let transport = Arc::new(MockTransport::new());

        transport.respond(500, r#"{"strError":"There was an error accepting this trade offer. (28)"}"#);

        let error = api_with(&transport).accept_offer(4321).await.unwrap_err();

        assert!(matches!(error, Error::Application(message) if message == "There was an error accepting this trade offer. (28)"));
    }

    #[tokio::test]
    async fn accept_needs_a_session() {
        let transport = Arc::new(MockTransport::new());
        let api = SteamTradeOfferAPI::builder()
            .api_key("apikey")
            .transport(Arc::clone(&transport) as Arc<dyn Transport>)
            .build()
            .unwrap();
        let error = api.accept_offer(1).await.unwrap_err();

        assert!(matches!(error, Error::Session(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn sends_offer() {
        let transport = Arc::new(MockTransport::new());

        transport.ok(r#"{"tradeofferid":"5862138725","needs_mobile_confirmation":true}"#);

        let offer = NewTradeOffer::builder(PartnerIdentity::community_id(76561197960278073))
            .items_to_give([item(1)])
            .items_to_receive([item(2)])
            .token("abc")
            .message("hello")
            .build();
        let sent = api_with(&transport).send_offer(&offer).await.unwrap();
        let request = &transport.requests()[0];

        assert_eq!(sent.tradeofferid, 5862138725);
        assert!(sent.needs_mobile_confirmation);
        assert_eq!(request.url.as_str(), "https://steamcommunity.com/tradeoffer/new/send");
        assert_eq!(request.referer.as_deref(), Some("https://steamcommunity.com/tradeoffer/new/?partner=12345&token=abc"));
        assert_eq!(request.form_value("partner"), Some("76561197960278073"));
        assert_eq!(request.form_value("tradeoffermessage"), Some("hello"));
        assert_eq!(request.form_value("trade_offer_create_params"), Some(r#"{"trade_offer_access_token":"abc"}"#));
        assert_eq!(request.form_value("tradeofferid_countered"), None);

        let json: serde_json::Value = serde_json::from_str(request.form_value("json_tradeoffer").unwrap()).unwrap();

        assert_eq!(json["me"]["assets"][0]["assetid"], "1");
        assert_eq!(json["them"]["assets"][0]["assetid"], "2");
    }

    #[tokio::test]
    async fn sends_counter_offer() {
        let transport = Arc::new(MockTransport::new());

        transport.ok(r#"{"tradeofferid":"5862138726"}"#);

        let offer = NewTradeOffer::builder(PartnerIdentity::account_id(12345))
            .items_to_receive([item(2)])
            .counter(5862138725)
            .build();

        api_with(&transport).send_offer(&offer).await.unwrap();

        let request = &transport.requests()[0];

        assert_eq!(request.referer.as_deref(), Some("https://steamcommunity.com/tradeoffer/5862138725/"));
        assert_eq!(request.form_value("tradeofferid_countered"), Some("5862138725"));
        assert_eq!(request.form_value("tradeoffermessage"), Some(""));
    }

    #[tokio::test]
    async fn empty_offer_is_not_sent() {
        let transport = Arc::new(MockTransport::new());
        let offer = NewTradeOffer::builder(PartnerIdentity::account_id(12345)).build();
        let error = api_with(&transport).send_offer(&offer).await.unwrap_err();

        assert!(matches!(error, Error::Parameter(ParameterError::EmptyOffer)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn gets_inventory() {
        let transport = Arc::new(MockTransport::new());

        transport.ok(include_str!("../inventory/fixtures/inventory_page.json"));

        let inventory = api_with(&transport)
            .get_inventory(&InventoryOptions::new(440, 2))
            .await
            .unwrap();

        assert_eq!(inventory.len(), 4);
        assert_eq!(transport.requests()[0].query_value("l").as_deref(), Some("english"));
    }

    #[tokio::test]
    async fn gets_partner_inventory() {
        let transport = Arc::new(MockTransport::new());

        transport.ok(include_str!("../inventory/fixtures/inventory_page.json"));

        let options = PartnerInventoryOptions::new(PartnerIdentity::account_id(12345), 440, 2);
        let inventory = api_with(&transport)
            .get_partner_inventory(&options)
            .await
            .unwrap();
        let request = &transport.requests()[0];

        assert_eq!(inventory.len(), 4);
        assert_eq!(request.query_value("sessionid").as_deref(), Some("sid"));
        assert_eq!(request.referer.as_deref(), Some("https://steamcommunity.com/tradeoffer/new/?partner=12345"));
    }

    #[tokio::test]
    async fn gets_receipt() {
        let transport = Arc::new(MockTransport::new());

        transport.ok(include_str!("../receipt/fixtures/receipt.html"));

        let items = api_with(&transport).get_receipt(5473891053741287622).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(
            transport.requests()[0].url.as_str(),
            "https://steamcommunity.com/trade/5473891053741287622/receipt/",
        );
    }

    #[tokio::test]
    async fn gets_offer_token() {
        let transport = Arc::new(MockTransport::new());

        transport.ok(r#"<html><body>
            <div class="trade_offer_access_url_ctn">
                <input type="text" id="trade_offer_access_url" value="https://steamcommunity.com/tradeoffer/new/?partner=12345&amp;token=Ab-Cd_ef" readonly>
            </div>
        </body></html>"#);

        let token = api_with(&transport).get_offer_token().await.unwrap();

        assert_eq!(token, "Ab-Cd_ef");
    }

    #[tokio::test]
    async fn offer_token_missing_from_page() {
        let transport = Arc::new(MockTransport::new());

        transport.ok("<html><body><h1>Sign In</h1></body></html>");

        let error = api_with(&transport).get_offer_token().await.unwrap_err();

        assert!(matches!(error, Error::Session(_)));
    }

    #[tokio::test]
    async fn failures_are_reported_to_hook() {
        let transport = Arc::new(MockTransport::new());
        let hook = Arc::new(RecordingHook::default());
        let api = SteamTradeOfferAPI::builder()
            .sessionid("sid")
            .transport(Arc::clone(&transport) as Arc<dyn Transport>)
            .diagnostic_hook(Arc::clone(&hook) as Arc<dyn crate::diagnostics::DiagnosticHook>)
            .build()
            .unwrap();

        transport.fail("connection reset");

        let error = api.accept_offer(1).await.unwrap_err();
        let events = hook.events.lock().unwrap();

        assert!(matches!(error, Error::Transport(_)));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].operation, "accept_offer");
    }
}
