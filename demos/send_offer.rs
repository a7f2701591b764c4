use steam_tradeoffers::{
    SteamTradeOfferAPI,
    SteamID,
    request::{NewTradeOffer, PartnerInventoryOptions},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (api_key, cookies) = get_session();
    let steamid_other = get_steamid("STEAMID_OTHER");
    let api = SteamTradeOfferAPI::builder()
        .api_key(api_key)
        .cookies(cookies)
        .build()?;
    let options = PartnerInventoryOptions::new(steamid_other, 440, 2);
    let inventory = api.get_partner_inventory(&options).await?;
    let items = inventory.into_iter().take(5);
    let offer = NewTradeOffer::builder(steamid_other)
        // Any items that implement Into<NewTradeOfferItem> are fine.
        .items_to_receive(items)
        .message("Hello!")
        .build();
    let sent = api.send_offer(&offer).await?;
    
    println!("Sent offer {}", sent.tradeofferid);
    
    if sent.needs_mobile_confirmation {
        println!("Offer needs to be confirmed on the mobile app");
    }
    
    Ok(())
}

fn get_steamid(key: &str) -> SteamID {
    let sid_str = std::env::var(key)
        .unwrap_or_else(|_| panic!("{key} missing"));
    
    SteamID::from(sid_str.parse::<u64>().unwrap())
}

/// Gets session from environment variable.
fn get_session() -> (String, Vec<String>) {
    dotenv::dotenv().ok();
    
    let api_key = std::env::var("API_KEY").expect("API_KEY missing");
    let cookies = std::env::var("COOKIES").expect("COOKIES missing")
        .split('&')
        .map(|s| s.to_string())
        .collect::<Vec<_>>();
    
    (api_key, cookies)
}
