use steam_tradeoffers::SteamTradeOfferAPI;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    
    let cookies = std::env::var("COOKIES").expect("COOKIES missing")
        .split('&')
        .map(|s| s.to_string())
        .collect::<Vec<_>>();
    let tradeid = std::env::var("TRADEID").expect("TRADEID missing")
        .parse::<u64>()?;
    let api = SteamTradeOfferAPI::builder()
        .cookies(cookies)
        .build()?;
    let items = api.get_receipt(tradeid).await?;
    
    for item in items {
        let name = item.attributes.get("market_hash_name")
            .and_then(|name| name.as_str())
            .unwrap_or_default();
        
        println!("{} {name}", item.assetid);
    }
    
    Ok(())
}
