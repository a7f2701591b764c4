use steam_tradeoffers::{SteamTradeOfferAPI, request::InventoryOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cookies = get_cookies();
    let api = SteamTradeOfferAPI::builder()
        .cookies(cookies)
        .language("english")
        .build()?;
    // Only tradable items are returned unless tradable_only is turned off.
    let inventory = api.get_inventory(&InventoryOptions::new(440, 2)).await?;
    
    println!("{} items in inventory", inventory.len());
    
    if let Some(item) = inventory.first() {
        println!("First item: {}", item.description.name().unwrap_or_default());
    }

    Ok(())
}

/// Gets cookies from environment variable.
fn get_cookies() -> Vec<String> {
    dotenv::dotenv().ok();
    
    std::env::var("COOKIES").expect("COOKIES missing")
        .split('&')
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
}
