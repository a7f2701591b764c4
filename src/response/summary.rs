use serde::{Serialize, Deserialize};

/// Counts of trade offers by category, from `GetTradeOffersSummary`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TradeOffersSummary {
    pub pending_received_count: u32,
    pub new_received_count: u32,
    pub updated_received_count: u32,
    pub historical_received_count: u32,
    pub pending_sent_count: u32,
    pub newly_accepted_sent_count: u32,
    pub updated_sent_count: u32,
    pub historical_sent_count: u32,
    pub escrow_received_count: u32,
    pub escrow_sent_count: u32,
}
