use crate::common::format_timestamp;
use crate::scanner::ArbitrageOpportunity;
use chrono::{DateTime, Local};

pub fn format_start_message(at: &DateTime<Local>) -> String {
    format!("✅ Monitoring started at {}.", format_timestamp(at))
}

pub fn format_stop_message(at: &DateTime<Local>) -> String {
    format!("❌ Monitoring stopped at {}.", format_timestamp(at))
}

pub fn format_silence_message(at: &DateTime<Local>) -> String {
    format!(
        "⚠ No arbitrage opportunities detected as of {}.",
        format_timestamp(at)
    )
}

pub fn format_opportunity_message(opportunity: &ArbitrageOpportunity) -> String {
    let token = &opportunity.token;
    let base = &opportunity.base_token;
    let buy = opportunity.buy_venue;
    let sell = opportunity.sell_venue;

    format!(
        "💰 Arbitrage Opportunity Detected!\n\
         Token to trade: {token}\n\
         Profit: {profit:.2}%\n\
         {buy} Price ({base}->{token}): {price_a}\n\
         {sell} Price ({base}->{token}): {price_b}\n\
         Trade Window: {start} to {end}\n\
         Suggested Action: Swap {base}->{token} on {buy}, then {token}->{base} on {sell}",
        profit = opportunity.profit_percentage,
        price_a = opportunity.price_venue_a,
        price_b = opportunity.price_venue_b,
        start = format_timestamp(&opportunity.window_start),
        end = format_timestamp(&opportunity.window_end),
    )
}
