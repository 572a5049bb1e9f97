//! Alert Formatting
//!
//! Renders pipeline results into the Markdown cards handed to the notifier.
//! Pure string templating, no I/O.

use super::feeds::TokenProfile;
use super::snapshot::PoolSnapshot;

/// Explorer the alert links out to
pub const EXPLORER_BASE_URL: &str = "https://dexscreener.com";

/// Render a scored, passing snapshot into the potential-token alert card.
pub fn format_alert(snapshot: &PoolSnapshot, score: f64) -> String {
    let name = or_fallback(&snapshot.base_token.name, "Unknown");
    let symbol = or_fallback(&snapshot.base_token.symbol, "N/A");
    let address = or_fallback(&snapshot.base_token.address, "N/A");
    let chain = or_fallback(&snapshot.chain_id, "N/A");
    let liquidity = group_thousands(snapshot.liquidity.usd);
    let volume = group_thousands(snapshot.volume.h24);
    let price_change = snapshot.price_change.h24;
    let buys = snapshot.txns.h24.buys;
    let sells = snapshot.txns.h24.sells;

    format!(
        "🚀 **Potential Token Alert** 🚀\n\
         \n\
         🔹 **{name}** ($ {symbol})\n\
         🔗 **Chain ID:** {chain}\n\
         📜 **Contract Address:** `{address}`\n\
         💰 **Liquidity:** ${liquidity}\n\
         📊 **24H Trading Volume:** ${volume}\n\
         📈 **24H Price Change:** {price_change:.2}%\n\
         🛒 **Buy Transactions:** {buys}\n\
         📉 **Sell Transactions:** {sells}\n\
         🔥 **Potential Score:** {score:.2}\n\
         \n\
         🔍 [View on DexScreener]({EXPLORER_BASE_URL}/{chain}/{address})"
    )
}

/// Render a latest-listings profile into the new-listing announcement.
pub fn format_new_listing(profile: &TokenProfile) -> String {
    let chain = capitalize(&profile.chain_id);
    let address = &profile.token_address;
    let url = &profile.url;
    let description = profile
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or("No description available");

    format!(
        "🚀 **New Token Listed**\n\
         \n\
         **Chain:** {chain}\n\
         **Token Address:** `{address}`\n\
         🔗 [View on DexScreener]({url})\n\
         📝 Description: {description}\n"
    )
}

fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Round to whole units and insert comma separators, e.g. 150000.4 -> "150,000"
fn group_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
