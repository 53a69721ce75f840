//! Response parsers for the `/info` endpoint.
//!
//! The exchange reports numbers as decimal strings, occasionally as raw
//! JSON numbers. Individual fields that are missing or unparseable
//! default to zero; structural problems (wrong response shape) are
//! reported as `FeedError::Parse`.

use crate::error::{FeedError, FeedResult};
use hlmon_core::{FundingHistoryEntry, Liquidation, MarketStats};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;

/// Extract a decimal field, tolerating string or number encoding.
fn dec_field(obj: &Value, key: &str) -> Decimal {
    match obj.get(key) {
        Some(Value::String(s)) => s.parse().unwrap_or(Decimal::ZERO),
        Some(Value::Number(n)) => n.to_string().parse().unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Parse a `metaAndAssetCtxs` response into per-coin market stats.
///
/// The response is a two-element array `[meta, assetCtxs]` where
/// `meta.universe[i].name` names `assetCtxs[i]` positionally. A context
/// beyond the end of the universe gets a `COIN_{i}` placeholder name.
pub fn parse_market_stats(body: &Value) -> FeedResult<HashMap<String, MarketStats>> {
    let parts = body
        .as_array()
        .ok_or_else(|| FeedError::Parse("metaAndAssetCtxs response is not an array".to_string()))?;
    if parts.len() < 2 {
        return Err(FeedError::Parse(format!(
            "metaAndAssetCtxs response has {} elements, expected 2",
            parts.len()
        )));
    }

    let universe = parts[0]
        .get("universe")
        .and_then(|u| u.as_array())
        .ok_or_else(|| FeedError::Parse("meta is missing universe array".to_string()))?;
    let ctxs = parts[1]
        .as_array()
        .ok_or_else(|| FeedError::Parse("assetCtxs is not an array".to_string()))?;

    let mut markets = HashMap::with_capacity(ctxs.len());
    for (i, ctx) in ctxs.iter().enumerate() {
        let coin = universe
            .get(i)
            .and_then(|entry| entry.get("name"))
            .and_then(|n| n.as_str())
            .map(|n| n.to_string())
            .unwrap_or_else(|| format!("COIN_{i}"));

        let mark_px = dec_field(ctx, "markPx");
        let open_interest = dec_field(ctx, "openInterest");

        markets.insert(
            coin,
            MarketStats {
                open_interest,
                open_interest_usd: open_interest * mark_px,
                funding_rate: dec_field(ctx, "funding"),
                mark_px,
                day_ntl_vlm: dec_field(ctx, "dayNtlVlm"),
                prev_day_px: dec_field(ctx, "prevDayPx"),
            },
        );
    }

    Ok(markets)
}

/// Parse a `liquidations` response.
pub fn parse_liquidations(body: &Value) -> FeedResult<Vec<Liquidation>> {
    let entries = body
        .as_array()
        .ok_or_else(|| FeedError::Parse("liquidations response is not an array".to_string()))?;

    Ok(entries
        .iter()
        .map(|entry| Liquidation {
            coin: entry
                .get("coin")
                .and_then(|c| c.as_str())
                .unwrap_or("UNKNOWN")
                .to_string(),
            sz: dec_field(entry, "size"),
            px: dec_field(entry, "price"),
        })
        .collect())
}

/// Parse a `fundingHistory` response.
pub fn parse_funding_history(body: &Value) -> FeedResult<Vec<FundingHistoryEntry>> {
    let entries = body
        .as_array()
        .ok_or_else(|| FeedError::Parse("fundingHistory response is not an array".to_string()))?;

    Ok(entries
        .iter()
        .map(|entry| FundingHistoryEntry {
            coin: entry
                .get("coin")
                .and_then(|c| c.as_str())
                .unwrap_or("UNKNOWN")
                .to_string(),
            funding_rate: dec_field(entry, "fundingRate"),
            premium: dec_field(entry, "premium"),
            time: entry.get("time").and_then(|t| t.as_i64()).unwrap_or(0),
        })
        .collect())
}
