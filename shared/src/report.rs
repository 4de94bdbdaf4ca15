//! Renders a [`SizingResult`] into the HTML report sent back to the chat.
//!
//! Rounding lives here and only here: quantity- and price-like fields get
//! 4 fractional digits, currency-like fields get 2. The underlying result
//! stays unrounded.

use rust_decimal::Decimal;

use crate::sizing::SizingResult;

const QTY_DP: u32 = 4;
const CCY_DP: u32 = 2;

pub fn render(result: &SizingResult) -> String {
    let entries_text = result
        .entries
        .iter()
        .enumerate()
        .map(|(i, price)| format!("E{}: {}", i + 1, price))
        .collect::<Vec<_>>()
        .join("\n");

    let risk_percent = (result.risk_fraction * Decimal::ONE_HUNDRED).normalize();

    format!(
        "🧮 <b>Position Sizing Result</b>\n\
         \n\
         📊 <b>Basic Info</b>\n\
         • Seed: {seed} USDT\n\
         • Leverage: {leverage}x\n\
         • Risk ({risk_percent}%): {total_risk} USDT\n\
         \n\
         💰 <b>Entry Plan</b>\n\
         {entries_text}\n\
         • Stop: {stop}\n\
         • Average entry: {avg_entry}\n\
         \n\
         📈 <b>Position Summary</b>\n\
         • Total quantity: {total_qty}\n\
         • Total size: {total_size} USDT\n\
         • Total margin: {total_margin} USDT\n\
         \n\
         🔄 <b>{entry_count}-Split Entry (per tranche)</b>\n\
         • Quantity: {per_qty}\n\
         • Size: {per_size} USDT\n\
         • Margin: {per_margin} USDT\n\
         \n\
         ⚠️ <b>Caution</b>\n\
         Watch for slippage when using 50-100x leverage.\n\
         The computed quantity caps the loss at {risk_percent}% of seed if stopped out.",
        seed = fmt_ccy(result.seed),
        leverage = result.leverage,
        risk_percent = risk_percent,
        total_risk = fmt_ccy(result.total_risk),
        entries_text = entries_text,
        stop = result.stop,
        avg_entry = fmt_qty(result.avg_entry),
        total_qty = fmt_qty(result.total_qty),
        total_size = fmt_ccy(result.total_size),
        total_margin = fmt_ccy(result.total_margin),
        entry_count = result.entry_count,
        per_qty = fmt_qty(result.per_qty),
        per_size = fmt_ccy(result.per_size),
        per_margin = fmt_ccy(result.per_margin),
    )
}

/// Quantity- and price-like fields: 4 fractional digits, trailing zeros
/// stripped.
fn fmt_qty(value: Decimal) -> String {
    value.round_dp(QTY_DP).normalize().to_string()
}

/// Currency-like fields: 2 fractional digits, trailing zeros stripped.
fn fmt_ccy(value: Decimal) -> String {
    value.round_dp(CCY_DP).normalize().to_string()
}
