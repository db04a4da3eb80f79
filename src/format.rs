//! Client-side formatting helpers. Pure string functions, no styling.

use crate::model::{AuditChain, BetResult};

/// US-locale currency: `$1,234.56`, `-$1,234.56`.
pub fn format_usd(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", group_thousands(abs / 100), abs % 100)
}

/// Currency with an explicit `+` on gains, as used for P&L figures.
pub fn format_signed_usd(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", format_usd(value))
    } else {
        format_usd(value)
    }
}

/// Card headline P&L: `+` for anything non-negative, so a flat pool reads
/// `+$0.00`.
pub fn format_headline_pnl(value: f64) -> String {
    if value >= 0.0 {
        format!("+{}", format_usd(value))
    } else {
        format_usd(value)
    }
}

/// One decimal place, `+` for anything non-negative (`+0.0%` for zero).
pub fn format_pct(value: f64) -> String {
    // Normalise -0.0 so it does not render as "+-0.0%".
    let value = if value == 0.0 { 0.0 } else { value };
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{value:.1}%")
}

/// Bet P&L cell: `-` while the bet is unresolved.
pub fn format_bet_pnl(result: &BetResult, profit_loss: f64) -> String {
    if result.is_pending() {
        "-".to_string()
    } else {
        format_signed_usd(profit_loss)
    }
}

/// Win rate exactly as the backend sent it (`62.5%`, `60%`).
pub fn format_win_rate(rate: f64) -> String {
    format!("{rate}%")
}

pub fn format_odds(odds: f64) -> String {
    format!("{odds:.2}")
}

pub fn format_confidence(confidence: f64) -> String {
    format!("{confidence:.0}%")
}

/// Lottery ball label, zero-padded to two digits.
pub fn format_ball(n: u32) -> String {
    format!("{n:02}")
}

pub fn format_record(wins: u32, losses: u32, pushes: u32) -> String {
    format!("{wins}W {losses}L {pushes}P")
}

/// `matches/predicted`, or `-` before the draw.
pub fn format_matches(matches: Option<u32>, predicted: usize) -> String {
    match matches {
        Some(m) => format!("{m}/{predicted}"),
        None => "-".to_string(),
    }
}

/// Contest number as `#n`. Missing or zero contests render `#-`.
pub fn format_contest(contest: Option<u64>) -> String {
    match contest {
        Some(c) if c > 0 => format!("#{c}"),
        _ => "#-".to_string(),
    }
}

/// Empty strings render as `-`.
pub fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

/// First `n` characters, no marker.
pub fn prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Hash shortened to `n` characters followed by `...`.
pub fn short_hash(hash: &str, n: usize) -> String {
    format!("{}...", prefix(hash, n))
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        format!("{}…", prefix(s, max.saturating_sub(1)))
    }
}

/// Chain badge: `INTACT`, or `BROKEN #<first broken sequence>`.
pub fn chain_status(chain: &AuditChain) -> String {
    if chain.valid {
        "INTACT".to_string()
    } else {
        match chain.broken_at {
            Some(seq) => format!("BROKEN #{seq}"),
            None => "BROKEN #?".to_string(),
        }
    }
}

/// Latency in ms for the footer: `840ms`, `1.2s`, `—` when unknown.
pub fn format_latency_ms(ms: Option<u64>) -> String {
    match ms {
        Some(d) if d >= 1000 => format!("{:.1}s", d as f64 / 1000.0),
        Some(d) => format!("{d}ms"),
        None => "—".to_string(),
    }
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    while n >= 1000 {
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.push(n.to_string());
    groups.reverse();
    groups.join(",")
}
