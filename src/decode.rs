//! Boundary decoding for backend payloads.
//!
//! Shape errors come from serde; the checks below reject payloads that parse
//! but cannot be displayed faithfully.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::model::{AuditChain, BankrollPoint, LedgerData, LotteryPrediction, NbaBet};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl DecodeError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DecodeError::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub fn decode_ledger(body: &[u8]) -> Result<LedgerData, DecodeError> {
    let ledger: LedgerData = parse(body)?;
    validate_ledger(&ledger)?;
    Ok(ledger)
}

pub fn decode_chain(body: &[u8]) -> Result<AuditChain, DecodeError> {
    let chain: AuditChain = parse(body)?;
    validate_chain("chain", &chain)?;
    Ok(chain)
}

fn parse<T: DeserializeOwned>(body: &[u8]) -> Result<T, DecodeError> {
    Ok(serde_json::from_slice(body)?)
}

pub fn validate_ledger(ledger: &LedgerData) -> Result<(), DecodeError> {
    for (i, bet) in ledger.nba.bets.iter().enumerate() {
        validate_bet(i, bet)?;
    }
    validate_history(&ledger.nba.bankroll_history)?;
    for (i, prediction) in ledger.lottery.predictions.iter().enumerate() {
        validate_prediction(i, prediction)?;
    }
    validate_chain("audit.nba_chain", &ledger.audit.nba_chain)?;
    validate_chain("audit.lottery_chain", &ledger.audit.lottery_chain)?;
    Ok(())
}

fn validate_bet(index: usize, bet: &NbaBet) -> Result<(), DecodeError> {
    if !(0.0..=100.0).contains(&bet.confidence) {
        return Err(DecodeError::invalid(
            format!("nba.bets[{index}].confidence"),
            format!("{} is outside 0..=100", bet.confidence),
        ));
    }
    if !bet.odds.is_finite() || bet.odds < 0.0 {
        return Err(DecodeError::invalid(
            format!("nba.bets[{index}].odds"),
            format!("{} is not a usable decimal price", bet.odds),
        ));
    }
    Ok(())
}

/// Dates are ISO-8601 strings, so lexical order is chronological order.
fn validate_history(points: &[BankrollPoint]) -> Result<(), DecodeError> {
    for (i, pair) in points.windows(2).enumerate() {
        if pair[1].date < pair[0].date {
            return Err(DecodeError::invalid(
                format!("nba.bankroll_history[{}].date", i + 1),
                format!("{} comes before {}", pair[1].date, pair[0].date),
            ));
        }
    }
    Ok(())
}

fn validate_prediction(index: usize, prediction: &LotteryPrediction) -> Result<(), DecodeError> {
    if let Some(matches) = prediction.matches {
        let predicted = prediction.predicted_numbers.len();
        if matches as usize > predicted {
            return Err(DecodeError::invalid(
                format!("lottery.predictions[{index}].matches"),
                format!("{matches} matches for {predicted} predicted numbers"),
            ));
        }
    }
    Ok(())
}

fn validate_chain(field: &str, chain: &AuditChain) -> Result<(), DecodeError> {
    if !chain.valid && chain.broken_at.is_none() {
        return Err(DecodeError::invalid(
            format!("{field}.broken_at"),
            "a broken chain must name the first broken sequence",
        ));
    }
    Ok(())
}
