use tracing::{debug, warn};

use crate::config::{normalize_base_url, LEDGER_PATH, VERIFY_PATH};
use crate::decode::{decode_chain, decode_ledger};
use crate::error::{AppError, Result};
use crate::model::{AuditChain, LedgerData};

/// Thin client for the public ledger API. One request per call, never
/// retried and never timed out.
#[derive(Debug, Clone)]
pub struct LedgerClient {
    http: reqwest::Client,
    base_url: String,
}

impl LedgerClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_http(http, base_url))
    }

    pub fn with_http(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn ledger_url(&self) -> String {
        format!("{}{}", self.base_url, LEDGER_PATH)
    }

    pub fn verify_url(&self) -> String {
        format!("{}{}", self.base_url, VERIFY_PATH)
    }

    /// `GET /api/public/ledger`, decoded and validated.
    pub async fn fetch_ledger(&self) -> Result<LedgerData> {
        let body = self.get(self.http.get(self.ledger_url()), "API").await?;
        let ledger = decode_ledger(&body)?;
        debug!(
            bets = ledger.nba.bets.len(),
            predictions = ledger.lottery.predictions.len(),
            audit_entries = ledger.audit.total_entries,
            "ledger decoded"
        );
        Ok(ledger)
    }

    /// `GET /api/public/audit/verify?chain=<chain>`.
    pub async fn verify_chain(&self, chain: &str) -> Result<AuditChain> {
        let request = self.http.get(self.verify_url()).query(&[("chain", chain)]);
        let body = self.get(request, "Verify").await?;
        let result = decode_chain(&body)?;
        debug!(chain, valid = result.valid, entries = result.entries, "chain verified");
        Ok(result)
    }

    async fn get(&self, request: reqwest::RequestBuilder, context: &'static str) -> Result<Vec<u8>> {
        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), url = %resp.url(), "{context} request failed");
            return Err(AppError::Http {
                context,
                status: status.as_u16(),
            });
        }
        Ok(resp.bytes().await?.to_vec())
    }
}
