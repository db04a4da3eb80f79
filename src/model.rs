use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Ledger envelope
// ---------------------------------------------------------------------------

/// Root document served by `GET /api/public/ledger`. Replaced wholesale on
/// every successful refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerData {
    pub experiment: Experiment,
    pub nba: NbaData,
    pub lottery: LotteryData,
    pub audit: AuditData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub name: String,
    pub description: String,
    pub started_at: String,
    pub initial_nba: f64,
    pub initial_lottery: f64,
}

// ---------------------------------------------------------------------------
// NBA betting
// ---------------------------------------------------------------------------

/// Aggregates are computed by the backend; the dashboard shows them as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NbaData {
    pub current_bankroll: f64,
    pub total_pnl: f64,
    pub roi_pct: f64,
    pub total_bets: u32,
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    pub pending: u32,
    pub win_rate: f64,
    pub streak: String,
    pub bets: Vec<NbaBet>,
    pub bankroll_history: Vec<BankrollPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NbaBet {
    pub id: i64,
    pub game_date: String,
    pub team_a: String,
    pub team_b: String,
    pub bet_type: String,
    pub bet_pick: String,
    /// 0–100.
    pub confidence: f64,
    /// Decimal odds.
    pub odds: f64,
    pub bet_amount: f64,
    pub result: BetResult,
    /// Only meaningful once `result` is no longer pending.
    pub profit_loss: f64,
    pub actual_score: Option<String>,
    pub prop_type: Option<String>,
    pub player_name: Option<String>,
    pub created_at: String,
    pub resolved_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankrollPoint {
    pub date: String,
    pub balance: f64,
    pub pnl: f64,
    pub cumulative_pnl: f64,
}

/// Outcome of a single bet. Values the dashboard does not know are kept
/// verbatim so they can still be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BetResult {
    Win,
    Loss,
    Push,
    Pending,
    Unknown(String),
}

impl BetResult {
    pub fn as_str(&self) -> &str {
        match self {
            BetResult::Win => "win",
            BetResult::Loss => "loss",
            BetResult::Push => "push",
            BetResult::Pending => "pending",
            BetResult::Unknown(raw) => raw,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, BetResult::Pending)
    }
}

impl From<String> for BetResult {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "win" => BetResult::Win,
            "loss" => BetResult::Loss,
            "push" => BetResult::Push,
            "pending" => BetResult::Pending,
            _ => BetResult::Unknown(raw),
        }
    }
}

impl From<BetResult> for String {
    fn from(result: BetResult) -> Self {
        result.as_str().to_string()
    }
}

impl std::fmt::Display for BetResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Lottery predictions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotteryData {
    pub total_predictions: u32,
    pub total_resolved: u32,
    pub avg_matches: f64,
    pub best_match: Option<BestMatch>,
    pub predictions: Vec<LotteryPrediction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestMatch {
    pub lottery_key: LotteryKey,
    pub matches: u32,
    pub predicted: Vec<u32>,
    pub actual: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotteryPrediction {
    pub id: i64,
    pub lottery_key: LotteryKey,
    pub predicted_numbers: Vec<u32>,
    pub confidence: ConfidenceTier,
    pub target_concurso: Option<u64>,
    /// Attached once the draw happened.
    pub actual_numbers: Option<Vec<u32>>,
    pub matches: Option<u32>,
    pub draw_date: String,
    pub created_at: String,
    pub resolved_at: Option<String>,
}

/// The eight lottery products the backend predicts for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LotteryKey {
    MegaSena,
    Quina,
    Lotofacil,
    Lotomania,
    DuplaSena,
    DiaDeSorte,
    SuperSete,
    Timemania,
    Other(String),
}

impl LotteryKey {
    pub fn as_str(&self) -> &str {
        match self {
            LotteryKey::MegaSena => "mega-sena",
            LotteryKey::Quina => "quina",
            LotteryKey::Lotofacil => "lotofacil",
            LotteryKey::Lotomania => "lotomania",
            LotteryKey::DuplaSena => "dupla-sena",
            LotteryKey::DiaDeSorte => "dia-de-sorte",
            LotteryKey::SuperSete => "super-sete",
            LotteryKey::Timemania => "timemania",
            LotteryKey::Other(raw) => raw,
        }
    }

    /// Display name; unknown keys show their raw key.
    pub fn label(&self) -> &str {
        match self {
            LotteryKey::MegaSena => "Mega-Sena",
            LotteryKey::Quina => "Quina",
            LotteryKey::Lotofacil => "Lotofacil",
            LotteryKey::Lotomania => "Lotomania",
            LotteryKey::DuplaSena => "Dupla Sena",
            LotteryKey::DiaDeSorte => "Dia de Sorte",
            LotteryKey::SuperSete => "Super Sete",
            LotteryKey::Timemania => "Timemania",
            LotteryKey::Other(raw) => raw,
        }
    }
}

impl From<String> for LotteryKey {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "mega-sena" => LotteryKey::MegaSena,
            "quina" => LotteryKey::Quina,
            "lotofacil" => LotteryKey::Lotofacil,
            "lotomania" => LotteryKey::Lotomania,
            "dupla-sena" => LotteryKey::DuplaSena,
            "dia-de-sorte" => LotteryKey::DiaDeSorte,
            "super-sete" => LotteryKey::SuperSete,
            "timemania" => LotteryKey::Timemania,
            _ => LotteryKey::Other(raw),
        }
    }
}

impl From<LotteryKey> for String {
    fn from(key: LotteryKey) -> Self {
        key.as_str().to_string()
    }
}

impl std::fmt::Display for LotteryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Coarse confidence label attached to a lottery prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConfidenceTier {
    Alto,
    Medio,
    Baixo,
    Other(String),
}

impl ConfidenceTier {
    pub fn as_str(&self) -> &str {
        match self {
            ConfidenceTier::Alto => "alto",
            ConfidenceTier::Medio => "medio",
            ConfidenceTier::Baixo => "baixo",
            ConfidenceTier::Other(raw) => raw,
        }
    }
}

impl From<String> for ConfidenceTier {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "alto" => ConfidenceTier::Alto,
            "medio" => ConfidenceTier::Medio,
            "baixo" => ConfidenceTier::Baixo,
            _ => ConfidenceTier::Other(raw),
        }
    }
}

impl From<ConfidenceTier> for String {
    fn from(tier: ConfidenceTier) -> Self {
        tier.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// Audit trail
// ---------------------------------------------------------------------------

/// Verification summary for one hash chain, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditChain {
    pub valid: bool,
    pub entries: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_hash: Option<String>,
    /// First sequence whose link does not match, when `valid` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broken_at: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditData {
    pub nba_chain: AuditChain,
    pub lottery_chain: AuditChain,
    pub total_entries: u64,
    pub github_repo: Option<String>,
    pub recent_entries: Vec<AuditEntry>,
}

/// One hash-chain link. `prev_hash` equals the preceding entry's
/// `entry_hash`; the backend enforces that, the dashboard only shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    pub chain: String,
    pub sequence: u64,
    pub event_type: AuditEventType,
    pub entry_hash: String,
    pub prev_hash: String,
    pub data_hash: String,
    pub git_sha: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuditEventType {
    Prediction,
    Resolution,
    Other(String),
}

impl AuditEventType {
    pub fn as_str(&self) -> &str {
        match self {
            AuditEventType::Prediction => "prediction",
            AuditEventType::Resolution => "resolution",
            AuditEventType::Other(raw) => raw,
        }
    }
}

impl From<String> for AuditEventType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "prediction" => AuditEventType::Prediction,
            "resolution" => AuditEventType::Resolution,
            _ => AuditEventType::Other(raw),
        }
    }
}

impl From<AuditEventType> for String {
    fn from(kind: AuditEventType) -> Self {
        kind.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_result_keeps_raw_value() {
        let result: BetResult = serde_json::from_str(r#""void""#).unwrap();
        assert_eq!(result, BetResult::Unknown("void".to_string()));
        assert_eq!(serde_json::to_string(&result).unwrap(), r#""void""#);
    }

    #[test]
    fn lottery_labels_cover_known_keys() {
        let cases = [
            ("mega-sena", "Mega-Sena"),
            ("quina", "Quina"),
            ("lotofacil", "Lotofacil"),
            ("lotomania", "Lotomania"),
            ("dupla-sena", "Dupla Sena"),
            ("dia-de-sorte", "Dia de Sorte"),
            ("super-sete", "Super Sete"),
            ("timemania", "Timemania"),
        ];
        for (key, label) in cases {
            let parsed = LotteryKey::from(key.to_string());
            assert!(!matches!(parsed, LotteryKey::Other(_)), "{key} should be known");
            assert_eq!(parsed.label(), label);
        }
        assert_eq!(LotteryKey::from("loteca".to_string()).label(), "loteca");
    }

    #[test]
    fn chain_without_optional_fields_parses() {
        let chain: AuditChain = serde_json::from_str(r#"{"valid":true,"entries":0}"#).unwrap();
        assert!(chain.valid);
        assert_eq!(chain.last_hash, None);
        assert_eq!(chain.broken_at, None);
    }
}
