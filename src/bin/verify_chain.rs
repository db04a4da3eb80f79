use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ledger_dashboard::client::LedgerClient;
use ledger_dashboard::config::{Config, CHAINS};
use ledger_dashboard::format::{chain_status, short_hash};
use ledger_dashboard::model::AuditChain;

/// Ask the ledger backend to re-verify its hash chains.
#[derive(Parser)]
#[command(name = "verify-chain")]
struct Args {
    /// API base URL. Defaults to LEDGER_API_URL or the build-time value.
    #[arg(short, long)]
    url: Option<String>,
    /// Chains to verify. Defaults to every chain the backend keeps.
    chains: Vec<String>,
}

fn status_line(chain: &str, result: &AuditChain) -> String {
    let mut line = format!("{chain:<10} {:<12} {} entries", chain_status(result), result.entries);
    if let Some(hash) = &result.last_hash {
        line.push_str(&format!("  last {}", short_hash(hash, 24)));
    }
    line
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .with_writer(std::io::stderr)
        .init();

    let base_url = args.url.unwrap_or(cfg.api_url);
    let client = match LedgerClient::new(&base_url) {
        Ok(c) => c,
        Err(e) => {
            error!("Cannot build HTTP client: {e}");
            std::process::exit(1);
        }
    };

    let chains: Vec<String> = if args.chains.is_empty() {
        CHAINS.iter().map(|c| c.to_string()).collect()
    } else {
        args.chains
    };

    let mut all_intact = true;
    for chain in &chains {
        match client.verify_chain(chain).await {
            Ok(result) => {
                info!(chain = %chain, valid = result.valid, entries = result.entries, "verified");
                all_intact &= result.valid;
                println!("{}", status_line(chain, &result));
            }
            Err(e) => {
                error!(chain = %chain, "verification failed: {e}");
                all_intact = false;
                println!("{chain:<10} ERROR        {e}");
            }
        }
    }

    if !all_intact {
        std::process::exit(1);
    }
}
