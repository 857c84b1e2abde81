//! Example: Query the OKLink explorer for KLAYTN data.
//!
//! Run with: cargo run --example klaytn
//!
//! Set `OKLINK_BASE_URL` to target a proxy, and `RUST_LOG=oklink_explorer=debug`
//! to see each outgoing request.

use oklink_explorer::client::Result;
use oklink_explorer::endpoints::*;
use oklink_explorer::{Chain, ClientConfig, OklinkClient, ProtocolType};
use tracing_subscriber::EnvFilter;

const ADDRESS: &str = "0x85c6627c4ed773cb7c32644b041f58a058b00d30";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut config = ClientConfig::from_env(Chain::KLAYTN)?;
    if let Ok(key) = std::env::var("OKLINK_API_KEY") {
        config = config.with_api_key(key);
    }
    let client = OklinkClient::new(config);

    println!("=== OKLink Explorer Client ({}) ===\n", Chain::KLAYTN.full_name);

    // 1. Address summary
    println!("1. Fetching address summary...");
    let summary = client
        .address_summary(AddressSummaryRequest::new(ADDRESS))
        .await?
        .data;
    println!("   Balance: {} {}", summary.balance, summary.balance_symbol);
    println!("   Transactions: {}", summary.transaction_count);
    if let Some(first) = summary.first_seen() {
        println!("   First seen: {first}");
    }
    println!();

    // 2. Token balances
    println!("2. Fetching token balances...");
    let balances = client
        .address_token_balance(
            AddressTokenBalanceRequest::new(ADDRESS, ProtocolType::Token20).limit(5),
        )
        .await?;
    println!("   {}", balances.data);
    println!();

    // 3. Latest normal transactions
    println!("3. Fetching latest transactions...");
    let transactions = client
        .address_normal_transaction_list(AddressNormalTransactionListRequest::new(ADDRESS).limit(3))
        .await?;
    println!("   {}", transactions.data);
    println!();

    // 4. Batch balances
    println!("4. Fetching batch balances...");
    let batch = client
        .batch_address_balances(BatchAddressBalancesRequest::new([
            ADDRESS,
            "0x0000000000000000000000000000000000000000",
        ]))
        .await?;
    println!("   {}", batch.data);

    println!("\n=== Done! ===");
    Ok(())
}
