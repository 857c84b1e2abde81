//! Request parameter and response types shared by every endpoint.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The `{code, msg, data}` wrapper around every explorer response.
///
/// Only successful envelopes (`code == 0`) are ever handed to callers; a
/// non-zero code is surfaced as [`ApiError`](crate::ApiError) instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    pub msg: String,
    pub data: T,
}

/// Chain identifier attached to every request as `chainShortName`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chain {
    pub short_name: &'static str,
    pub full_name: &'static str,
    pub chain_id: u64,
}

impl Chain {
    pub const KLAYTN: Chain = Chain::new("KLAYTN", "KLAYTN", 8217);
    pub const ETH: Chain = Chain::new("ETH", "Ethereum", 1);
    pub const BSC: Chain = Chain::new("BSC", "BNB Chain", 56);
    pub const POLYGON: Chain = Chain::new("POLYGON", "Polygon", 137);

    /// Describe a chain not covered by the built-in constants.
    pub const fn new(short_name: &'static str, full_name: &'static str, chain_id: u64) -> Self {
        Self {
            short_name,
            full_name,
            chain_id,
        }
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::KLAYTN
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name)
    }
}

/// An account or contract address.
///
/// Addresses are passed through verbatim; checksum and format checks are left
/// to the explorer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Token standard filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolType {
    #[serde(rename = "token_20")]
    Token20,
    #[serde(rename = "token_721")]
    Token721,
    #[serde(rename = "token_1155")]
    Token1155,
}

impl ProtocolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Token20 => "token_20",
            Self::Token721 => "token_721",
            Self::Token1155 => "token_1155",
        }
    }
}

impl fmt::Display for ProtocolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `isFromOrTo` filter: only transactions sent from, or received by, the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    From,
    To,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::From => "from",
            Self::To => "to",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unix timestamp in milliseconds, the unit of the explorer's time filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }

    /// `None` if the value is outside the range `chrono` can represent.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.timestamp_millis())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of the address-summary endpoint.
///
/// The explorer reports numbers as decimal strings and omits fields that do
/// not apply to the chain, so every field falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressSummary {
    pub chain_full_name: String,
    pub chain_short_name: String,
    pub address: String,
    pub contract_address: String,
    pub balance: String,
    pub balance_symbol: String,
    pub transaction_count: String,
    pub verifying: String,
    pub send_amount: String,
    pub receive_amount: String,
    pub token_amount: String,
    pub total_token_value: String,
    pub create_contract_address: String,
    pub create_contract_transaction_hash: String,
    pub first_transaction_time: String,
    pub last_transaction_time: String,
    pub token: String,
    pub bandwidth: String,
    pub energy: String,
    pub voting_rights: String,
    pub unclaimed_voting_rewards: String,
    pub is_aa_address: bool,
}

impl AddressSummary {
    /// `true` when the address is a contract rather than an externally owned account.
    pub fn is_contract(&self) -> bool {
        !self.contract_address.is_empty() || !self.create_contract_transaction_hash.is_empty()
    }

    /// First activity time, if the explorer reported a parseable millisecond timestamp.
    pub fn first_seen(&self) -> Option<DateTime<Utc>> {
        parse_millis(&self.first_transaction_time)
    }

    /// Last activity time, if the explorer reported a parseable millisecond timestamp.
    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        parse_millis(&self.last_transaction_time)
    }
}

fn parse_millis(value: &str) -> Option<DateTime<Utc>> {
    value
        .parse::<i64>()
        .ok()
        .and_then(|millis| Timestamp(millis).to_datetime())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn protocol_type_tokens() {
        assert_eq!(ProtocolType::Token20.to_string(), "token_20");
        assert_eq!(ProtocolType::Token721.to_string(), "token_721");
        assert_eq!(ProtocolType::Token1155.to_string(), "token_1155");

        let parsed: ProtocolType = serde_json::from_value(json!("token_721")).expect("deserialize");
        assert_eq!(parsed, ProtocolType::Token721);
        assert_eq!(
            serde_json::to_value(ProtocolType::Token1155).expect("serialize"),
            json!("token_1155")
        );
    }

    #[test]
    fn direction_tokens() {
        assert_eq!(Direction::From.to_string(), "from");
        assert_eq!(Direction::To.to_string(), "to");
    }

    #[test]
    fn timestamp_from_datetime() {
        let at = DateTime::from_timestamp_millis(1_700_000_000_123).expect("valid timestamp");
        let ts = Timestamp::from(at);
        assert_eq!(ts.as_millis(), 1_700_000_000_123);
        assert_eq!(ts.to_string(), "1700000000123");
        assert_eq!(ts.to_datetime(), Some(at));
    }

    #[test]
    fn chain_constants() {
        assert_eq!(Chain::default(), Chain::KLAYTN);
        assert_eq!(Chain::KLAYTN.chain_id, 8217);
        assert_eq!(Chain::KLAYTN.to_string(), "KLAYTN");

        const CUSTOM: Chain = Chain::new("XLAYER", "X Layer", 196);
        assert_eq!(CUSTOM.short_name, "XLAYER");
    }

    #[test]
    fn address_summary_tolerates_missing_fields() {
        let summary: AddressSummary =
            serde_json::from_value(json!({ "chainFullName": "KLAYTN" })).expect("deserialize");
        assert_eq!(summary.chain_full_name, "KLAYTN");
        assert_eq!(summary.balance, "");
        assert!(!summary.is_aa_address);
        assert!(!summary.is_contract());
    }

    #[test]
    fn address_summary_full_payload() {
        let summary: AddressSummary = serde_json::from_value(json!({
            "chainFullName": "KLAYTN",
            "chainShortName": "KLAYTN",
            "address": "0x85c6627c4ed773cb7c32644b041f58a058b00d30",
            "contractAddress": "",
            "balance": "0.01",
            "balanceSymbol": "KLAY",
            "transactionCount": "3",
            "firstTransactionTime": "1700000000000",
            "lastTransactionTime": "not-a-number",
            "isAaAddress": true
        }))
        .expect("deserialize");

        assert_eq!(summary.balance_symbol, "KLAY");
        assert_eq!(summary.transaction_count, "3");
        assert!(summary.is_aa_address);
        assert_eq!(
            summary.first_seen().map(|t| t.timestamp_millis()),
            Some(1_700_000_000_000)
        );
        assert_eq!(summary.last_seen(), None);
    }

    #[test]
    fn envelope_round_trips_value_data() {
        let envelope: Envelope<serde_json::Value> = serde_json::from_value(json!({
            "code": 0,
            "msg": "",
            "data": [{ "balance": "1000" }]
        }))
        .expect("deserialize");
        assert_eq!(envelope.code, 0);
        assert_eq!(envelope.data[0]["balance"], "1000");
    }
}
