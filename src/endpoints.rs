//! Request types for every explorer endpoint.
//!
//! The structs and their [`Endpoint`] impls are generated by `build.rs` from
//! `endpoints.json`. Each request has a `new` constructor taking the required
//! parameters and one chained setter per optional parameter:
//!
//! ```
//! use oklink_explorer::endpoints::AddressTransactionListRequest;
//! use oklink_explorer::{Direction, ProtocolType};
//!
//! let request = AddressTransactionListRequest::new("0x85c6627c4ed773cb7c32644b041f58a058b00d30")
//!     .protocol_type(ProtocolType::Token20)
//!     .is_from_or_to(Direction::To)
//!     .limit(50);
//! assert_eq!(request.page, None);
//! ```

use crate::query::{Endpoint, QueryParams, ValidationError};
use crate::types::{Address, AddressSummary, Direction, ProtocolType, Timestamp};

/// Static description of a generated endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointInfo {
    /// Client method name, e.g. `address_summary`.
    pub name: &'static str,
    pub group: &'static str,
    /// Path below `/api/v5/explorer/`.
    pub path: &'static str,
    pub batch_param: Option<&'static str>,
    pub batch_limit: Option<usize>,
}

impl EndpointInfo {
    /// Look up an endpoint by client method name.
    pub fn find(name: &str) -> Option<&'static EndpointInfo> {
        ENDPOINTS.iter().find(|info| info.name == name)
    }
}

include!(concat!(env!("OUT_DIR"), "/endpoints.rs"));

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::query::params_of;

    fn keys(params: &QueryParams) -> Vec<&'static str> {
        params.iter().map(|(k, _)| k).collect()
    }

    fn addresses(n: usize) -> Vec<Address> {
        (0..n).map(|i| Address(format!("0x{i:040x}"))).collect()
    }

    #[test]
    fn catalogue_paths_are_unique() {
        let mut seen = HashSet::new();
        for info in ENDPOINTS {
            assert!(seen.insert(info.path), "duplicate path {}", info.path);
        }
        assert_eq!(ENDPOINTS.len(), 34);
    }

    #[test]
    fn catalogue_batch_limits() {
        let limit = |name| EndpointInfo::find(name).and_then(|info| info.batch_limit);

        assert_eq!(limit("batch_address_balances"), Some(100));
        assert_eq!(limit("batch_address_token_balances"), Some(50));
        assert_eq!(limit("batch_address_normal_transactions"), Some(50));
        assert_eq!(limit("batch_address_internal_transactions"), Some(20));
        assert_eq!(limit("batch_address_token_transactions"), Some(20));
        assert_eq!(limit("batch_transaction_details"), Some(20));
        assert_eq!(limit("batch_internal_transaction_details"), Some(20));
        assert_eq!(limit("batch_token_transaction_details"), Some(20));
        assert_eq!(limit("address_summary"), None);
        assert_eq!(
            EndpointInfo::find("batch_transaction_details").and_then(|info| info.batch_param),
            Some("txIds")
        );
    }

    #[test]
    fn trait_constants_match_catalogue() {
        assert_eq!(AddressSummaryRequest::PATH, "address/address-summary");
        assert_eq!(BatchAddressBalancesRequest::BATCH_LIMIT, Some(100));
        assert_eq!(BatchAddressTokenBalancesRequest::BATCH_LIMIT, Some(50));
        assert_eq!(BatchTokenTransactionDetailsRequest::BATCH_LIMIT, Some(20));
        assert_eq!(TokenListRequest::BATCH_LIMIT, None);
        assert_eq!(
            EndpointInfo::find("large_transaction_list").map(|info| info.path),
            Some(LargeTransactionListRequest::PATH)
        );
    }

    #[test]
    fn required_params_only() {
        let request = AddressTokenBalanceRequest::new("0xabc", ProtocolType::Token721);
        let params = params_of(&request).unwrap();
        assert_eq!(keys(&params), vec!["address", "protocolType"]);
        assert_eq!(params.get("protocolType"), Some("token_721"));
    }

    #[test]
    fn optional_params_follow_in_table_order() {
        let request = AddressTransactionListRequest::new("0xabc")
            .limit(20)
            .is_from_or_to(Direction::From)
            .start_block_height(100)
            .symbol("USDT");
        let params = params_of(&request).unwrap();

        assert_eq!(
            keys(&params),
            vec!["address", "symbol", "startBlockHeight", "isFromOrTo", "limit"]
        );
        assert_eq!(params.get("isFromOrTo"), Some("from"));
        assert_eq!(params.get("startBlockHeight"), Some("100"));
        assert_eq!(params.get("endBlockHeight"), None);
        assert_eq!(params.get("page"), None);
    }

    #[test]
    fn parameterless_requests_default() {
        let request = UnconfirmedTransactionListRequest::default();
        assert_eq!(request, UnconfirmedTransactionListRequest::new());
        assert!(params_of(&request).unwrap().is_empty());

        let request = RichListRequest::new().address("0xabc");
        assert_eq!(keys(&params_of(&request).unwrap()), vec!["address"]);
    }

    #[test]
    fn large_transaction_threshold_is_sent_as_type() {
        let request = LargeTransactionListRequest::new().min_amount("100").height(42);
        let params = params_of(&request).unwrap();
        assert_eq!(params.get("type"), Some("100"));
        assert_eq!(params.get("height"), Some("42"));
    }

    #[test]
    fn token_list_time_range_in_millis() {
        let start = chrono::DateTime::from_timestamp_millis(1_690_000_000_000).unwrap();
        let request = TokenListRequest::new()
            .start_time(start)
            .end_time(Timestamp::from_millis(1_700_000_000_000))
            .order_by("totalMarketCap");
        let params = params_of(&request).unwrap();

        assert_eq!(params.get("startTime"), Some("1690000000000"));
        assert_eq!(params.get("endTime"), Some("1700000000000"));
        assert_eq!(params.get("orderBy"), Some("totalMarketCap"));
    }

    #[test]
    fn batch_param_precedes_required_and_optional() {
        let request = BatchAddressTokenTransactionsRequest::new(addresses(2), 1_000, 2_000)
            .protocol_type(ProtocolType::Token20)
            .page(1);
        let params = params_of(&request).unwrap();
        assert_eq!(
            keys(&params),
            vec![
                "addresses",
                "startBlockHeight",
                "endBlockHeight",
                "protocolType",
                "page"
            ]
        );
    }

    #[test]
    fn batch_limits_enforced_per_endpoint() {
        assert!(params_of(&BatchAddressBalancesRequest::new(addresses(100))).is_ok());
        assert_eq!(
            params_of(&BatchAddressBalancesRequest::new(addresses(101))),
            Err(ValidationError::BatchTooLarge {
                param: "addresses",
                max: 100,
                actual: 101,
            })
        );
        assert!(matches!(
            params_of(&BatchAddressNormalTransactionsRequest::new(addresses(51))),
            Err(ValidationError::BatchTooLarge { max: 50, .. })
        ));
        assert!(matches!(
            params_of(&BatchAddressInternalTransactionsRequest::new(addresses(21))),
            Err(ValidationError::BatchTooLarge { max: 20, .. })
        ));

        let tx_ids: Vec<String> = (0..21).map(|i| format!("0x{i:064x}")).collect();
        assert!(matches!(
            params_of(&BatchTransactionDetailsRequest::new(tx_ids.clone())),
            Err(ValidationError::BatchTooLarge { param: "txIds", max: 20, .. })
        ));
        let within_limit = BatchInternalTransactionDetailsRequest::new(tx_ids.into_iter().take(20));
        assert!(params_of(&within_limit).is_ok());
    }

    #[test]
    fn batch_token_transfer_paging_keys() {
        let request = BatchTokenTransactionDetailsRequest::new(["0xaa", "0xbb"])
            .page(2)
            .limit(10);
        let params = params_of(&request).unwrap();
        assert_eq!(keys(&params), vec!["txIds", "page", "limit"]);
        assert_eq!(params.get("txIds"), Some("0xaa,0xbb"));
    }

    #[test]
    fn empty_transaction_id_is_rejected() {
        assert_eq!(
            params_of(&TransactionDetailsRequest::new("")),
            Err(ValidationError::EmptyValue { param: "txId" })
        );
    }
}
