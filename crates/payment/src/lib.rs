//! TRC-20/USDT payment indexer backed by the TronGrid API.
//!
//! Deposits all land on one configured receiver address; an order reference
//! pins the moment the deposit order was opened, and the confirmed amount
//! for an order is the sum of confirmed inbound token transfers since that
//! moment. Order references are one-time, so a consumed order can never
//! resurface an old transfer.
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;

use common::{
    types::{Id, MicroUsdt},
    DateTime,
};
use entitlements::{DepositAddress, IndexerError, PaymentIndexer};

mod order;

use order::OrderRef;

const API_TIMEOUT: Duration = Duration::from_secs(10);
const EVENTS_PAGE_LIMIT: u32 = 200;

#[derive(Debug, Clone)]
pub struct TronGrid {
    client: Client,
    base_url: String,
    api_key: String,
    contract: String,
    receiver: String,
}

impl TronGrid {
    pub fn new(base_url: &str, api_key: &str, contract: &str, receiver: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(API_TIMEOUT).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            contract: contract.to_string(),
            receiver: receiver.to_lowercase(),
        })
    }
    pub fn is_configured(&self) -> bool {
        !self.contract.is_empty() && !self.receiver.is_empty()
    }
    async fn fetch_events(&self, since_ms: i64) -> Result<Vec<TokenEvent>, IndexerError> {
        let url = format!("{}/v1/contracts/{}/events", self.base_url, self.contract);
        let limit = EVENTS_PAGE_LIMIT.to_string();
        let since = since_ms.to_string();
        let mut req = self.client.get(&url).query(&[
            ("only_confirmed", "true"),
            ("only_to", "true"),
            ("limit", limit.as_str()),
            ("min_block_timestamp", since.as_str()),
        ]);
        if !self.api_key.is_empty() {
            req = req.header("TRON-PRO-API-KEY", &self.api_key);
        }

        let res = req
            .send()
            .await
            .map_err(|e| IndexerError::new(format!("events request failed: {e}")))?;
        if !res.status().is_success() {
            return Err(IndexerError::new(format!("events request failed: {}", res.status())));
        }

        let body: EventsResponse = res
            .json()
            .await
            .map_err(|e| IndexerError::new(format!("bad events response: {e}")))?;
        Ok(body.data)
    }
}

#[async_trait]
impl PaymentIndexer for TronGrid {
    async fn create_deposit_address(&self, chat_id: Id) -> Result<DepositAddress, IndexerError> {
        if !self.is_configured() {
            return Err(IndexerError::new("TRC-20 receiver is not configured"));
        }
        let nonce: u32 = rand::thread_rng().gen();
        let order = OrderRef::new(chat_id, DateTime::now_millis(), nonce);
        log::debug!("opening order {order} for chat {chat_id}");
        Ok(DepositAddress {
            address: self.receiver.clone(),
            order_ref: order.to_string(),
        })
    }
    async fn confirmed_amount(&self, order_ref: &str) -> Result<MicroUsdt, IndexerError> {
        let order: OrderRef = order_ref
            .parse()
            .map_err(|e| IndexerError::new(format!("bad order reference {order_ref}: {e}")))?;
        let events = self.fetch_events(order.since_ms()).await?;
        Ok(sum_confirmed(&events, &self.receiver))
    }
}

#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(default)]
    data: Vec<TokenEvent>,
}

#[derive(Debug, Deserialize)]
struct TokenEvent {
    #[serde(default)]
    result: EventResult,
}

#[derive(Debug, Default, Deserialize)]
struct EventResult {
    to_address: Option<String>,
    /// Token amount as a decimal string in the smallest unit
    value: Option<String>,
}

fn sum_confirmed(events: &[TokenEvent], receiver: &str) -> MicroUsdt {
    events
        .iter()
        .filter(|ev| ev.result.to_address.as_deref() == Some(receiver))
        .filter_map(|ev| ev.result.value.as_deref())
        .filter_map(|v| v.parse::<MicroUsdt>().ok())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(json: &str) -> Vec<TokenEvent> {
        serde_json::from_str::<EventsResponse>(json).unwrap().data
    }

    #[test]
    fn test_sum_confirmed() {
        let data = events(
            r#"{"data": [
                {"result": {"to_address": "trecv", "value": "30000000"}},
                {"result": {"to_address": "trecv", "value": "500000"}},
                {"result": {"to_address": "tother", "value": "90000000"}},
                {"result": {"to_address": "trecv"}},
                {"result": {"to_address": "trecv", "value": "not-a-number"}}
            ]}"#,
        );
        assert_eq!(sum_confirmed(&data, "trecv"), 30_500_000);
        assert_eq!(sum_confirmed(&data, "tmissing"), 0);
    }

    #[test]
    fn test_empty_response() {
        assert!(events(r#"{}"#).is_empty());
        assert_eq!(sum_confirmed(&events(r#"{"data": []}"#), "trecv"), 0);
    }
}
