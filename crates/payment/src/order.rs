use std::{fmt::Display, str::FromStr};

use common::types::Id;

/// One-time order reference: `ord-{chat}-{since_ms}-{nonce}`. The embedded
/// timestamp is where the confirmed-transfer scan starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OrderRef {
    chat_id: Id,
    since_ms: i64,
    nonce: u32,
}

impl OrderRef {
    pub(crate) fn new(chat_id: Id, since_ms: i64, nonce: u32) -> Self {
        Self {
            chat_id,
            since_ms,
            nonce,
        }
    }
    pub(crate) fn since_ms(&self) -> i64 {
        self.since_ms
    }
}

impl Display for OrderRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ord-{}-{}-{}", self.chat_id, self.since_ms, self.nonce)
    }
}

impl FromStr for OrderRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix("ord-").ok_or("missing prefix")?;
        // chat ids can be negative, split from the right
        let (rest, nonce) = rest.rsplit_once('-').ok_or("missing nonce")?;
        let (chat_id, since_ms) = rest.rsplit_once('-').ok_or("missing timestamp")?;
        Ok(Self {
            chat_id: chat_id.parse().map_err(|_| "bad chat id")?,
            since_ms: since_ms.parse().map_err(|_| "bad timestamp")?,
            nonce: nonce.parse().map_err(|_| "bad nonce")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let table = [
            OrderRef::new(100, 1_700_000_000_000, 7),
            OrderRef::new(-1001234, 0, u32::MAX),
        ];
        for (i, order) in table.into_iter().enumerate() {
            assert_eq!(order.to_string().parse::<OrderRef>(), Ok(order), "test table[{i}]");
        }
    }

    #[test]
    fn test_rejects_garbage() {
        for s in ["", "ord-", "ord-1-2", "inv-1-2-3", "ord-x-2-3"] {
            assert!(s.parse::<OrderRef>().is_err(), "{s}");
        }
    }
}
