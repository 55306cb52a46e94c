use teloxide::types::{ChatId as TgChatId, Recipient, UserId as TgUserId};

pub type Id = i64;

/// USDT amount in the token's smallest unit (6 decimals)
pub type MicroUsdt = i64;

pub const MICRO_USDT: i64 = 1_000_000;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub u64);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChatId(pub i64);

macro_rules! cast {
    ($($from:ty => $to:ty : $value:ident => $convert:expr),* $(,)?) => {
        $(impl From<$from> for $to {
            fn from($value: $from) -> Self {
                $convert
            }
        })*
    };
}

cast!(
    i64 => ChatId: v => Self(v),

    ChatId => UserId: v => Self(v.0 as _),
    UserId => ChatId: v => Self(v.0 as _),

    ChatId => Recipient: v => Recipient::Id(v.into()),
    UserId => Recipient: v => Recipient::Id(v.into()),

    ChatId => TgChatId: v => Self(v.0),
    TgChatId => ChatId: v => Self(v.0),

    UserId => TgUserId: v => Self(v.0),
    TgUserId => UserId: v => Self(v.0),

    UserId => TgChatId: v => Self(v.0 as _),
    TgChatId => UserId: v => Self(v.0 as _),

    ChatId => Id: v => v.0,
    Id => UserId: v => Self(v as _),
    UserId => Id: v => v.0 as _,
);

/// Simple [`std::fmt::Display`] implementation
macro_rules! display {
    ($($from:ty : $self:ident => $value:expr),* $(,)?) => {
        $(impl ::std::fmt::Display for $from {
            fn fmt(&$self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                $value.fmt(f)
            }
        })*
    };
}

display!(
    ChatId: self => self.0,
    UserId: self => self.0,
);

/// Human-readable USDT amount, trailing zeros trimmed
pub fn format_usdt(amount: MicroUsdt) -> String {
    let whole = amount / MICRO_USDT;
    let frac = (amount % MICRO_USDT).abs();
    if frac == 0 {
        whole.to_string()
    } else {
        let s = format!("{whole}.{frac:06}");
        s.trim_end_matches('0').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usdt() {
        let table = [
            (0, "0"),
            (30_000_000, "30"),
            (30_500_000, "30.5"),
            (1_000_001, "1.000001"),
        ];
        for (i, (amount, expected)) in table.into_iter().enumerate() {
            assert_eq!(format_usdt(amount), expected, "test table[{i}]");
        }
    }
}
