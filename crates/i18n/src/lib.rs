//! User-facing reply texts. The bot serves mixed ko/zh/km/vi groups and
//! always answers in every language at once, so messages are fixed blocks
//! rather than per-user locale lookups. Announcements carry all five
//! languages; short operational replies stay Korean + English like the
//! deployed bot.

pub fn start() -> String {
    [
        "✅ 번역봇 작동 중. /help",
        "✅ Translation bot is running. Type /help",
        "✅ 翻译机器人运行中。请输入 /help",
        "✅ បុតនៃការបកប្រែកំពុងដំណើរការ។ /help",
        "✅ Bot dịch đang hoạt động. Gõ /help",
    ]
    .join("\n")
}

pub fn help(free_days: u32) -> String {
    let section = |header: &str, create: String| {
        [
            header.to_string(),
            create,
            "/registercode [코드|code]".to_string(),
            "/disconnect".to_string(),
            "/solomode".to_string(),
            "/extendcode".to_string(),
            "/remaining".to_string(),
            "/paymentcheck".to_string(),
        ]
        .join("\n")
    };
    [
        "📌 Help – 다국어 안내".to_string(),
        section("[한국어]", format!("/createcode – {free_days}일 무료 코드 생성")),
        section("[English]", format!("/createcode – generate {free_days}-day free code")),
        section("[中文]", format!("/createcode – 生成 {free_days} 天免费代码")),
        section(
            "[ភាសាខ្មែរ]",
            format!("/createcode – បង្កើតកូដឥតគិតថ្លៃ {free_days} ថ្ងៃ"),
        ),
        section("[Tiếng Việt]", format!("/createcode – tạo mã miễn phí {free_days} ngày")),
    ]
    .join("\n\n")
}

pub fn code_created(code: &str, days: u32) -> String {
    format!("✅ Your code: {code} ({days}일간 유효 / valid {days} days)")
}

pub fn code_quota_exceeded() -> String {
    "⚠️ 무료 코드는 이미 발급되었습니다. / Free code already issued.".to_string()
}

pub fn usage_register_code() -> String {
    "❗ Usage: /registercode [6-digit]".to_string()
}

pub fn code_invalid() -> String {
    "❌ 코드가 유효하지 않거나 만료됨 / Code invalid or expired".to_string()
}

pub fn group_registered(days: i64) -> String {
    [
        format!("✅ 그룹 등록 완료 ({days}일 후 만료)"),
        format!("✅ Group registered (expires in {days} days)"),
        format!("✅ 群组已注册（{days} 天后到期）"),
        format!("✅ ក្រុមបានចុះឈ្មោះ ({days} ថ្ងៃ)"),
        format!("✅ Đã đăng ký nhóm (hết hạn sau {days} ngày)"),
    ]
    .join("\n")
}

pub fn group_rebound() -> String {
    "✅ 재연결 완료 / Reconnected with your code".to_string()
}

pub fn already_connected() -> String {
    "⚠️ 이미 등록된 그룹입니다 / This group is already connected".to_string()
}

pub fn already_bound_other_code() -> String {
    "⚠️ 이 그룹은 다른 코드로 등록되어 있습니다 / This group is bound to a different code".to_string()
}

pub fn group_quota_exceeded() -> String {
    "⚠️ 코드 등록 한도 초과 / This code reached its group limit".to_string()
}

pub fn disconnected() -> String {
    "🔌 연결이 해제되었습니다. / Disconnected.".to_string()
}

pub fn solo_started(days: u32) -> String {
    format!("✅ 솔로 모드 시작 ({days}일) / Solo mode started ({days} days)")
}

pub fn need_register_first() -> String {
    "❗ 코드를 먼저 등록해주세요 / Register a code first".to_string()
}

pub fn extended(days_added: u32, days_remaining: i64) -> String {
    format!("🔁 {days_added}일 연장 완료. 남은 기간: {days_remaining}일 / Extended {days_added} days, {days_remaining} days left")
}

pub fn extension_limit(max: u32, usdt: &str) -> String {
    format!("⚠️ 최대 {max}회 연장되었습니다. 추가 연장은 {usdt} USDT 결제 후 가능합니다. / Extension limit ({max}) reached, further extension requires a {usdt} USDT payment (/paymentcheck).")
}

pub fn solo_extension_limit() -> String {
    "⚠️ 솔로 모드는 1회만 연장할 수 있습니다. / Solo mode can be extended only once.".to_string()
}

pub fn remaining(seconds: i64) -> String {
    let days = seconds / 86400;
    let hours = (seconds % 86400) / 3600;
    let mins = (seconds % 3600) / 60;
    format!("⏳ 남은 기간: {days}일 {hours}시간 {mins}분 / {days}d {hours}h {mins}m left")
}

pub fn no_remaining() -> String {
    "❗ 코드 등록이 없거나 만료됨 / No registration or expired".to_string()
}

pub fn payment_confirmed(usdt: &str, days_added: u32, days_remaining: i64) -> String {
    format!("✅ 결제({usdt} USDT) 확인됨. {days_added}일 연장 완료. 남은 기간: {days_remaining}일 / Payment of {usdt} USDT confirmed, extended {days_added} days ({days_remaining} days left)")
}

pub fn payment_no_capacity(usdt: &str) -> String {
    format!("⚠️ 결제({usdt} USDT)는 확인되었으나 연장 한도에 도달했습니다. 지원팀에 문의해주세요. / Payment of {usdt} USDT confirmed but the extension limit is reached, please contact support.")
}

pub fn payment_not_found(usdt: &str, address: &str) -> String {
    format!("❗ 최근 결제가 감지되지 않았습니다.\n{usdt} USDT를 {address} 로 보내신 후 /paymentcheck 를 다시 실행해주세요.\nNo payment detected yet. Send {usdt} USDT to {address} and run /paymentcheck again.")
}

pub fn payment_error() -> String {
    "⚠️ 결제 확인 실패. 잠시 후 다시 시도해주세요. / Payment check failed, try again later.".to_string()
}

pub fn translation_error() -> String {
    "⚠️ 번역 실패. 잠시 후 다시 시도해주세요. / Translation failed, try again later.".to_string()
}

pub fn internal_error() -> String {
    "⚠️ 일시적인 오류입니다. 잠시 후 다시 시도해주세요. / Temporary error, try again later.".to_string()
}

// owner replies, short and bilingual

pub fn auth_ok() -> String {
    "✅ 소유자 인증이 완료되었습니다. / Owner authenticated.".to_string()
}

pub fn auth_failed() -> String {
    "❌ 인증 실패: 잘못된 코드입니다. / Authentication failed.".to_string()
}

pub fn owner_only() -> String {
    "❌ 소유자만 사용 가능합니다. / Owner only.".to_string()
}

pub fn control_group_set() -> String {
    "✅ 소유자 제어 그룹이 등록되었습니다. / Control group registered.".to_string()
}

pub fn code_issued(code: &str, days: u32) -> String {
    format!("✅ 코드 발급: {code} ({days}일) / Code issued: {code} ({days} days)")
}

pub fn code_taken(code: &str) -> String {
    format!("⚠️ 이미 존재하는 코드: {code} / Code already exists: {code}")
}

pub fn code_deleted(code: &str) -> String {
    format!("✅ 코드 삭제 완료: {code} / Code revoked: {code}")
}

pub fn code_not_found(code: &str) -> String {
    format!("❌ 코드를 찾을 수 없음: {code} / Code not found: {code}")
}

pub fn code_extended(code: &str, days: u32) -> String {
    format!("✅ 코드 {code} {days}일 연장 완료 / Code {code} extended by {days} days")
}

pub fn force_disconnected(chat_id: i64) -> String {
    format!("🔌 {chat_id} 연결 해제 완료 / Chat {chat_id} disconnected")
}

pub fn binding_purged(chat_id: i64) -> String {
    format!("🗑 {chat_id} 등록 삭제 완료 / Binding for chat {chat_id} removed")
}

pub fn binding_not_found(chat_id: i64) -> String {
    format!("❌ {chat_id} 등록 내역 없음 / No binding for chat {chat_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_breakdown() {
        // 3 days 4 hours 5 minutes
        let msg = remaining(3 * 86400 + 4 * 3600 + 5 * 60 + 59);
        assert!(msg.contains("3일 4시간 5분"), "{msg}");
        assert!(msg.contains("3d 4h 5m"), "{msg}");
    }

    #[test]
    fn test_code_created_mentions_code() {
        assert!(code_created("123456", 3).contains("123456"));
    }

    #[test]
    fn test_help_lists_all_languages() {
        let help = help(3);
        for header in ["[한국어]", "[English]", "[中文]", "[ភាសាខ្មែរ]", "[Tiếng Việt]"] {
            assert!(help.contains(header), "{header}");
        }
    }
}
