use common::{days_to_seconds, types::Id, DateTime};

use models::{Binding, Code};

use super::*;

const NOW: i64 = 1_700_000_000;

async fn prepare() -> Result<DB> {
    common::init_logger();

    const DIR: &str = "target/test-db";
    const REL_PATH: &str = "../..";
    std::fs::create_dir_all(format!("{REL_PATH}/{DIR}")).unwrap();
    let path_fmt = |id| format!("{REL_PATH}/{DIR}/{id}.db");

    // in hope that no single test can call this at the same time
    let mut id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();

    let mut file = path_fmt(id);
    while std::fs::exists(&file).unwrap() {
        id += 1;
        file = path_fmt(id);
    }

    log::debug!("using db at {DIR}/{id}.db");
    DB::init(&file).await
}

fn code(value: &str, issuer: Id, expires_at: i64) -> Code {
    Code::builder()
        .code(value.to_string())
        .issuer_id(issuer)
        .created_at(NOW)
        .expires_at(expires_at)
        .build()
}

fn binding(chat: Id, code: &str, expires_at: i64) -> Binding {
    Binding::builder()
        .chat_id(chat)
        .code(code.to_string())
        .expires_at(expires_at)
        .build()
}

#[tokio::test]
async fn test_count_live_codes() -> Result<()> {
    let db = prepare().await?;

    db.add_code(code("111111", 1, NOW + days_to_seconds(3))).await?;
    assert_eq!(db.count_live_codes(1, NOW).await?, 1);

    // expired code is not live
    db.add_code(code("222222", 1, NOW - 1)).await?;
    assert_eq!(db.count_live_codes(1, NOW).await?, 1);

    // privileged code is quota-exempt
    db.add_code(
        Code::builder()
            .code("333333".to_string())
            .issuer_id(1)
            .created_at(NOW)
            .expires_at(NOW + days_to_seconds(30))
            .privileged(true)
            .build(),
    )
    .await?;
    assert_eq!(db.count_live_codes(1, NOW).await?, 1);

    // revoked code is not live
    db.save_code_revoked("111111").await?;
    assert_eq!(db.count_live_codes(1, NOW).await?, 0);

    // other issuers are unaffected
    assert_eq!(db.count_live_codes(2, NOW).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_revoke_missing_code() -> Result<()> {
    let db = prepare().await?;

    assert!(!db.save_code_revoked("000000").await?);

    Ok(())
}

#[tokio::test]
async fn test_extend_binding_bounded() -> Result<()> {
    let db = prepare().await?;

    let expires = NOW + days_to_seconds(3);
    db.add_code(code("111111", 1, expires)).await?;
    db.add_binding(binding(100, "111111", expires)).await?;

    const MAX: u32 = 2;
    let extend = days_to_seconds(30);

    assert!(db.extend_binding(100, extend, MAX).await?);
    assert!(db.extend_binding(100, extend, MAX).await?);
    // third extension is refused and must not move expiry
    assert!(!db.extend_binding(100, extend, MAX).await?);

    let b = db.select_binding(100).await?.unwrap();
    assert_eq!(b.extension_count(), MAX);
    assert_eq!(b.expires_at(), expires + 2 * extend);

    // missing binding is simply refused
    assert!(!db.extend_binding(999, extend, MAX).await?);

    Ok(())
}

#[tokio::test]
async fn test_disconnect_cascade() -> Result<()> {
    let db = prepare().await?;

    let expires = NOW + days_to_seconds(3);
    db.add_code(code("111111", 1, expires)).await?;
    db.add_code(code("222222", 2, expires)).await?;
    db.add_binding(binding(100, "111111", expires)).await?;
    db.add_binding(binding(200, "111111", expires)).await?;
    db.add_binding(binding(300, "222222", expires)).await?;

    assert_eq!(db.disconnect_bindings_of_code("111111").await?, 2);

    assert!(!db.select_binding(100).await?.unwrap().connected());
    assert!(!db.select_binding(200).await?.unwrap().connected());
    assert!(db.select_binding(300).await?.unwrap().connected());

    Ok(())
}

#[tokio::test]
async fn test_remove_binding() -> Result<()> {
    let db = prepare().await?;

    let expires = NOW + days_to_seconds(3);
    db.add_code(code("111111", 1, expires)).await?;
    db.add_binding(binding(100, "111111", expires)).await?;

    assert!(db.remove_binding(100).await?);
    assert!(db.select_binding(100).await?.is_none());
    // second removal reports not found
    assert!(!db.remove_binding(100).await?);

    Ok(())
}

#[tokio::test]
async fn test_sync_binding_expires_to_code() -> Result<()> {
    let db = prepare().await?;

    let expires = NOW + days_to_seconds(3);
    db.add_code(code("111111", 1, expires)).await?;
    db.add_binding(binding(100, "111111", expires)).await?;
    db.add_binding(binding(200, "111111", expires)).await?;
    db.save_binding_connected(200, false).await?;

    let new_expires = expires + days_to_seconds(30);
    db.save_code_expires("111111", new_expires).await?;
    // only the connected binding follows
    assert_eq!(db.sync_binding_expires_to_code("111111", new_expires).await?, 1);

    assert_eq!(db.select_binding(100).await?.unwrap().expires_at(), new_expires);
    assert_eq!(db.select_binding(200).await?.unwrap().expires_at(), expires);

    Ok(())
}

#[tokio::test]
async fn test_activate_solo_keeps_later_expiry() -> Result<()> {
    let db = prepare().await?;

    db.activate_solo(42, NOW + days_to_seconds(30)).await?;
    db.extend_solo(42, days_to_seconds(30), 1).await?;
    let long_expiry = db.select_solo(42).await?.unwrap().expires_at();

    // re-activation must not shorten the window or reset the count
    db.activate_solo(42, NOW + days_to_seconds(3)).await?;
    let solo = db.select_solo(42).await?.unwrap();
    assert_eq!(solo.expires_at(), long_expiry);
    assert_eq!(solo.extension_count(), 1);

    // and the single allowed extension stays spent
    assert!(!db.extend_solo(42, days_to_seconds(30), 1).await?);

    Ok(())
}

#[tokio::test]
async fn test_invoice_lifecycle() -> Result<()> {
    let db = prepare().await?;

    let expires = NOW + days_to_seconds(3);
    db.add_code(code("111111", 1, expires)).await?;
    db.add_binding(binding(100, "111111", expires)).await?;

    assert!(db.select_invoice(100).await?.is_none());

    db.replace_invoice(100, "ord-1", "TAddrOne", NOW).await?;
    let inv = db.select_invoice(100).await?.unwrap();
    assert_eq!(inv.order_ref(), "ord-1");
    assert!(!inv.settled());

    // superseding replaces, not merges
    db.save_invoice_settled(100, 30_000_000).await?;
    db.replace_invoice(100, "ord-2", "TAddrTwo", NOW + 10).await?;
    let inv = db.select_invoice(100).await?.unwrap();
    assert_eq!(inv.order_ref(), "ord-2");
    assert!(!inv.settled());
    assert_eq!(inv.confirmed_amount(), None);

    db.delete_invoice(100).await?;
    assert!(db.select_invoice(100).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_admin_config() -> Result<()> {
    let db = prepare().await?;

    let cfg = db.admin_config().await?;
    assert_eq!(cfg.owner_id(), None);
    assert_eq!(cfg.control_chat_id(), None);

    db.save_owner(7).await?;
    db.save_control_chat(-100).await?;

    let cfg = db.admin_config().await?;
    assert_eq!(cfg.owner_id(), Some(7));
    assert_eq!(cfg.control_chat_id(), Some(-100));

    Ok(())
}

#[tokio::test]
async fn test_stats() -> Result<()> {
    let db = prepare().await?;

    let expires = DateTime::now() + days_to_seconds(3);
    db.add_code(code("111111", 1, expires)).await?;
    db.add_binding(binding(100, "111111", expires)).await?;
    db.add_binding(binding(200, "111111", expires)).await?;
    db.save_binding_connected(200, false).await?;
    db.activate_solo(42, expires).await?;

    let stats = db.load_stats().await?;
    assert_eq!(stats.codes, 1);
    assert_eq!(stats.bindings, 2);
    assert_eq!(stats.connected_bindings, 1);
    assert_eq!(stats.solo_users, 1);

    Ok(())
}
