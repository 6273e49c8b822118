//! Client example walking a full ledger flow against an in-process server.
//!
//! Run with: cargo run -p ledger-app --example client_example --no-default-features --features sqlite

use std::net::SocketAddr;
use std::sync::Arc;

use ledger_client::{ClientError, LedgerClient};
use ledger_hex::{LedgerServices, inbound::HttpServer};
use ledger_repo::build_repo;
use ledger_types::SystemClock;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("ledger.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let repo = build_repo(&db_url).await?;
    let services = LedgerServices::new(repo, Arc::new(SystemClock));
    let router = HttpServer::new(services).router();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    println!("🚀 Server on {addr} (database: {db_url})");

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>()).await {
            eprintln!("server stopped: {e}");
        }
    });

    let client = LedgerClient::new(format!("http://{addr}"));

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    // ─────────────────────────────────────────────────────────────────────────
    // Users and accounts
    // ─────────────────────────────────────────────────────────────────────────

    let user = client
        .create_user(
            Some("John Deo".to_string()),
            Some("john.deo@xyz.com".to_string()),
            "+919825212345",
        )
        .await?;
    println!("✅ Created user {}", user.user_id);

    match client.create_user(None, None, "+919825212345").await {
        Err(ClientError::Api { status, message, .. }) => {
            println!("✅ Duplicate mobile rejected: {status} {message}")
        }
        other => anyhow::bail!("expected a conflict, got {other:?}"),
    }

    let account = client.create_account(user.user_id.clone(), "0987654321").await?;
    println!(
        "✅ Opened account {} (document {})",
        account.account_id, account.document_number
    );

    let fetched = client.get_account(&account.account_id).await?;
    println!("   Account owner: {}", fetched.user_id);

    // ─────────────────────────────────────────────────────────────────────────
    // Transactions
    // ─────────────────────────────────────────────────────────────────────────

    for (operation_type, amount) in [
        ("cash purchase", -50.0),
        ("installment purchase", -23.5),
        ("withdrawal", -18.7),
        ("payment", 60.0),
    ] {
        let tx = client
            .create_transaction(account.account_id.clone(), operation_type, amount)
            .await?;
        println!("✅ {operation_type} {amount:.2} (tx={})", tx.transaction_id);
    }

    match client
        .create_transaction(account.account_id.clone(), "payment", -10.0)
        .await
    {
        Err(ClientError::Api { message, .. }) => println!("✅ Negative payment rejected: {message}"),
        other => anyhow::bail!("expected a sign-rule rejection, got {other:?}"),
    }

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
