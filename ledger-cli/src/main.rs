//! Ledger CLI
//!
//! Command-line interface for the ledger API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use ledger_client::LedgerClient;
use ledger_types::{AccountId, OperationType, UserId};

#[derive(Parser)]
#[command(name = "ledger")]
#[command(author, version, about = "Ledger API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the ledger API
    #[arg(long, env = "LEDGER_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User operations
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Account operations
    Account {
        #[command(subcommand)]
        action: AccountCommands,
    },
    /// Transaction operations
    Transaction {
        #[command(subcommand)]
        action: TransactionCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum UserCommands {
    /// Register a new user
    Create {
        /// Mobile number, e.g. +919825212345
        #[arg(long)]
        mobile: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Open an account for an existing user
    Create {
        #[arg(long)]
        user: String,
        #[arg(long)]
        document: String,
    },
    /// Get account details
    Get {
        /// Account ID
        id: String,
    },
}

#[derive(Subcommand)]
enum TransactionCommands {
    /// Record a purchase, withdrawal or payment
    Create {
        #[arg(long)]
        account: String,
        /// cash purchase, installment purchase, withdrawal or payment
        #[arg(long = "type", value_parser = parse_operation_type)]
        operation_type: OperationType,
        /// Negative for purchases and withdrawals, positive for payments
        #[arg(long, allow_hyphen_values = true)]
        amount: f64,
    },
}

fn parse_operation_type(s: &str) -> Result<OperationType, String> {
    s.parse().map_err(|e| {
        let known: Vec<&str> = OperationType::ALL.iter().map(|op| op.wire_name()).collect();
        format!("{e}; expected one of: {}", known.join(", "))
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = LedgerClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::User { action } => match action {
            UserCommands::Create {
                mobile,
                name,
                email,
            } => {
                let user = client.create_user(name, email, &mobile).await?;
                println!("{}", serde_json::to_string_pretty(&user)?);
            }
        },

        Commands::Account { action } => match action {
            AccountCommands::Create { user, document } => {
                let account = client.create_account(UserId::from(user), &document).await?;
                println!("{}", serde_json::to_string_pretty(&account)?);
            }
            AccountCommands::Get { id } => {
                let account = client.get_account(&AccountId::from(id)).await?;
                println!("{}", serde_json::to_string_pretty(&account)?);
            }
        },

        Commands::Transaction { action } => match action {
            TransactionCommands::Create {
                account,
                operation_type,
                amount,
            } => {
                let tx = client
                    .create_transaction(AccountId::from(account), operation_type.wire_name(), amount)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&tx)?);
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_create_accepts_negative_amount() {
        let cli = Cli::try_parse_from([
            "ledger",
            "transaction",
            "create",
            "--account",
            "acc-1",
            "--type",
            "Cash Purchase",
            "--amount",
            "-2345.67",
        ])
        .unwrap();

        match cli.command {
            Commands::Transaction {
                action:
                    TransactionCommands::Create {
                        account,
                        operation_type,
                        amount,
                    },
            } => {
                assert_eq!(account, "acc-1");
                assert_eq!(operation_type, OperationType::CashPurchase);
                assert_eq!(amount, -2345.67);
            }
            _ => panic!("expected transaction create"),
        }
    }

    #[test]
    fn test_unknown_operation_type_rejected() {
        let result = Cli::try_parse_from([
            "ledger",
            "transaction",
            "create",
            "--account",
            "acc-1",
            "--type",
            "refund",
            "--amount",
            "10",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_api_url() {
        let cli = Cli::try_parse_from(["ledger", "health"]).unwrap();
        assert!(cli.api_url.starts_with("http://"));
    }
}
