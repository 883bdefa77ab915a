//! NetLearn developer CLI
//!
//! Exercises the NetLearn core against the configured collaborator
//! (or the in-memory one in dev mode): catalog browsing, account flows,
//! the demo payment upgrade, and the admin dashboard operations.

use clap::{Parser, Subcommand};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use netlearn::catalog::{Catalog, CatalogFilter, Category};
use netlearn::collaborator::{
    Collaborator, HostedCollaborator, HostedConfig, MemoryCollaborator,
};
use netlearn::config::Args;
use netlearn::services::{AdminService, AuthService, SignInForm, SignUpForm};
use netlearn::subscription::{SubscriptionService, TierChange, UpgradeError, UpgradeOutcome};
use netlearn::Session;

#[derive(Parser, Debug)]
#[command(name = "netlearn")]
#[command(version, about = "NetLearn developer CLI", long_about = None)]
struct Cli {
    #[command(flatten)]
    args: Args,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the content catalog
    Catalog {
        /// Filter by category (basics, security, advanced)
        #[arg(long)]
        category: Option<String>,

        /// Filter by title substring (case-insensitive)
        #[arg(long)]
        search: Option<String>,

        /// Include draft items
        #[arg(long)]
        drafts: bool,
    },

    /// Create an account
    SignUp {
        #[arg(long)]
        email: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        password: String,
    },

    /// Sign in and print the fetched profile
    SignIn {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign in, then run the demo payment upgrade
    Upgrade {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// Payment contact handle (09xxxxxxxxx or +639xxxxxxxxx)
        #[arg(long)]
        handle: String,
    },

    /// List all profiles, newest first (admin dashboard read)
    Profiles,

    /// Grant premium to a profile (admin)
    GrantPremium {
        /// Profile id
        id: String,
    },

    /// Revoke premium from a profile (admin)
    RevokePremium {
        /// Profile id
        id: String,
    },

    /// Delete a profile and best-effort its identity (admin)
    DeleteAccount {
        /// Profile id
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let args = cli.args;

    // Initialize tracing/logging
    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("netlearn={},warn", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Validate configuration
    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!(
        "NetLearn {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_COMMIT_SHORT")
    );
    info!(
        "Mode: {}",
        if args.dev_mode { "DEVELOPMENT (in-memory collaborator)" } else { "PRODUCTION" }
    );
    if !args.dev_mode {
        info!("Collaborator: {}", args.collaborator_url);
    }

    // Pick the collaborator implementation
    let store: Arc<dyn Collaborator> = if args.dev_mode {
        let memory = MemoryCollaborator::new();
        memory.seed_account("admin@netlearn.com", "admin123", Some("Admin"), true);
        Arc::new(memory)
    } else {
        Arc::new(HostedCollaborator::new(HostedConfig::from_args(&args))?)
    };

    match cli.command {
        Command::Catalog {
            category,
            search,
            drafts,
        } => {
            let category = category
                .map(|c| Category::from_str(&c))
                .transpose()
                .map_err(anyhow::Error::msg)?;

            let catalog = Catalog::with_builtin();
            let items = catalog.list(&CatalogFilter {
                category,
                title_contains: search,
                include_drafts: drafts,
            });

            for item in items {
                println!(
                    "{:<32} {:<10} {:<12} {:>4} min  {}",
                    item.title,
                    item.category.to_string(),
                    item.difficulty.to_string(),
                    item.duration_minutes,
                    if item.premium { "premium" } else { "free" },
                );
            }
        }

        Command::SignUp {
            email,
            name,
            password,
        } => {
            let auth = AuthService::new(Arc::clone(&store));
            let form = SignUpForm {
                name,
                email,
                confirm_password: password.clone(),
                password,
            };
            match auth.sign_up(&form).await {
                Ok(record) => {
                    println!("Created account {} ({})", record.id, record.email);
                    println!("Plan: {}", record.subscription);
                }
                Err(e) => report_auth_error(e),
            }
        }

        Command::SignIn { email, password } => {
            let auth = AuthService::new(Arc::clone(&store));
            match auth.sign_in(&SignInForm { email, password }).await {
                Ok(record) => {
                    println!("Signed in as {} ({})", record.email, record.id);
                    println!(
                        "Plan: {}{}",
                        record.subscription,
                        if record.is_admin { " (admin)" } else { "" },
                    );
                }
                Err(e) => report_auth_error(e),
            }
        }

        Command::Upgrade {
            email,
            password,
            handle,
        } => {
            let auth = AuthService::new(Arc::clone(&store));
            let record = match auth.sign_in(&SignInForm { email, password }).await {
                Ok(record) => record,
                Err(e) => {
                    report_auth_error(e);
                    return Ok(());
                }
            };

            let session = Session::SignedIn(record);
            let subscriptions = SubscriptionService::new(Arc::clone(&store), args.payment_delay());

            println!("Processing demo payment...");
            match subscriptions.upgrade(&session, &handle).await {
                Ok(UpgradeOutcome::Upgraded(record)) => {
                    println!("Upgraded! {} is now on the {} plan", record.email, record.subscription);
                }
                Ok(UpgradeOutcome::AlreadyPremium) => {
                    println!("Already on the premium plan, nothing to do");
                }
                Err(UpgradeError::InvalidHandle(handle)) => {
                    println!("Invalid contact handle: {handle}");
                    println!("Use 09xxxxxxxxx or +639xxxxxxxxx");
                }
                Err(UpgradeError::NotSignedIn) => {
                    println!("Sign in before subscribing");
                }
                Err(UpgradeError::Collaborator(e)) => {
                    println!("Could not reach the subscription service: {e}");
                    println!("Nothing was charged");
                }
                Err(UpgradeError::PaymentAcceptedStoreFailed(e)) => {
                    println!("Payment went through but updating your plan failed: {e}");
                    println!("Your plan may be out of sync; please retry or contact support");
                }
            }
        }

        Command::Profiles => {
            let admin = AdminService::new(Arc::clone(&store));
            for row in admin.list_profiles().await? {
                println!(
                    "{}  {:<28} {:<8} {}{}",
                    row.created_at.format("%Y-%m-%d"),
                    row.email,
                    row.subscription.to_string(),
                    row.name.as_deref().unwrap_or("-"),
                    if row.is_admin { "  [admin]" } else { "" },
                );
            }
        }

        Command::GrantPremium { id } => {
            let admin = AdminService::new(Arc::clone(&store));
            match admin.grant_premium(&id).await? {
                TierChange::Changed(tier) => println!("Profile {id} is now {tier}"),
                TierChange::Unchanged => println!("Profile {id} already premium, nothing to do"),
            }
        }

        Command::RevokePremium { id } => {
            let admin = AdminService::new(Arc::clone(&store));
            match admin.revoke_premium(&id).await? {
                TierChange::Changed(tier) => println!("Profile {id} is now {tier}"),
                TierChange::Unchanged => println!("Profile {id} already free, nothing to do"),
            }
        }

        Command::DeleteAccount { id } => {
            let admin = AdminService::new(Arc::clone(&store));
            admin.delete_account(&id).await?;
            println!("Deleted account {id}");
        }
    }

    Ok(())
}

fn report_auth_error(error: netlearn::services::AuthError) {
    match error {
        netlearn::services::AuthError::Validation(fields) => {
            for field in fields {
                println!("{}: {}", field.field, field.message);
            }
        }
        netlearn::services::AuthError::Collaborator(e) => {
            println!("Request failed: {e}");
        }
    }
}
