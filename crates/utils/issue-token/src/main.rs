//! # Issue Token Utility
//!
//! Operator tool that stands in for the external sign-in service. It makes
//! sure a user exists, optionally adjusts their role and balance, and prints
//! a bearer token for them.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --package issue-token --bin issue_token -- --email ada@example.com --name Ada
//! cargo run --package issue-token --bin issue_token -- --email root@example.com --admin
//! ```
//!
//! The program will:
//! 1. Load configuration and open the database (running migrations)
//! 2. Find the user by email, or create them with `INITIAL_POINTS`
//! 3. Apply `--admin` / `--points` when given
//! 4. Print a signed token valid for `JWT_EXPIRATION_HOURS`

use anyhow::{bail, Context};
use clap::Parser;
use lib_auth::encode_jwt;
use lib_core::model::store::{UserForCreate, UserRepository};
use lib_core::{create_pool, Config, MIGRATOR};

#[derive(Parser, Debug)]
#[command(name = "issue_token")]
#[command(about = "Ensure a ReWear user exists and print a bearer token for them", long_about = None)]
struct Args {
    /// Email address identifying the user
    #[arg(long, env = "ISSUE_EMAIL")]
    email: String,

    /// Display name used when the user is created
    #[arg(long, env = "ISSUE_NAME")]
    name: Option<String>,

    /// Grant the admin role
    #[arg(long)]
    admin: bool,

    /// Overwrite the point balance
    #[arg(long)]
    points: Option<i64>,

    /// Starting balance for a newly created user
    #[arg(long, env = "INITIAL_POINTS", default_value_t = 100)]
    initial_points: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = Config::from_env().map_err(anyhow::Error::msg)?;
    config.validate().map_err(anyhow::Error::msg)?;

    if args.email.trim().is_empty() {
        bail!("--email must not be empty");
    }
    if args.points.is_some_and(|p| p < 0) || args.initial_points < 0 {
        bail!("point balances cannot be negative");
    }

    let pool = create_pool(&config.database_url)
        .await
        .context("failed to open database")?;
    MIGRATOR.run(&pool).await.context("failed to run migrations")?;

    let email = args.email.trim();
    let mut user = match UserRepository::find_by_email(&pool, email).await? {
        Some(user) => {
            println!("Found user #{} ({})", user.id, user.name);
            user
        }
        None => {
            let name = args
                .name
                .clone()
                .unwrap_or_else(|| email.split('@').next().unwrap_or(email).to_string());
            let user = UserRepository::create(
                &pool,
                UserForCreate::new(name, email).points(args.initial_points),
            )
            .await?;
            println!("Created user #{} ({})", user.id, user.name);
            user
        }
    };

    if args.admin && !user.is_admin {
        UserRepository::set_admin(&pool, user.id, true).await?;
        println!("Granted admin role");
    }
    if let Some(points) = args.points {
        UserRepository::set_points(&pool, user.id, points).await?;
        println!("Balance set to {}", points);
    }
    user = UserRepository::get(&pool, user.id).await?;

    let token = encode_jwt(
        user.id,
        user.name.clone(),
        &config.jwt_secret,
        config.jwt_expiration_hours,
    )?;

    println!();
    println!("User:    #{} {} <{}>", user.id, user.name, user.email);
    println!("Points:  {}", user.points);
    println!("Admin:   {}", user.is_admin);
    println!("Expires: {}h", config.jwt_expiration_hours);
    println!();
    println!("{}", token);

    Ok(())
}
