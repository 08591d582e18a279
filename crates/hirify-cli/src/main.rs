use anyhow::Result;
use clap::{Parser, Subcommand};
use hirify_core::user::Role;
use std::path::PathBuf;

mod commands;
mod context;

use context::App;

#[derive(Parser)]
#[command(name = "hirify")]
#[command(about = "Hirify - apprenticeship matching between students and companies", long_about = None)]
struct Cli {
    /// Data directory (overrides `data_dir` from config.toml)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and its profile
    Register {
        #[arg(long)]
        role: Role,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        company_name: String,
        #[arg(long, default_value = "")]
        siret: String,
        /// Address fragment; the best suggestion is used
        #[arg(long)]
        address: Option<String>,
    },
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in account
    Whoami,
    /// View or edit your profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Profiles matching yours
    Suggest {
        /// Free text searched in names, domain, description and address
        #[arg(long, short, default_value = "")]
        query: String,
    },
    /// All profiles of the opposite role, optionally filtered
    Browse {
        #[arg(long, default_value = "")]
        domain: String,
        /// City or postal code
        #[arg(long, default_value = "")]
        location: String,
    },
    /// Search addresses
    Address { fragment: String },
    /// Delete your profile and account
    DeleteAccount {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Print the stored profile
    Show,
    /// Set a field (firstName, lastName, companyName, siret, description,
    /// addressType, address, postalCode, city, cursus, domain)
    Set { field: String, value: String },
    /// Fill the address block from the best suggestion for a fragment
    SetAddress { fragment: String },
    /// Append an empty sought profile (companies)
    AddSought,
    /// Remove a sought profile (companies)
    RemoveSought { index: usize },
    /// Set the cursus or domain of a sought profile (companies)
    SetSought {
        index: usize,
        field: String,
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let app = App::open(cli.data_dir).await?;

    match cli.command {
        Commands::Register {
            role,
            email,
            password,
            first_name,
            last_name,
            company_name,
            siret,
            address,
        } => {
            commands::account::register(
                &app,
                commands::account::RegisterArgs {
                    role,
                    email,
                    password,
                    first_name,
                    last_name,
                    company_name,
                    siret,
                    address,
                },
            )
            .await?
        }
        Commands::Login { email, password } => {
            commands::account::login(&app, &email, &password).await?
        }
        Commands::Logout => commands::account::logout(&app).await?,
        Commands::Whoami => commands::account::whoami(&app).await?,
        Commands::Profile { action } => commands::profile::run(&app, action).await?,
        Commands::Suggest { query } => commands::discover::suggest(&app, &query).await?,
        Commands::Browse { domain, location } => {
            commands::discover::browse(&app, &domain, &location).await?
        }
        Commands::Address { fragment } => commands::address::search(&app, &fragment).await?,
        Commands::DeleteAccount { yes } => commands::account::delete_account(&app, yes).await?,
    }

    Ok(())
}
