use anyhow::{Result, bail};
use hirify_application::RegistrationRequest;
use hirify_core::identity::IdentityProvider;
use hirify_core::user::Role;

use super::announce;
use crate::commands::address::best_match;
use crate::context::App;

pub struct RegisterArgs {
    pub role: Role,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub siret: String,
    pub address: Option<String>,
}

pub async fn register(app: &App, args: RegisterArgs) -> Result<()> {
    let address = match &args.address {
        Some(fragment) => Some(best_match(app, fragment).await?),
        None => None,
    };

    let request = RegistrationRequest {
        role: Some(args.role),
        email: args.email,
        password: args.password,
        first_name: args.first_name,
        last_name: args.last_name,
        company_name: args.company_name,
        siret: args.siret,
        address,
    };

    let redirect = app.registration().register(&request).await?;
    announce("Account created.", redirect);
    Ok(())
}

pub async fn login(app: &App, email: &str, password: &str) -> Result<()> {
    let identity = app.identity.sign_in(email, password).await?;
    let record = app.session.refresh().await?;

    let name = identity.display_name.as_deref().unwrap_or(&identity.email);
    println!("Signed in as {}", name);
    if record.and_then(|r| r.profile).is_none() {
        println!("Your profile is empty; fill it with `hirify profile set`.");
    }
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    app.identity.sign_out().await?;
    app.session.refresh().await?;
    println!("Signed out");
    Ok(())
}

pub async fn whoami(app: &App) -> Result<()> {
    match app.session.current().await {
        Some(record) => {
            let name = record.identity.display_name.as_deref().unwrap_or("");
            println!("{} <{}>", name, record.identity.email);
            match record.role() {
                Some(role) => println!("Role: {}", role),
                None => println!("Role: not set"),
            }
        }
        None => println!("Not signed in"),
    }
    Ok(())
}

pub async fn delete_account(app: &App, confirmed: bool) -> Result<()> {
    if !confirmed {
        bail!("This deletes your profile and account. Re-run with --yes to confirm.");
    }
    app.editor().delete_account().await?;
    println!("Account deleted");
    Ok(())
}
