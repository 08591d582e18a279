use anyhow::Result;
use hirify_core::user::{Role, UserDocument};

use crate::context::App;

pub async fn suggest(app: &App, query: &str) -> Result<()> {
    let matches = app.discovery().suggest(query).await?;
    print_cards(&matches);
    Ok(())
}

pub async fn browse(app: &App, domain: &str, location: &str) -> Result<()> {
    let matches = app.discovery().browse(domain, location).await?;
    print_cards(&matches);
    Ok(())
}

fn print_cards(documents: &[UserDocument]) {
    if documents.is_empty() {
        println!("No matching profiles");
        return;
    }

    for doc in documents {
        let profile = &doc.profile;
        println!("{}", profile.display_name());

        match profile.role {
            Some(Role::Company) => {
                let domains: Vec<&str> = profile.sought_domains().collect();
                if !domains.is_empty() {
                    println!("  Looking for: {}", domains.join(", "));
                }
            }
            _ => {
                if !profile.domain.is_empty() {
                    println!("  Domain: {}", profile.domain);
                }
                if !profile.cursus.is_empty() {
                    println!("  Cursus: {}", profile.cursus);
                }
            }
        }

        let location = format!("{} {}", profile.postal_code, profile.city);
        if !location.trim().is_empty() {
            println!("  {}", location.trim());
        }
        println!("  {}", profile.description);
        if !profile.email.is_empty() {
            println!("  Contact: {}", profile.email);
        }
        println!();
    }
}
