use anyhow::{Context, Result};
use hirify_core::profile::{ProfileDraft, ProfileField, SoughtField};
use hirify_core::user::Role;

use super::announce;
use crate::ProfileAction;
use crate::commands::address::best_match;
use crate::context::App;

pub async fn run(app: &App, action: ProfileAction) -> Result<()> {
    let editor = app.editor();
    let draft = editor.load_current().await?;

    match action {
        ProfileAction::Show => {
            print_draft(&draft);
            return Ok(());
        }
        ProfileAction::Set { field, value } => {
            let field: ProfileField = field
                .parse()
                .with_context(|| format!("Unknown profile field '{}'", field))?;
            editor.update_field(field, &value).await?;
        }
        ProfileAction::SetAddress { fragment } => {
            let suggestion = best_match(app, &fragment).await?;
            println!("Using {}", suggestion.label);
            editor.apply_address(&suggestion).await?;
        }
        ProfileAction::AddSought => {
            let index = editor.add_sought_row().await?;
            println!("Added sought profile #{}", index);
        }
        ProfileAction::RemoveSought { index } => {
            editor.remove_sought_row(index).await?;
        }
        ProfileAction::SetSought {
            index,
            field,
            value,
        } => {
            let field: SoughtField = field
                .parse()
                .with_context(|| format!("Unknown sought profile field '{}'", field))?;
            editor.update_sought_row(index, field, &value).await?;
        }
    }

    let redirect = editor.submit().await?;
    announce("Profile saved.", redirect);
    Ok(())
}

fn print_draft(draft: &ProfileDraft) {
    let profile = draft.profile();
    println!("Role: {}", draft.role());
    println!("Email: {}", profile.email);

    let mut rows: Vec<(&str, &str)> = match draft.role() {
        Role::Student => vec![
            ("firstName", profile.first_name.as_str()),
            ("lastName", profile.last_name.as_str()),
            ("cursus", profile.cursus.as_str()),
            ("domain", profile.domain.as_str()),
            ("addressType", profile.address_type.as_str()),
        ],
        Role::Company => vec![
            ("companyName", profile.company_name.as_str()),
            ("siret", profile.siret.as_str()),
        ],
    };
    rows.extend([
        ("description", profile.description.as_str()),
        ("address", profile.address.as_str()),
        ("postalCode", profile.postal_code.as_str()),
        ("city", profile.city.as_str()),
    ]);

    for (name, value) in rows {
        println!("{:<12} {}", name, value);
    }

    if draft.role() == Role::Company {
        println!("Sought profiles:");
        for (i, row) in draft.sought_rows().iter().enumerate() {
            println!("  #{} cursus={} domain={}", i, row.cursus, row.domain);
        }
    }
}
