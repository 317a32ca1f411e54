//! Subcommand implementations

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use hotel_privileges::{
    GrantSelection, OverrideSelection, PrivilegeService, Role, RoleDirectory, User,
};
use tracing::info;

use super::{
    CheckArgs, Command, EffectiveArgs, EntitleArgs, GrantArgs, MergedArgs, OverrideArgs,
    PagesArgs,
};

/// Run one subcommand against the service
pub async fn execute(service: &PrivilegeService, command: Command) -> Result<()> {
    match command {
        Command::Pages(args) => pages(service, args).await,
        Command::Entitle(args) => entitle(service, args).await,
        Command::Grant(args) => grant(service, args).await,
        Command::Override(args) => override_privilege(service, args).await,
        Command::Merged(args) => merged(service, args).await,
        Command::Effective(args) => effective(service, args).await,
        Command::Check(args) => check(service, args).await,
    }
}

async fn pages(service: &PrivilegeService, args: PagesArgs) -> Result<()> {
    if args.hotel.is_none() && args.role.is_none() && args.user.is_none() {
        for page in service.catalog().pages() {
            println!("{}{} ({})", "  ".repeat(page.depth), page.label, page.id);
        }
        return Ok(());
    }

    let system = service.load_system().await?;

    if args.user.is_some() {
        let mut selection = OverrideSelection::new();
        if let Some(hotel) = args.hotel {
            selection = selection.with_hotel(hotel);
        }
        if let Some(role) = args.role {
            selection = selection.with_role(role);
        }
        if let Some(user) = args.user {
            selection = selection.with_user(user);
        }
        let scope = selection.scope()?;
        for (page, privilege, overridden) in system.override_matrix(&scope)? {
            let marker = if overridden { "*" } else { "" };
            println!("{:<24} {}{}", page.id, privilege, marker);
        }
    } else {
        let mut selection = GrantSelection::new();
        if let Some(hotel) = args.hotel {
            selection = selection.with_hotel(hotel);
        }
        if let Some(role) = args.role {
            selection = selection.with_role(role);
        }
        let scope = selection.scope()?;
        for (page, privilege) in system.grant_matrix(&scope)? {
            println!("{:<24} {}", page.id, privilege);
        }
    }
    Ok(())
}

async fn entitle(service: &PrivilegeService, args: EntitleArgs) -> Result<()> {
    if !service.catalog().contains(&args.page) {
        anyhow::bail!("Unknown page: {}", args.page);
    }

    let mut session = service.edit_entitlements().await?;
    let changed = session
        .draft_mut()
        .set_entitled(&args.hotel, &args.page, !args.disable)?;
    let version = session
        .save()
        .await
        .context("Failed to save entitlements")?;

    let state = if args.disable { "disabled" } else { "enabled" };
    if changed {
        info!("Page {} {} for hotel {} (version {})", args.page, state, args.hotel, version);
    }
    println!("{} {} for {}", args.page, state, args.hotel);
    Ok(())
}

async fn grant(service: &PrivilegeService, args: GrantArgs) -> Result<()> {
    let mut session = service.edit_grants().await?;
    let privilege = session
        .draft_mut()
        .toggle_grant(&args.hotel, &args.role, &args.page, args.flag)?;
    session.save().await.context("Failed to save role grants")?;

    println!("{} {} {}: {}", args.hotel, args.role, args.page, privilege);
    Ok(())
}

async fn override_privilege(service: &PrivilegeService, args: OverrideArgs) -> Result<()> {
    let mut session = service.edit_overrides().await?;

    let outcome = match args.flag {
        Some(flag) => session
            .draft_mut()
            .toggle_override(&args.hotel, &args.role, &args.user, &args.page, flag)?
            .to_string(),
        None => match session
            .draft_mut()
            .clear_override(&args.hotel, &args.role, &args.user, &args.page)
        {
            Some(_) => "cleared".to_string(),
            None => "no override".to_string(),
        },
    };
    session
        .save()
        .await
        .context("Failed to save user overrides")?;

    println!(
        "{} {} {} {}: {}",
        args.hotel, args.role, args.user, args.page, outcome
    );
    Ok(())
}

async fn merged(service: &PrivilegeService, args: MergedArgs) -> Result<()> {
    let system = service.load_system().await?;
    let view: BTreeMap<String, _> = system
        .resolver()
        .merged_view_for_roles(&args.hotel, &args.roles)
        .into_iter()
        .collect();

    for (page_id, privilege) in view {
        println!("{:<24} {}", page_id, privilege);
    }
    Ok(())
}

async fn effective(service: &PrivilegeService, args: EffectiveArgs) -> Result<()> {
    let system = service.load_system().await?;
    let privilege = system.effective_privilege(&args.hotel, &args.role, &args.user, &args.page)?;
    let source = if system
        .resolver()
        .is_overridden(&args.hotel, &args.role, &args.user, &args.page)
    {
        "override"
    } else {
        "role grant"
    };

    println!("{} ({})", privilege, source);
    Ok(())
}

async fn check(service: &PrivilegeService, args: CheckArgs) -> Result<()> {
    let system = service.load_system().await?;
    let (directory, user) = user_with_roles(&args.hotel, &args.user, &args.roles)?;

    let result = system.check(&args.hotel, &user, &directory, &args.page, args.flag)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Build a directory and user from role names given on the command line
fn user_with_roles(hotel_id: &str, user_id: &str, roles: &[String]) -> Result<(RoleDirectory, User)> {
    let mut directory = RoleDirectory::new();
    let mut user = User::new(user_id, hotel_id);
    for name in roles {
        directory
            .add_role(Role::with_id(name.clone(), hotel_id, name.clone()))
            .with_context(|| format!("Invalid role {}", name))?;
        user = user.with_role(name.clone());
    }
    Ok((directory, user))
}
