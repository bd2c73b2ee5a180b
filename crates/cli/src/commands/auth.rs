//! Session commands: login, register, logout, whoami.

use super::Context;

pub async fn login(
    ctx: &Context,
    email: &str,
    password: &str,
    admin: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.auth.login(email, password, admin).await?;
    println!(
        "Logged in as {} <{}>{}",
        session.user.name,
        session.user.email,
        if session.user.is_admin { " (admin)" } else { "" }
    );
    Ok(())
}

pub async fn register(
    ctx: &Context,
    name: &str,
    email: &str,
    password: &str,
    as_admin: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let admin_secret = if as_admin {
        match &ctx.config.admin_secret {
            Some(secret) => Some(secret),
            None => {
                return Err("--as-admin requires ECOPULS_ADMIN_SECRET to be set".into());
            }
        }
    } else {
        None
    };

    let message = ctx
        .auth
        .register(name, email, password, admin_secret)
        .await?;
    println!("{message}");
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    ctx.auth.logout()?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    match ctx.client.session().profile() {
        Some(profile) => {
            println!(
                "{} <{}>{}",
                profile.name,
                profile.email,
                if profile.is_admin { " (admin)" } else { "" }
            );
        }
        None => println!("Not logged in."),
    }
    Ok(())
}
