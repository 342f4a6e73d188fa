//! Account session commands.

use thimble_client::api::{NewAccount, User};

use super::{CliError, Context};

/// Log in and persist the session token for later commands.
pub async fn login(email: &str, password: &str) -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let (mut session, _) = ctx.session().await?;

    let user = session.login(email, password).await?;
    tracing::info!("Signed in as {} <{}>", user.name, user.email);
    tracing::info!("The cart will now sync with the account's remote cart.");
    Ok(())
}

/// Register a new account and log straight into it.
pub async fn register(
    name: String,
    email: String,
    password: String,
    phone: Option<String>,
    address: Option<String>,
) -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let (mut session, _) = ctx.session().await?;

    let account = NewAccount {
        name,
        email,
        password,
        phone,
        address,
    };
    let user = session.register(&account).await?;
    tracing::info!("Account created. Signed in as {} <{}>", user.name, user.email);
    Ok(())
}

/// Discard the stored session token.
pub async fn logout() -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let (mut session, signed_in) = ctx.session().await?;

    if signed_in {
        session.logout();
        tracing::info!("Signed out. The cart keeps its last local mirror.");
    } else {
        tracing::info!("Already signed out.");
    }
    Ok(())
}

/// Show the signed-in account.
pub async fn whoami() -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let (session, signed_in) = ctx.session().await?;

    if !signed_in {
        tracing::info!("Not signed in.");
        return Ok(());
    }

    if let Some(user) = session.user() {
        print_user(user);
    }
    Ok(())
}

fn print_user(user: &User) {
    tracing::info!("Name:  {}", user.name);
    tracing::info!("Email: {}", user.email);
    tracing::info!("Role:  {:?}", user.role);
    if let Some(phone) = &user.phone {
        tracing::info!("Phone: {phone}");
    }
    if let Some(address) = &user.address {
        tracing::info!("Address: {address}");
    }
}
