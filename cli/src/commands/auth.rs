//! login / register / logout / whoami.

use super::resolve_password;
use crate::credentials::FileSessionStore;
use crate::error::{CliError, Result};
use trainify_link::TrainifyClient;

pub async fn login(
    client: &TrainifyClient,
    store: &mut FileSessionStore,
    email: &str,
    password: Option<String>,
) -> Result<()> {
    let password = resolve_password(password)?;
    let login = client.login(email, &password, store).await?;
    println!("Logged in as {} <{}>", login.user.name, login.user.email);
    Ok(())
}

pub async fn register(
    client: &TrainifyClient,
    name: &str,
    email: &str,
    password: Option<String>,
) -> Result<()> {
    let password = resolve_password(password)?;
    client.register(name, email, &password).await?;
    println!("Account created. Log in with `trainify login {}`.", email);
    Ok(())
}

pub fn logout(client: &TrainifyClient, store: &mut FileSessionStore) -> Result<()> {
    client.logout(store)?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(client: &TrainifyClient) -> Result<()> {
    match client.session().user() {
        Some(user) => {
            println!("{} <{}>  (id {})", user.name, user.email, user.id);
            Ok(())
        }
        None => Err(CliError::Configuration(
            "Not logged in. Run `trainify login <email>` first.".into(),
        )),
    }
}
