//! Admin gate
//!
//! Guards the admin console with the rows of the `admin_credentials`
//! collection. Passwords are compared as stored; the login state lives in
//! a [`CacheStore`] used as session storage.

use crate::cache::CacheStore;
use crate::error::{AuthError, StoreError};
use crate::record::{AdminCredential, Collection};
use crate::store::{Filter, RemoteStore, SelectQuery};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Username seeded into an empty credentials table
pub const DEFAULT_USERNAME: &str = "admin";

/// Password seeded into an empty credentials table
pub const DEFAULT_PASSWORD: &str = "admin123";

const AUTHENTICATED_KEY: &str = "admin_authenticated";
const USERNAME_KEY: &str = "admin_username";

/// Successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub username: String,
    /// Caller should prompt for a credential change
    pub using_default_credentials: bool,
}

/// Session-backed admin login
#[derive(Clone)]
pub struct AdminGate {
    store: Arc<dyn RemoteStore>,
    session: Arc<dyn CacheStore>,
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate").finish_non_exhaustive()
    }
}

impl AdminGate {
    /// Create gate
    #[inline]
    #[must_use]
    pub fn new(store: Arc<dyn RemoteStore>, session: Arc<dyn CacheStore>) -> Self {
        Self { store, session }
    }

    /// Seed the default account into an empty table
    ///
    /// Returns whether the default account exists afterwards.
    pub async fn ensure_default_credentials(&self) -> Result<bool, AuthError> {
        let accounts = self.accounts(None).await?;
        if !accounts.is_empty() {
            return Ok(accounts.iter().any(is_default));
        }

        self.store
            .insert(
                Collection::AdminCredentials,
                vec![json!({"username": DEFAULT_USERNAME, "password": DEFAULT_PASSWORD})],
            )
            .await?;
        warn!("seeded default admin credentials");
        Ok(true)
    }

    /// Check credentials and open a session
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let accounts = match self.accounts(None).await {
            Ok(accounts) => accounts,
            Err(e) => {
                error!(error = %e, "could not read admin credentials");
                return Err(e);
            }
        };
        if accounts.is_empty() {
            return Err(AuthError::NoAccounts);
        }

        let account = accounts
            .iter()
            .find(|a| a.username == username && a.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        self.session.set(AUTHENTICATED_KEY, "true".to_string()).await?;
        self.session.set(USERNAME_KEY, account.username.clone()).await?;
        info!(username = %account.username, "admin logged in");

        Ok(LoginOutcome {
            username: account.username.clone(),
            using_default_credentials: is_default(account),
        })
    }

    /// Check if a session is open
    pub async fn is_authenticated(&self) -> Result<bool, AuthError> {
        Ok(self.session.get(AUTHENTICATED_KEY).await?.as_deref() == Some("true"))
    }

    /// Logged-in username
    pub async fn current_user(&self) -> Result<Option<String>, AuthError> {
        if !self.is_authenticated().await? {
            return Ok(None);
        }
        Ok(self.session.get(USERNAME_KEY).await?)
    }

    /// Close the session
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.session.remove(AUTHENTICATED_KEY).await?;
        self.session.remove(USERNAME_KEY).await?;
        info!("admin logged out");
        Ok(())
    }

    /// Change the logged-in account's username and/or password
    ///
    /// Blank new values count as unchanged. Returns the effective username.
    pub async fn change_credentials(
        &self,
        current_password: &str,
        new_username: Option<&str>,
        new_password: Option<&str>,
    ) -> Result<String, AuthError> {
        let username = self
            .current_user()
            .await?
            .ok_or(AuthError::NotAuthenticated)?;

        let new_username = new_username.map(str::trim).filter(|u| !u.is_empty());
        let new_password = new_password.filter(|p| !p.is_empty());

        let mut patch = Map::new();
        if let Some(u) = new_username {
            patch.insert("username".to_string(), Value::from(u));
        }
        if let Some(p) = new_password {
            patch.insert("password".to_string(), Value::from(p));
        }
        if patch.is_empty() {
            return Err(AuthError::NothingToUpdate);
        }

        let account = self
            .accounts(Some(&username))
            .await?
            .into_iter()
            .find(|a| a.password == current_password)
            .ok_or(AuthError::InvalidCredentials)?;

        self.store
            .update(Collection::AdminCredentials, &Filter::id(&account.id), Value::Object(patch))
            .await?;

        let effective = new_username.unwrap_or(username.as_str()).to_string();
        if effective != username {
            self.session.set(USERNAME_KEY, effective.clone()).await?;
        }
        info!(username = %effective, "admin credentials updated");
        Ok(effective)
    }

    async fn accounts(&self, username: Option<&str>) -> Result<Vec<AdminCredential>, AuthError> {
        let mut query = SelectQuery::all(Collection::AdminCredentials);
        if let Some(username) = username {
            query = query.filter(Filter::eq("username", username));
        }

        self.store
            .select(&query)
            .await?
            .into_iter()
            .map(|row| {
                serde_json::from_value(row).map_err(|e| AuthError::Store(StoreError::Decode(e.to_string())))
            })
            .collect()
    }
}

fn is_default(account: &AdminCredential) -> bool {
    account.username == DEFAULT_USERNAME && account.password == DEFAULT_PASSWORD
}
