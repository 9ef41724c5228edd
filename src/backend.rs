//! HTTP client for the messaging server admin API
//!
//! Every call is a single request: no retry, no caching, no timeout.
//! Any non-2xx answer is turned into [`ApiError::Status`].

#![cfg(feature = "server")]

use crate::error::ApiError;
use crate::model::{NewUser, RosterEntry, User};

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    origin: String,
}

impl BackendClient {
    pub fn new(origin: &str) -> Self {
        BackendClient {
            http: reqwest::Client::new(),
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let path = "/api/users";
        let response = self.http.get(self.url(path)).send().await?;
        let users = check_status(path, response)?.json::<Vec<User>>().await?;
        log::debug!("Fetched {} users", users.len());
        Ok(users)
    }

    /// The backend answers with the created record, which the dashboard does not use
    pub async fn create_user(&self, user: &NewUser) -> Result<(), ApiError> {
        let path = "/api/createuser";
        let response = self.http.post(self.url(path)).json(user).send().await?;
        check_status(path, response)?;
        log::info!("User '{}' created", user.jid);
        Ok(())
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("/api/users/{id}");
        let response = self.http.delete(self.url(&path)).send().await?;
        check_status(&path, response)?;
        log::info!("User with id {} deleted", id);
        Ok(())
    }

    pub async fn roster(&self, id: i64) -> Result<Vec<RosterEntry>, ApiError> {
        let path = format!("/api/roster/{id}");
        let response = self.http.get(self.url(&path)).send().await?;
        let roster = check_status(&path, response)?
            .json::<Vec<RosterEntry>>()
            .await?;
        Ok(roster)
    }
}

fn check_status(path: &str, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        log::warn!("{} answered with {}", path, status);
        Err(ApiError::Status {
            path: path.to_string(),
            status: status.as_u16(),
        })
    }
}
