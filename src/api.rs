//! Calls issued by the views
//!
//! Views never talk to the messaging backend directly: they go through
//! [`AdminApi`], whose browser implementation calls the server functions
//! below, which in turn relay to the backend with [`crate::backend`].

use crate::error::ApiError;
use crate::model::{NewUser, PushEndpoint, RosterEntry, User};
use async_trait::async_trait;
use dioxus::prelude::*;
use std::ops::Deref;
use std::rc::Rc;

#[async_trait(?Send)]
pub trait AdminApi {
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;
    async fn create_user(&self, user: &NewUser) -> Result<(), ApiError>;
    async fn delete_user(&self, id: i64) -> Result<(), ApiError>;
    async fn roster(&self, id: i64) -> Result<Vec<RosterEntry>, ApiError>;
}

/// [`AdminApi`] backed by the dashboard's server functions
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerFnApi;

#[async_trait(?Send)]
impl AdminApi for ServerFnApi {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        Ok(get_users_server().await?)
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), ApiError> {
        Ok(create_user_server(user.clone()).await?)
    }

    async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        Ok(delete_user_server(id).await?)
    }

    async fn roster(&self, id: i64) -> Result<Vec<RosterEntry>, ApiError> {
        Ok(get_roster_server(id).await?)
    }
}

/// The [`AdminApi`] the views talk to, shared through the component context
#[derive(Clone)]
pub struct ApiHandle(Rc<dyn AdminApi>);

impl ApiHandle {
    pub fn new(api: Rc<dyn AdminApi>) -> Self {
        ApiHandle(api)
    }
}

impl Default for ApiHandle {
    fn default() -> Self {
        ApiHandle(Rc::new(ServerFnApi))
    }
}

impl Deref for ApiHandle {
    type Target = dyn AdminApi;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

/// Api provided by an ancestor, or the server functions when none is
pub fn use_admin_api() -> ApiHandle {
    use_hook(|| try_consume_context::<ApiHandle>().unwrap_or_default())
}

#[server]
async fn get_users_server() -> Result<Vec<User>, ServerFnError> {
    let users = crate::state::backend().await.list_users().await?;
    Ok(users)
}

#[server]
async fn create_user_server(user: NewUser) -> Result<(), ServerFnError> {
    crate::state::backend().await.create_user(&user).await?;
    Ok(())
}

#[server]
async fn delete_user_server(id: i64) -> Result<(), ServerFnError> {
    crate::state::backend().await.delete_user(id).await?;
    Ok(())
}

#[server]
async fn get_roster_server(id: i64) -> Result<Vec<RosterEntry>, ServerFnError> {
    let roster = crate::state::backend().await.roster(id).await?;
    Ok(roster)
}

#[server]
pub async fn get_push_endpoint_server() -> Result<PushEndpoint, ServerFnError> {
    let state = crate::state::ADMIN_STATE.read().await;
    Ok(state.push_endpoint())
}

/// [`AdminApi`] double that answers from memory and records every call
#[cfg(test)]
pub mod recording {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        ListUsers,
        CreateUser(NewUser),
        DeleteUser(i64),
        Roster(i64),
    }

    #[derive(Default)]
    pub struct RecordingApi {
        pub calls: RefCell<Vec<Call>>,
        pub users: RefCell<Vec<User>>,
        pub rosters: HashMap<i64, Vec<RosterEntry>>,
        pub fail_delete: bool,
        pub fail_list: bool,
    }

    impl RecordingApi {
        pub fn with_users(n: i64) -> Self {
            let users = (1..=n)
                .map(|id| User {
                    id,
                    jid: format!("user{id}@localhost"),
                    hash: None,
                })
                .collect();
            RecordingApi {
                users: RefCell::new(users),
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl AdminApi for RecordingApi {
        async fn list_users(&self) -> Result<Vec<User>, ApiError> {
            self.calls.borrow_mut().push(Call::ListUsers);
            if self.fail_list {
                return Err(ApiError::Http("connection refused".to_string()));
            }
            Ok(self.users.borrow().clone())
        }

        async fn create_user(&self, user: &NewUser) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(Call::CreateUser(user.clone()));
            Ok(())
        }

        async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(Call::DeleteUser(id));
            if self.fail_delete {
                return Err(ApiError::Status {
                    path: format!("/api/users/{id}"),
                    status: 500,
                });
            }
            self.users.borrow_mut().retain(|u| u.id != id);
            Ok(())
        }

        async fn roster(&self, id: i64) -> Result<Vec<RosterEntry>, ApiError> {
            self.calls.borrow_mut().push(Call::Roster(id));
            Ok(self.rosters.get(&id).cloned().unwrap_or_default())
        }
    }
}
