//! Request flows behind the user list, the dialogs and the roster
//!
//! Each flow takes the [`AdminApi`] to call and the [`Store`] of the view it
//! updates, so the same code runs against signals in the browser and against
//! plain cells in tests.

use crate::api::AdminApi;
use crate::error::ApiError;
use crate::model::NewUser;
use crate::store::{RosterState, Store, UserListState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Declined,
    Deleted,
}

/// Fetches the user list; a failure leaves the table as it was
pub async fn refresh_users(
    api: &dyn AdminApi,
    store: &impl Store<UserListState>,
) -> Result<(), ApiError> {
    let ticket = store.update(|state| state.begin_refresh());
    let users = api.list_users().await?;
    store.update(|state| state.finish_refresh(ticket, users));
    Ok(())
}

/// Asks for confirmation, deletes, then fetches the list once more
pub async fn delete_user(
    api: &dyn AdminApi,
    store: &impl Store<UserListState>,
    id: i64,
    confirm: impl FnOnce() -> bool,
) -> Result<DeleteOutcome, ApiError> {
    if !confirm() {
        return Ok(DeleteOutcome::Declined);
    }
    if let Err(e) = api.delete_user(id).await {
        log::error!("Could not delete user {}: {}", id, e);
        return Err(e);
    }
    refresh_users(api, store).await?;
    Ok(DeleteOutcome::Deleted)
}

/// Fire-and-forget account creation, the answer body is ignored
pub async fn create_user(api: &dyn AdminApi, user: NewUser) -> Result<(), ApiError> {
    api.create_user(&user).await
}

/// Loads the roster of `selection`, or clears it when nothing is selected
pub async fn load_roster(
    api: &dyn AdminApi,
    store: &impl Store<RosterState>,
    selection: Option<i64>,
) -> Result<(), ApiError> {
    let Some(id) = selection else {
        store.update(|state| state.select(None));
        return Ok(());
    };
    let Some(ticket) = store.update(|state| state.select(Some(id))) else {
        return Ok(());
    };
    let entries = api.roster(id).await?;
    store.update(|state| state.finish(ticket, id, entries));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::recording::{Call, RecordingApi};
    use crate::model::RosterEntry;
    use std::cell::RefCell;

    fn entries(items: &[&str]) -> Vec<RosterEntry> {
        items
            .iter()
            .map(|item| RosterEntry {
                item: item.to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_refresh_shows_every_user() {
        let api = RecordingApi::with_users(4);
        let store = RefCell::new(UserListState::default());

        refresh_users(&api, &store).await.unwrap();

        let state = store.borrow();
        assert_eq!(state.users().len(), 4);
        assert_eq!(state.users()[2].id, 3);
        assert_eq!(state.users()[2].jid, "user3@localhost");
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_list() {
        let mut api = RecordingApi::with_users(2);
        let store = RefCell::new(UserListState::default());
        refresh_users(&api, &store).await.unwrap();

        api.fail_list = true;
        assert!(refresh_users(&api, &store).await.is_err());
        assert_eq!(store.borrow().users().len(), 2);
    }

    #[tokio::test]
    async fn test_confirmed_delete_then_single_refetch() {
        let api = RecordingApi::with_users(3);
        let store = RefCell::new(UserListState::default());

        let outcome = delete_user(&api, &store, 2, || true).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(api.calls(), vec![Call::DeleteUser(2), Call::ListUsers]);
        let ids: Vec<i64> = store.borrow().users().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_declined_delete_issues_no_call() {
        let api = RecordingApi::with_users(3);
        let store = RefCell::new(UserListState::default());

        let outcome = delete_user(&api, &store, 2, || false).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Declined);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_list_stale() {
        let mut api = RecordingApi::with_users(3);
        let store = RefCell::new(UserListState::default());
        refresh_users(&api, &store).await.unwrap();

        api.fail_delete = true;
        assert!(delete_user(&api, &store, 2, || true).await.is_err());
        assert_eq!(api.calls(), vec![Call::ListUsers, Call::DeleteUser(2)]);
        assert_eq!(store.borrow().users().len(), 3);
    }

    #[tokio::test]
    async fn test_refetch_failure_after_delete_is_reported() {
        let mut api = RecordingApi::with_users(2);
        api.fail_list = true;
        let store = RefCell::new(UserListState::default());

        let result = delete_user(&api, &store, 1, || true).await;

        assert!(matches!(result, Err(ApiError::Http(_))));
        assert_eq!(api.calls(), vec![Call::DeleteUser(1), Call::ListUsers]);
    }

    #[tokio::test]
    async fn test_create_user_sends_form_values() {
        let api = RecordingApi::default();
        let user = NewUser {
            jid: "demo".to_string(),
            pwd: "secret".to_string(),
        };

        create_user(&api, user.clone()).await.unwrap();

        assert_eq!(api.calls(), vec![Call::CreateUser(user)]);
    }

    #[tokio::test]
    async fn test_roster_for_selected_user() {
        let mut api = RecordingApi::default();
        api.rosters
            .insert(5, entries(&["alice@localhost", "bob@localhost"]));
        let store = RefCell::new(RosterState::default());

        load_roster(&api, &store, Some(5)).await.unwrap();

        assert_eq!(api.calls(), vec![Call::Roster(5)]);
        let items: Vec<String> = store
            .borrow()
            .entries()
            .iter()
            .map(|e| e.item.clone())
            .collect();
        assert_eq!(items, vec!["alice@localhost", "bob@localhost"]);
    }

    #[tokio::test]
    async fn test_reopen_for_other_user_refetches() {
        let mut api = RecordingApi::default();
        api.rosters.insert(5, entries(&["alice@localhost"]));
        api.rosters.insert(8, entries(&["zoe@localhost"]));
        let store = RefCell::new(RosterState::default());

        load_roster(&api, &store, Some(5)).await.unwrap();
        load_roster(&api, &store, None).await.unwrap();
        assert!(store.borrow().entries().is_empty());

        load_roster(&api, &store, Some(8)).await.unwrap();
        assert_eq!(
            api.calls(),
            vec![Call::Roster(5), Call::Roster(8)]
        );
        assert_eq!(store.borrow().entries(), entries(&["zoe@localhost"]).as_slice());
    }
}
