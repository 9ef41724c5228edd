//! View-local state of the dashboard pages
//!
//! Each view owns one of these structs inside a signal. The structs carry no
//! Dioxus types so the flows in [`crate::control`] can drive them in tests.

use crate::model::{LogMessage, NewUser, RosterEntry, User};
use chrono::{DateTime, Local};
use dioxus::prelude::*;
use std::cell::RefCell;

/// Something holding a `T` that flows can read and update between awaits
pub trait Store<T> {
    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;
    fn view<R>(&self, f: impl FnOnce(&T) -> R) -> R;
}

impl<T: 'static> Store<T> for Signal<T> {
    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut signal = *self;
        let mut guard = signal.write();
        f(&mut *guard)
    }

    fn view<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.read();
        f(&*guard)
    }
}

impl<T> Store<T> for RefCell<T> {
    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut *self.borrow_mut())
    }

    fn view<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.borrow())
    }
}

/// Sequence number handed out with each request of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Issues tickets and remembers which responses are still worth applying
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSeq {
    issued: u64,
    applied: u64,
}

impl RequestSeq {
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Accepts a response unless a newer one was already applied
    pub fn accept(&mut self, ticket: Ticket) -> bool {
        if ticket.0 > self.applied {
            self.applied = ticket.0;
            true
        } else {
            false
        }
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserListState {
    users: Vec<User>,
    form_visible: bool,
    roster_visible: bool,
    roster_selected: Option<i64>,
    seq: RequestSeq,
}

impl UserListState {
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn begin_refresh(&mut self) -> Ticket {
        self.seq.issue()
    }

    /// Replaces the table content, unless a newer fetch already landed
    pub fn finish_refresh(&mut self, ticket: Ticket, users: Vec<User>) -> bool {
        if !self.seq.accept(ticket) {
            log::debug!("Dropping stale user list response {:?}", ticket);
            return false;
        }
        self.users = users;
        true
    }

    pub fn form_visible(&self) -> bool {
        self.form_visible
    }

    pub fn set_form_visible(&mut self, visible: bool) {
        self.form_visible = visible;
    }

    pub fn open_roster(&mut self, id: i64) {
        self.roster_selected = Some(id);
        self.roster_visible = true;
    }

    pub fn close_roster(&mut self) {
        self.roster_selected = None;
        self.roster_visible = false;
    }

    pub fn roster_selected(&self) -> Option<i64> {
        self.roster_selected
    }

    pub fn roster_visible(&self) -> bool {
        self.roster_visible && self.roster_selected.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterState {
    selected: Option<i64>,
    entries: Vec<RosterEntry>,
    seq: RequestSeq,
}

impl RosterState {
    /// Switches to another user. Entries of the previous one are dropped
    /// right away; a ticket is returned when there is something to fetch.
    pub fn select(&mut self, selected: Option<i64>) -> Option<Ticket> {
        self.selected = selected;
        self.entries.clear();
        selected.map(|_| self.seq.issue())
    }

    pub fn finish(&mut self, ticket: Ticket, id: i64, entries: Vec<RosterEntry>) -> bool {
        if !self.seq.is_latest(ticket) || self.selected != Some(id) {
            log::debug!("Dropping roster of user {} fetched for a previous selection", id);
            return false;
        }
        self.seq.accept(ticket);
        self.entries = entries;
        true
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub jid: String,
    pub pwd: String,
    pub reveal: bool,
}

impl FormState {
    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            jid: self.jid.clone(),
            pwd: self.pwd.clone(),
        }
    }

    pub fn toggle_reveal(&mut self) {
        self.reveal = !self.reveal;
    }

    pub fn password_input_type(&self) -> &'static str {
        if self.reveal { "text" } else { "password" }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub received_at: DateTime<Local>,
    pub message: String,
}

impl LogLine {
    pub fn time(&self) -> String {
        self.received_at.format("%H:%M:%S").to_string()
    }
}

/// Append-only log of the dashboard, lost when the view unmounts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogFeed {
    lines: Vec<LogLine>,
}

impl LogFeed {
    pub fn push(&mut self, message: LogMessage) {
        self.lines.push(LogLine {
            received_at: Local::now(),
            message: message.message,
        });
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Initial positions of the settings toggles
pub const SETTING_DEFAULTS: [bool; 5] = [false, true, true, true, false];

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, jid: &str) -> User {
        User {
            id,
            jid: jid.to_string(),
            hash: None,
        }
    }

    #[test]
    fn test_request_seq_latest_wins() {
        let mut seq = RequestSeq::default();
        let first = seq.issue();
        let second = seq.issue();
        assert!(seq.is_latest(second));
        assert!(!seq.is_latest(first));
        assert!(seq.accept(second));
        assert!(!seq.accept(first));
    }

    #[test]
    fn test_stale_user_list_is_dropped() {
        let mut state = UserListState::default();
        let first = state.begin_refresh();
        let second = state.begin_refresh();

        assert!(state.finish_refresh(second, vec![user(1, "alice"), user(2, "bob")]));
        assert!(!state.finish_refresh(first, vec![user(1, "alice")]));
        assert_eq!(state.users().len(), 2);
    }

    #[test]
    fn test_in_order_user_lists_both_apply() {
        let mut state = UserListState::default();
        let first = state.begin_refresh();
        let second = state.begin_refresh();

        assert!(state.finish_refresh(first, vec![user(1, "alice")]));
        assert!(state.finish_refresh(second, vec![user(1, "alice"), user(3, "carol")]));
        assert_eq!(state.users()[1].jid, "carol");
    }

    #[test]
    fn test_roster_open_and_close() {
        let mut state = UserListState::default();
        assert!(!state.roster_visible());

        state.open_roster(5);
        assert!(state.roster_visible());
        assert_eq!(state.roster_selected(), Some(5));

        state.close_roster();
        assert!(!state.roster_visible());
        assert_eq!(state.roster_selected(), None);
    }

    #[test]
    fn test_roster_switch_drops_previous_selection() {
        let mut roster = RosterState::default();
        let for_five = roster.select(Some(5)).unwrap();
        let for_seven = roster.select(Some(7)).unwrap();

        let late = vec![RosterEntry {
            item: "five@localhost".to_string(),
        }];
        assert!(!roster.finish(for_five, 5, late));
        assert!(roster.entries().is_empty());

        let fresh = vec![RosterEntry {
            item: "seven@localhost".to_string(),
        }];
        assert!(roster.finish(for_seven, 7, fresh));
        assert_eq!(roster.entries()[0].item, "seven@localhost");

        assert_eq!(roster.select(None), None);
        assert!(roster.entries().is_empty());
    }

    #[test]
    fn test_form_state() {
        let mut form = FormState::default();
        assert_eq!(form.password_input_type(), "password");
        form.toggle_reveal();
        assert_eq!(form.password_input_type(), "text");

        form.jid = "demo".to_string();
        form.pwd = "secret".to_string();
        assert_eq!(
            form.to_new_user(),
            NewUser {
                jid: "demo".to_string(),
                pwd: "secret".to_string()
            }
        );
    }

    #[test]
    fn test_log_feed_keeps_arrival_order() {
        let mut feed = LogFeed::default();
        assert!(feed.is_empty());
        for message in ["first", "second", "third"] {
            feed.push(LogMessage {
                message: message.to_string(),
            });
        }
        let messages: Vec<&str> = feed.lines().iter().map(|l| l.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
        assert_eq!(feed.len(), 3);
        assert_eq!(feed.lines()[0].time().len(), 8);
    }
}
