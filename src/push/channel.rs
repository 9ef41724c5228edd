//! Lifetime of the dashboard's push subscription

use super::session::{Session, Step};
use crate::error::PushError;
use crate::model::LogMessage;
use futures::future::{Either, select};
use futures::{Stream, StreamExt};
use std::cell::Cell;
use std::future::Future;
use std::pin::pin;
use std::rc::Rc;
use std::time::Duration;

pub const INITIAL_BACKOFF_MS: u64 = 1_000;
pub const MAX_BACKOFF_MS: u64 = 10_000;

/// Handle shared between a view and its channel task.
/// Once closed, no message is delivered anymore.
#[derive(Debug, Clone)]
pub struct Subscription {
    open: Rc<Cell<bool>>,
}

impl Subscription {
    pub fn new() -> Self {
        Subscription {
            open: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn close(&self) {
        if self.open.replace(false) {
            log::debug!("Push subscription closed");
        }
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEnd {
    /// The subscriber went away
    Unsubscribed,
    /// The server removed the client from the namespace
    ServerClosed,
    /// The server closed the Engine.IO transport
    TransportClosed,
    /// No frame arrived within the ping deadline
    TimedOut,
    /// The socket stopped yielding frames
    Disconnected,
}

/// Feeds frames through `session` until the stream ends, the server closes
/// the session or `subscription` is closed.
///
/// `idle` builds the deadline for the next frame from the session's
/// liveness timeout. It is armed again after every frame, pings included.
pub async fn pump<S, R, L, T, F>(
    mut frames: S,
    session: &mut Session,
    subscription: &Subscription,
    mut reply: R,
    mut on_log: L,
    mut idle: T,
) -> Result<ChannelEnd, PushError>
where
    S: Stream<Item = String> + Unpin,
    R: FnMut(String),
    L: FnMut(LogMessage),
    T: FnMut(Duration) -> F,
    F: Future<Output = ()>,
{
    loop {
        let timeout = session.liveness_timeout();
        let deadline = pin!(idle(timeout));
        let frame = match select(frames.next(), deadline).await {
            Either::Left((Some(frame), _)) => frame,
            Either::Left((None, _)) => break,
            Either::Right(((), _)) => {
                log::warn!("Push channel silent for {:?}, dropping it", timeout);
                return Ok(ChannelEnd::TimedOut);
            }
        };
        if !subscription.is_open() {
            return Ok(ChannelEnd::Unsubscribed);
        }
        match session.on_frame(&frame) {
            Ok(Step::Idle) => {}
            Ok(Step::Reply(text)) => reply(text),
            Ok(Step::Log(message)) => on_log(message),
            Ok(Step::Closed) => return Ok(ChannelEnd::TransportClosed),
            Ok(Step::Disconnected) => return Ok(ChannelEnd::ServerClosed),
            Ok(Step::Rejected(reason)) => return Err(PushError::Rejected(reason)),
            Err(e) => log::warn!("Dropping push frame {:?}: {}", frame, e),
        }
    }
    if subscription.is_open() {
        Ok(ChannelEnd::Disconnected)
    } else {
        Ok(ChannelEnd::Unsubscribed)
    }
}

pub fn next_backoff(current_ms: u64) -> u64 {
    current_ms.saturating_mul(2).min(MAX_BACKOFF_MS)
}

/// Delay before the next connection attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    next_ms: u64,
}

impl Backoff {
    pub fn reset(&mut self) {
        self.next_ms = INITIAL_BACKOFF_MS;
    }

    pub fn next_delay(&mut self) -> Duration {
        let delay = self.next_ms;
        self.next_ms = next_backoff(delay);
        Duration::from_millis(delay)
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff {
            next_ms: INITIAL_BACKOFF_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconnect {
    Stop,
    After(Duration),
}

/// What follows the end of one connection. A namespace disconnect or a
/// refused join is final; anything else is retried, and a connection that
/// got as far as joining restarts the backoff.
pub fn plan_reconnect(
    outcome: &Result<ChannelEnd, PushError>,
    joined: bool,
    backoff: &mut Backoff,
) -> Reconnect {
    match outcome {
        Ok(ChannelEnd::Unsubscribed)
        | Ok(ChannelEnd::ServerClosed)
        | Err(PushError::Rejected(_)) => Reconnect::Stop,
        Ok(ChannelEnd::TransportClosed)
        | Ok(ChannelEnd::TimedOut)
        | Ok(ChannelEnd::Disconnected)
        | Err(PushError::Connect(_)) => {
            if joined {
                backoff.reset();
            }
            Reconnect::After(backoff.next_delay())
        }
    }
}

/// Keeps the push channel connected while `subscription` is open,
/// reconnecting with exponential backoff.
#[cfg(feature = "web")]
pub async fn run_log_channel(
    endpoint: crate::model::PushEndpoint,
    subscription: Subscription,
    mut on_log: impl FnMut(LogMessage),
) {
    let mut backoff = Backoff::default();
    while subscription.is_open() {
        let mut session = Session::new(&endpoint.namespace);
        let outcome = connect_once(&endpoint, &mut session, &subscription, &mut on_log).await;
        match &outcome {
            Ok(end) => log::info!("Push channel ended: {:?}", end),
            Err(e) => log::warn!("Push channel error: {}", e),
        }
        let joined = session.phase() == super::session::Phase::Joined;
        match plan_reconnect(&outcome, joined, &mut backoff) {
            Reconnect::Stop => break,
            Reconnect::After(delay) => {
                if !subscription.is_open() {
                    break;
                }
                log::debug!("Reconnecting push channel in {:?}", delay);
                gloo_timers::future::sleep(delay).await;
            }
        }
    }
}

#[cfg(feature = "web")]
async fn connect_once(
    endpoint: &crate::model::PushEndpoint,
    session: &mut Session,
    subscription: &Subscription,
    on_log: &mut impl FnMut(LogMessage),
) -> Result<ChannelEnd, PushError> {
    use futures::SinkExt;
    use futures::future::ready;
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let ws = WebSocket::open(&endpoint.url).map_err(|e| PushError::Connect(e.to_string()))?;
    log::debug!("Push channel opened on {}", endpoint.url);
    let (mut ws_write, ws_read) = ws.split();

    let frames = Box::pin(
        ws_read
            .take_while(|msg| ready(msg.is_ok()))
            .filter_map(|msg| {
                ready(match msg {
                    Ok(Message::Text(text)) => Some(text),
                    _ => None,
                })
            }),
    );

    let (tx, mut rx) = futures::channel::mpsc::unbounded::<String>();
    let send_task = async move {
        while let Some(text) = rx.next().await {
            if ws_write.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    };

    let recv_task = pump(
        frames,
        session,
        subscription,
        move |text| {
            let _ = tx.unbounded_send(text);
        },
        |message| on_log(message),
        gloo_timers::future::sleep,
    );

    match select(Box::pin(recv_task), Box::pin(send_task)).await {
        Either::Left((end, _)) => end,
        Either::Right(((), _)) => Ok(ChannelEnd::Disconnected),
    }
}
