//! Live row changes over the realtime websocket.
//!
//! The subscription joins one channel, keeps it alive with heartbeats and
//! reconnects with exponential backoff when the socket drops. Dropping the
//! handle closes the socket and stops all timers.

pub(crate) mod protocol;

use crate::api::EnvConfig;
use protocol::{ChangeEvent, Incoming};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

const HEARTBEAT_MS: i32 = 25_000;
const INITIAL_BACKOFF_MS: u32 = 1_000;
const MAX_BACKOFF_MS: u32 = 30_000;

pub(crate) fn next_backoff(current_ms: u32) -> u32 {
    current_ms.saturating_mul(2).min(MAX_BACKOFF_MS)
}

type ChangeHandler = Rc<dyn Fn(ChangeEvent)>;

struct Connection {
    socket: WebSocket,
    _on_open: Closure<dyn FnMut()>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
}

impl Connection {
    fn detach(&self) {
        self.socket.set_onopen(None);
        self.socket.set_onmessage(None);
        self.socket.set_onclose(None);
    }
}

struct Inner {
    url: String,
    api_key: String,
    on_change: ChangeHandler,
    conn: Option<Connection>,
    next_ref: u64,
    join_ref: Option<String>,
    backoff_ms: u32,
    heartbeat: Option<(i32, Closure<dyn FnMut()>)>,
    reconnect_id: Option<i32>,
    stopped: bool,
}

impl Inner {
    fn take_ref(&mut self) -> u64 {
        self.next_ref += 1;
        self.next_ref
    }

    fn send(&self, frame: &protocol::Frame) {
        let Some(conn) = &self.conn else {
            return;
        };
        if let Err(e) = conn.socket.send_with_str(&protocol::encode(frame)) {
            tracing::warn!(event = %frame.event, error = ?e, "realtime send failed");
        }
    }

    fn stop_heartbeat(&mut self) {
        if let Some((id, _cb)) = self.heartbeat.take() {
            if let Some(win) = web_sys::window() {
                win.clear_interval_with_handle(id);
            }
        }
    }
}

/// Handle to a running subscription on `zettel` row changes.
pub(crate) struct RealtimeSubscription {
    inner: Rc<RefCell<Inner>>,
}

impl RealtimeSubscription {
    pub fn connect(config: &EnvConfig, on_change: impl Fn(ChangeEvent) + 'static) -> Self {
        let inner = Rc::new(RefCell::new(Inner {
            url: config.realtime_url(),
            api_key: config.api_key.clone(),
            on_change: Rc::new(on_change),
            conn: None,
            next_ref: 0,
            join_ref: None,
            backoff_ms: INITIAL_BACKOFF_MS,
            heartbeat: None,
            reconnect_id: None,
            stopped: false,
        }));

        open(&Rc::downgrade(&inner));
        Self { inner }
    }
}

impl Drop for RealtimeSubscription {
    fn drop(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.stopped = true;
        inner.stop_heartbeat();

        if let (Some(id), Some(win)) = (inner.reconnect_id.take(), web_sys::window()) {
            win.clear_timeout_with_handle(id);
        }

        if let Some(conn) = inner.conn.take() {
            conn.detach();
            let _ = conn.socket.close();
        }
        tracing::debug!("realtime subscription closed");
    }
}

fn open(weak: &Weak<RefCell<Inner>>) {
    let Some(rc) = weak.upgrade() else {
        return;
    };

    // Retire the previous socket; its handlers are not running here.
    if let Some(old) = rc.borrow_mut().conn.take() {
        old.detach();
    }

    let url = rc.borrow().url.clone();
    let socket = match WebSocket::new(&url) {
        Ok(socket) => socket,
        Err(e) => {
            tracing::error!(error = ?e, "realtime socket could not be created");
            schedule_reconnect(weak);
            return;
        }
    };

    let w = weak.clone();
    let on_open = Closure::wrap(Box::new(move || handle_open(&w)) as Box<dyn FnMut()>);
    socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));

    let w = weak.clone();
    let on_message = Closure::wrap(Box::new(move |ev: MessageEvent| {
        if let Some(text) = ev.data().as_string() {
            handle_text(&w, &text);
        }
    }) as Box<dyn FnMut(MessageEvent)>);
    socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

    let w = weak.clone();
    let on_close = Closure::wrap(Box::new(move |ev: CloseEvent| {
        handle_close(&w, ev.code());
    }) as Box<dyn FnMut(CloseEvent)>);
    socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

    rc.borrow_mut().conn = Some(Connection {
        socket,
        _on_open: on_open,
        _on_message: on_message,
        _on_close: on_close,
    });
}

fn handle_open(weak: &Weak<RefCell<Inner>>) {
    let Some(rc) = weak.upgrade() else {
        return;
    };

    let mut inner = rc.borrow_mut();
    let reference = inner.take_ref();
    let key = inner.api_key.clone();
    inner.send(&protocol::join_frame(&key, reference));
    inner.join_ref = Some(reference.to_string());
    tracing::debug!(topic = protocol::CHANNEL_TOPIC, "realtime join sent");

    inner.stop_heartbeat();
    let Some(win) = web_sys::window() else {
        return;
    };
    let w = weak.clone();
    let cb = Closure::wrap(Box::new(move || {
        if let Some(rc) = w.upgrade() {
            let mut inner = rc.borrow_mut();
            let reference = inner.take_ref();
            inner.send(&protocol::heartbeat_frame(reference));
        }
    }) as Box<dyn FnMut()>);
    let id = win
        .set_interval_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            HEARTBEAT_MS,
        )
        .unwrap_or(0);
    inner.heartbeat = Some((id, cb));
}

fn handle_text(weak: &Weak<RefCell<Inner>>, text: &str) {
    let Some(rc) = weak.upgrade() else {
        return;
    };

    let decoded = {
        let inner = rc.borrow();
        protocol::decode(text, inner.join_ref.as_deref())
    };

    match decoded {
        Ok(Incoming::Change(change)) => {
            let handler = rc.borrow().on_change.clone();
            handler(change);
        }
        Ok(Incoming::Joined) => {
            let mut inner = rc.borrow_mut();
            inner.backoff_ms = INITIAL_BACKOFF_MS;
            tracing::info!(topic = protocol::CHANNEL_TOPIC, "realtime channel joined");
        }
        Ok(incoming) if incoming.needs_reconnect() => {
            if let Incoming::JoinRejected(reason) = &incoming {
                tracing::error!(%reason, "realtime join rejected; reconnecting");
            } else {
                tracing::warn!("realtime channel errored; reconnecting");
            }
            // `handle_close` schedules the reconnect.
            if let Some(conn) = &rc.borrow().conn {
                let _ = conn.socket.close();
            }
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(error = %e, "realtime frame dropped");
        }
    }
}

fn handle_close(weak: &Weak<RefCell<Inner>>, code: u16) {
    let Some(rc) = weak.upgrade() else {
        return;
    };

    {
        let mut inner = rc.borrow_mut();
        inner.stop_heartbeat();
        inner.join_ref = None;
        if inner.stopped {
            return;
        }
    }

    tracing::warn!(code, "realtime socket closed");
    schedule_reconnect(weak);
}

fn schedule_reconnect(weak: &Weak<RefCell<Inner>>) {
    let Some(rc) = weak.upgrade() else {
        return;
    };
    let Some(win) = web_sys::window() else {
        return;
    };

    let mut inner = rc.borrow_mut();
    if inner.stopped {
        return;
    }

    let delay = inner.backoff_ms;
    inner.backoff_ms = next_backoff(delay);

    let w = weak.clone();
    let cb = Closure::once_into_js(move || {
        if let Some(rc) = w.upgrade() {
            rc.borrow_mut().reconnect_id = None;
        }
        open(&w);
    });
    let id = win
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            delay as i32,
        )
        .ok();
    inner.reconnect_id = id;
    tracing::info!(delay_ms = delay, "realtime reconnect scheduled");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_and_caps() {
        let mut delays = vec![INITIAL_BACKOFF_MS];
        for _ in 0..6 {
            let last = *delays.last().unwrap();
            delays.push(next_backoff(last));
        }
        assert_eq!(
            delays,
            vec![1_000, 2_000, 4_000, 8_000, 16_000, 30_000, 30_000]
        );
    }

    #[test]
    fn test_rejected_join_reconnects() {
        assert!(Incoming::JoinRejected("denied".to_string()).needs_reconnect());
        assert!(Incoming::ChannelError.needs_reconnect());
        assert!(!Incoming::Joined.needs_reconnect());
        assert!(!Incoming::Ignored.needs_reconnect());
    }
}
