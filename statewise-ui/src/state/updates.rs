//! Content Updates
//!
//! The data service pushes `content_updated` over WebSocket whenever the
//! served payloads change. The stream client re-emits each one as a
//! `contentUpdated` window event; the app shell listens for that event and
//! shows the reload alert.

use leptos::*;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use super::global::GlobalState;

/// Window event fired when newer content is available
pub const CONTENT_UPDATED_EVENT: &str = "contentUpdated";

const MAX_RECONNECT_ATTEMPTS: u32 = 5;

/// Messages from the update stream
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpdateMessage {
    Connected {
        connection_id: String,
        version: u64,
    },
    ContentUpdated {
        version: u64,
        timestamp: i64,
    },
    Pong,
    Error {
        message: String,
    },
}

/// Open the update stream (call from app root)
pub fn init_updates(state: GlobalState, url: String) {
    connect(Rc::from(url), Rc::new(Cell::new(0)), state);
}

fn connect(url: Rc<str>, attempts: Rc<Cell<u32>>, state: GlobalState) {
    let ws = match WebSocket::new(&url) {
        Ok(ws) => ws,
        Err(e) => {
            web_sys::console::error_1(&format!("WebSocket connection failed: {:?}", e).into());
            schedule_reconnect(url, attempts, state);
            return;
        }
    };

    // On open
    let open_attempts = Rc::clone(&attempts);
    let on_open = Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| {
        state.ws_connected.set(true);
        open_attempts.set(0);
    });
    ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
    on_open.forget();

    // On message
    let on_message = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
        if let Ok(text) = event.data().dyn_into::<js_sys::JsString>() {
            let text: String = text.into();
            handle_message(&text, &state);
        }
    });
    ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
    on_message.forget();

    // On close
    let on_close = Closure::<dyn FnMut(CloseEvent)>::new(move |event: CloseEvent| {
        web_sys::console::log_1(
            &format!("Update stream closed: code={}, reason={}", event.code(), event.reason()).into(),
        );
        state.ws_connected.set(false);
        schedule_reconnect(Rc::clone(&url), Rc::clone(&attempts), state);
    });
    ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
    on_close.forget();
}

/// Reconnect with exponential backoff, up to a fixed number of attempts
fn schedule_reconnect(url: Rc<str>, attempts: Rc<Cell<u32>>, state: GlobalState) {
    let attempt = attempts.get();
    if attempt >= MAX_RECONNECT_ATTEMPTS {
        web_sys::console::error_1(&"Max reconnect attempts reached".into());
        return;
    }

    let delay = (2_u32.pow(attempt) * 1000).min(30000);
    attempts.set(attempt + 1);

    gloo_timers::callback::Timeout::new(delay, move || {
        connect(url, attempts, state);
    })
    .forget();
}

fn handle_message(text: &str, state: &GlobalState) {
    match serde_json::from_str::<UpdateMessage>(text) {
        Ok(UpdateMessage::Connected { connection_id, version }) => {
            web_sys::console::log_1(
                &format!("Update stream {} at version {}", connection_id, version).into(),
            );
            // Picks up data that arrived while the initial fetch was failing
            state.content_available(version);
        }
        Ok(UpdateMessage::ContentUpdated { version, timestamp }) => {
            state.last_update.set(Some(timestamp));
            web_sys::console::log_1(&format!("Content updated to version {}", version).into());
            if state.content_available(version) {
                dispatch_content_updated();
            }
        }
        Ok(UpdateMessage::Pong) => {}
        Ok(UpdateMessage::Error { message }) => state.show_error(&message),
        Err(e) => {
            web_sys::console::error_1(&format!("Failed to parse update message: {}", e).into());
        }
    }
}

fn dispatch_content_updated() {
    let Some(window) = web_sys::window() else {
        return;
    };
    match web_sys::CustomEvent::new(CONTENT_UPDATED_EVENT) {
        Ok(event) => {
            let _ = window.dispatch_event(&event);
        }
        Err(e) => {
            web_sys::console::error_1(&format!("Failed to create update event: {:?}", e).into());
        }
    }
}

/// Mark the dashboard stale whenever `contentUpdated` fires on the window.
///
/// The listener is removed with the same callback it was registered with
/// when the owning scope is cleaned up.
pub fn listen_for_content_updates(state: GlobalState) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        state.content_updated();
    });

    if let Err(e) = window
        .add_event_listener_with_callback(CONTENT_UPDATED_EVENT, listener.as_ref().unchecked_ref())
    {
        web_sys::console::error_1(&format!("Failed to register update listener: {:?}", e).into());
        return;
    }

    on_cleanup(move || {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                CONTENT_UPDATED_EVENT,
                listener.as_ref().unchecked_ref(),
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_update_messages() {
        let msg: UpdateMessage = serde_json::from_str(
            r#"{"type":"content_updated","version":4,"timestamp":1585000000000}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            UpdateMessage::ContentUpdated {
                version: 4,
                timestamp: 1_585_000_000_000
            }
        );

        let msg: UpdateMessage =
            serde_json::from_str(r#"{"type":"connected","connection_id":"abc","version":1}"#).unwrap();
        assert!(matches!(msg, UpdateMessage::Connected { version: 1, .. }));

        assert!(serde_json::from_str::<UpdateMessage>(r#"{"type":"data_point"}"#).is_err());
    }
}
