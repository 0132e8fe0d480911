//! Live Record Reconciler
//!
//! Keeps the in-memory view of the remote BinStatus table current: one bulk
//! fetch plus a realtime subscription whose row-level changes are folded in
//! through `apply_change`. The bulk fetch and the feed race on purpose; a
//! fetch landing after an event simply overwrites it (last write wins).

use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use crate::domain::records::{apply_change, BinStatusRecord, RECORD_CAP};
use crate::state::bins::now_ms;
use crate::supabase::client::{self, get_project_config};
use crate::supabase::realtime::{
    decode_frame, heartbeat_frame, join_frame, realtime_url, FeedMessage, HEARTBEAT_INTERVAL_MS,
};

#[derive(Clone)]
pub struct LiveRecords {
    pub records: RwSignal<Vec<BinStatusRecord>>,
    /// True once the channel join was acknowledged, false on close.
    pub connected: RwSignal<bool>,
    pub loading: RwSignal<bool>,
    /// Epoch ms of the last fetch or feed event.
    pub last_updated: RwSignal<Option<i64>>,
    socket: Rc<RefCell<Option<WebSocket>>>,
    heartbeat: Rc<RefCell<Option<gloo_timers::callback::Interval>>>,
    frame_ref: Rc<RefCell<u64>>,
}

impl LiveRecords {
    pub fn new() -> Self {
        Self {
            records: create_rw_signal(Vec::new()),
            connected: create_rw_signal(false),
            loading: create_rw_signal(false),
            last_updated: create_rw_signal(None),
            socket: Rc::new(RefCell::new(None)),
            heartbeat: Rc::new(RefCell::new(None)),
            frame_ref: Rc::new(RefCell::new(0)),
        }
    }

    /// Bulk read of the table, replacing the list wholesale. A failed fetch
    /// keeps whatever list is already showing.
    pub async fn refresh(&self, token: Option<&str>) {
        self.loading.set(true);
        match client::fetch_bin_status(token).await {
            Ok(rows) => {
                self.records.set(rows);
                self.last_updated.set(Some(now_ms()));
            }
            Err(e) => {
                web_sys::console::error_1(&format!("BinStatus fetch failed: {}", e).into());
            }
        }
        self.loading.set(false);
    }

    fn next_ref(&self) -> u64 {
        let mut r = self.frame_ref.borrow_mut();
        *r += 1;
        *r
    }

    /// Open the realtime socket and join the BinStatus channel. No retry on
    /// failure; the view keeps its offline badge.
    pub fn connect_feed(&self) {
        let config = get_project_config();
        let url = realtime_url(&config.url, &config.anon_key);

        let ws = match WebSocket::new(&url) {
            Ok(ws) => ws,
            Err(e) => {
                web_sys::console::error_1(&format!("Realtime connect failed: {:?}", e).into());
                return;
            }
        };

        self.setup_handlers(&ws);
        *self.socket.borrow_mut() = Some(ws);
    }

    fn setup_handlers(&self, ws: &WebSocket) {
        // On open: join the channel and start the heartbeat.
        let join_ref = self.next_ref();
        let socket = Rc::clone(&self.socket);
        let heartbeat = Rc::clone(&self.heartbeat);
        let frame_ref = Rc::clone(&self.frame_ref);
        let on_open = Closure::wrap(Box::new(move |_: JsValue| {
            web_sys::console::log_1(&"Realtime socket open".into());
            if let Some(ws) = socket.borrow().as_ref() {
                let _ = ws.send_with_str(&join_frame(join_ref));
            }

            let socket = Rc::clone(&socket);
            let frame_ref = Rc::clone(&frame_ref);
            let interval =
                gloo_timers::callback::Interval::new(HEARTBEAT_INTERVAL_MS, move || {
                    if let Some(ws) = socket.borrow().as_ref() {
                        let r = {
                            let mut r = frame_ref.borrow_mut();
                            *r += 1;
                            *r
                        };
                        let _ = ws.send_with_str(&heartbeat_frame(r));
                    }
                });
            *heartbeat.borrow_mut() = Some(interval);
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        on_open.forget();

        // On message: decode the frame and fold changes into the list.
        let records = self.records;
        let connected = self.connected;
        let last_updated = self.last_updated;
        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            if let Ok(text) = event.data().dyn_into::<js_sys::JsString>() {
                let text: String = text.into();
                match decode_frame(&text) {
                    Ok(FeedMessage::JoinedOk) => {
                        web_sys::console::log_1(&"Realtime channel joined".into());
                        connected.set(true);
                    }
                    Ok(FeedMessage::Change(event)) => {
                        records.update(|list| apply_change(list, event, Some(RECORD_CAP)));
                        last_updated.set(Some(now_ms()));
                    }
                    Ok(FeedMessage::ReplyError(reason)) => {
                        web_sys::console::error_1(
                            &format!("Realtime channel error: {}", reason).into(),
                        );
                        connected.set(false);
                    }
                    Ok(FeedMessage::Ignored) => {}
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("Bad realtime frame: {}", e).into(),
                        );
                    }
                }
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        on_message.forget();

        let connected = self.connected;
        let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
            web_sys::console::log_1(
                &format!("Realtime socket closed: code={}", event.code()).into(),
            );
            connected.set(false);
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        on_close.forget();

        let on_error = Closure::wrap(Box::new(move |e: JsValue| {
            web_sys::console::error_1(&format!("Realtime socket error: {:?}", e).into());
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();
    }

    /// Close the feed. Safe to call more than once; the socket handle is
    /// taken so only the first call closes it.
    pub fn disconnect(&self) {
        if let Some(interval) = self.heartbeat.borrow_mut().take() {
            interval.cancel();
        }
        if let Some(ws) = self.socket.borrow_mut().take() {
            let _ = ws.close();
        }
        self.connected.set(false);
    }
}

impl Default for LiveRecords {
    fn default() -> Self {
        Self::new()
    }
}
