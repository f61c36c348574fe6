// Copyright (C) 2026 The tracing-graylog developers
//
// This file is part of tracing-graylog.
//
// tracing-graylog is free software: you can redistribute it and/or modify it under the terms of
// the GNU General Public License as published by the Free Software Foundation, either version 3 of
// the License, or (at your option) any later version.
//
// tracing-graylog is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See
// the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with tracing-graylog.
// If not, see <http://www.gnu.org/licenses/>.
//! [`Layer`] implementations.
//!
//! [`Layer`]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/trait.Layer.html
//!
//! The translation from [`tracing`] events to Graylog messages occurs in three parts:
//!
//! 1. visiting the event to extract its message text & typed fields
//!
//! 2. incorporating those into a GELF document ([`Gelf`])
//!
//! 3. transporting that document to a Graylog input ([`Transport`])
//!
//! [`Layer`] glues the three together and hangs them off a
//! [`tracing_subscriber::Subscriber`]. It subscribes to every level; if only a slice of events
//! should reach Graylog, wrap the layer in one of `tracing-subscriber`'s filter combinators
//! rather than configuring anything here.
//!
//! [`tracing`]: https://docs.rs/tracing/latest/tracing/index.html
//! [`tracing_subscriber::Subscriber`]: https://docs.rs/tracing/latest/tracing/trait.Subscriber.html

use crate::error::{Error, Result};
use crate::field::FieldValue;
use crate::gelf::Gelf;
use crate::transport::{Transport, UdpTransport};

use backtrace::Backtrace;
use tracing::Event;
use tracing_core::field::{Field, Visit};
use tracing_subscriber::layer::Context;

use std::collections::BTreeMap;

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                          struct Layer                                          //
////////////////////////////////////////////////////////////////////////////////////////////////////

/// A [`tracing-subscriber`]-compliant [`Layer`] implementation that will forward [`Event`]s to a
/// Graylog input as GELF.
///
/// [`tracing-subscriber`]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/index.html
/// [`Layer`]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/trait.Layer.html
/// [`Event`]: https://docs.rs/tracing/0.1.35/tracing/struct.Event.html
///
/// All state is fixed at construction, so a single instance may be driven from any number of
/// threads; the only syscall made per event is one UDP send.
pub struct Layer<T: Transport> {
    formatter: Gelf,
    map_level: Box<dyn Fn(&tracing::Level) -> u8 + Send + Sync>,
    transport: T,
}

/// The fixed default table mapping [`tracing`] verbosity levels to the numeric `level` attribute.
///
/// [`tracing`]: https://docs.rs/tracing/latest/tracing/index.html
///
/// The scale rises with severity and saturates at 7 from WARN up: informational traffic lands on
/// 6 and anything alarming on 7. Receivers that want the classic syslog severity codes instead
/// can swap the table out via [`Layer::map_level_with`].
fn default_level_mapping(level: &tracing::Level) -> u8 {
    match level {
        &tracing::Level::TRACE => 4,
        &tracing::Level::DEBUG => 5,
        &tracing::Level::INFO => 6,
        &tracing::Level::WARN | &tracing::Level::ERROR => 7,
    }
}

impl Layer<UdpTransport> {
    /// Construct a [`Layer`] that will send GELF documents via UDP to the Graylog input at
    /// `addr`.
    ///
    /// `addr` is resolved eagerly, so a bad address is reported here; whether anything is
    /// listening at it will only ever be known to the network.
    pub fn new<A: std::net::ToSocketAddrs>(addr: A, formatter: Gelf) -> Result<Self> {
        Ok(Layer {
            formatter,
            map_level: Box::new(default_level_mapping),
            transport: UdpTransport::new(addr)?,
        })
    }
}

impl<T: Transport> Layer<T> {
    /// Construct a [`Layer`] that will send GELF documents via transport `transport`.
    pub fn with_transport(transport: T, formatter: Gelf) -> Layer<T> {
        Layer {
            formatter,
            map_level: Box::new(default_level_mapping),
            transport,
        }
    }

    /// Replace the default severity table.
    pub fn map_level_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&tracing::Level) -> u8 + Send + Sync + 'static,
    {
        self.map_level = Box::new(f);
        self
    }
}

/// Collects one [`Event`]'s message text & typed fields.
///
/// The distinguished "message" field becomes the message body; everything else becomes a
/// [`FieldValue`] keyed by its field name, typed per the [`Visit`] callback that delivered it.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: BTreeMap<&'static str, FieldValue>,
}

impl Visit for FieldVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.insert(field.name(), FieldValue::Float(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name(), FieldValue::Int(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name(), FieldValue::UInt(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name(), FieldValue::Bool(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        } else {
            self.fields
                .insert(field.name(), FieldValue::Str(value.to_owned()));
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.fields.insert(field.name(), FieldValue::error(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            // The tracing macros `info!()`, `event!()` & the like pre-format the `message` field
            // so that `value` actually refers to a `std::fmt::Arguments` instance, which prints
            // to a debug format without enclosing double-quotes.
            self.message = Some(format!("{:?}", value));
        } else {
            self.fields
                .insert(field.name(), FieldValue::Other(format!("{:?}", value)));
        }
    }
}

impl<S, T> tracing_subscriber::layer::Layer<S> for Layer<T>
where
    S: tracing::Subscriber,
    T: Transport + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        // The event's own metadata names the application callsite; no stack-walking or
        // frame-skipping over dispatch machinery is needed to recover file & line.
        let meta = event.metadata();

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let FieldVisitor { message, fields } = visitor;

        message
            .ok_or(Error::NoMessageField {
                name: meta.name(),
                back: Backtrace::new(),
            }) // :=> Result<String>
            .and_then(|text| {
                self.formatter.format(
                    (self.map_level)(meta.level()),
                    &text,
                    fields,
                    meta.file(),
                    meta.line(),
                )
            }) // :=> Result<Vec<u8>>
            .and_then(|buf| self.transport.send(&buf))
            .unwrap_or_else(|_err| {
                // Swallowed: logging is best-effort, and emitting a tracing event from inside
                // the layer would re-enter it.
                0
            });
    }
}

#[cfg(test)]
mod smoke {

    use super::*;

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::registry::Registry;

    use std::sync::{Arc, Mutex};

    /// A [`Transport`] that just captures payloads.
    #[derive(Clone, Default)]
    struct CaptureTransport {
        sent: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    impl CaptureTransport {
        fn take(&self) -> Vec<serde_json::Value> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|buf| serde_json::from_slice(buf).expect("payload is not valid JSON"))
                .collect()
        }
    }

    impl Transport for CaptureTransport {
        fn send(&self, buf: &[u8]) -> Result<usize> {
            self.sent.lock().unwrap().push(buf.to_vec());
            Ok(buf.len())
        }
    }

    /// A [`Transport`] whose every send fails.
    struct BrokenTransport;

    impl Transport for BrokenTransport {
        fn send(&self, _buf: &[u8]) -> Result<usize> {
            Err(Error::Transport {
                source: "wire cut".into(),
                back: Backtrace::new(),
            })
        }
    }

    #[test]
    fn default_table_is_fixed() {
        assert_eq!(default_level_mapping(&tracing::Level::TRACE), 4);
        assert_eq!(default_level_mapping(&tracing::Level::DEBUG), 5);
        assert_eq!(default_level_mapping(&tracing::Level::INFO), 6);
        assert_eq!(default_level_mapping(&tracing::Level::WARN), 7);
        assert_eq!(default_level_mapping(&tracing::Level::ERROR), 7);
        // Pure in the event: same level, same code, whatever else rides along.
        assert_eq!(
            default_level_mapping(&tracing::Level::INFO),
            default_level_mapping(&tracing::Level::INFO)
        );
    }

    #[test]
    fn forwards_events_through_the_transport() {
        let capture = CaptureTransport::default();
        let layer = Layer::with_transport(
            capture.clone(),
            Gelf::builder("smoke").host("bree.local").build(),
        );

        let subscriber = Registry::default().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(answer = 42, enabled = true, "Hello, world!");
        });

        let sent = capture.take();
        assert_eq!(sent.len(), 1);

        let msg = &sent[0];
        assert_eq!(msg["short_message"], "Hello, world!");
        assert_eq!(msg["full_message"], "Hello, world!");
        assert_eq!(msg["host"], "bree.local");
        assert_eq!(msg["facility"], "smoke");
        assert_eq!(msg["level"], 6);
        assert_eq!(msg["_answer"], "42");
        assert_eq!(msg["_enabled"], "true");
        assert!(msg["file"].as_str().unwrap().ends_with("layer.rs"));
    }

    #[test]
    fn events_without_a_message_are_dropped() {
        let capture = CaptureTransport::default();
        let layer = Layer::with_transport(capture.clone(), Gelf::builder("smoke").build());

        let subscriber = Registry::default().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(answer = 42);
            tracing::info!("still alive");
        });

        // The field-only event vanishes; the one after it is unaffected.
        let sent = capture.take();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["short_message"], "still alive");
    }

    #[test]
    fn send_failures_stay_inside_the_layer() {
        let layer = Layer::with_transport(BrokenTransport, Gelf::builder("smoke").build());

        let subscriber = Registry::default().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("into the void");
        });
        // Reaching this line is the assertion.
    }

    #[test]
    fn custom_severity_tables_are_honored() {
        let capture = CaptureTransport::default();
        let layer = Layer::with_transport(capture.clone(), Gelf::builder("smoke").build())
            .map_level_with(|_| 0);

        let subscriber = Registry::default().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("all emergencies now");
        });

        assert_eq!(capture.take()[0]["level"], 0);
    }
}
