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
//! [GELF]-compliant message formatting.
//!
//! [GELF]: https://go2docs.graylog.org/current/getting_in_log_data/gelf.html
//!
//! [`Gelf`] carries the per-process configuration (facility, host, static extra fields) and
//! assembles one [`Message`] per event. A GELF document is plain JSON:
//!
//! ```json
//! {
//!   "version": "1.1",
//!   "host": "bree.local",
//!   "short_message": "A short message that helps you identify what is going on",
//!   "full_message": "Backtrace here\n\nmore stuff",
//!   "timestamp": 1385053862.3072,
//!   "level": 6,
//!   "_user_id": 9001
//! }
//! ```
//!
//! Keys other than the well-known ones must be prefixed with an underscore; this crate applies
//! the prefix itself, so callers supply bare names.

use crate::error::{Error, Result};
use crate::field::FieldValue;

use backtrace::Backtrace;
use chrono::prelude::*;
use serde::Serialize;

use std::collections::BTreeMap;

/// A single GELF document, ready for serialization.
///
/// Ephemeral: one is assembled per event, serialized, and dropped. The field set mirrors the
/// classic GELF attributes; `facility`, `file` and `line` are carried as first-class attributes
/// the way the original UDP writers sent them.
#[derive(Debug, Serialize)]
pub struct Message {
    pub(crate) version: &'static str,
    pub(crate) host: String,
    pub(crate) short_message: String,
    pub(crate) full_message: String,
    pub(crate) timestamp: f64,
    pub(crate) level: u8,
    pub(crate) facility: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) line: Option<u32>,
    /// Merged extra fields, keys already underscore-prefixed
    #[serde(flatten)]
    pub(crate) extra: BTreeMap<String, String>,
}

/// Figure out a value for the GELF `host` attribute.
///
/// Preference order: hostname, then a local IP address, then the nil value "-". Unlike syslog's
/// HOSTNAME there are no character-set constraints to enforce here.
fn default_host() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .or_else(|| {
            local_ip_address::local_ip()
                .ok()
                .map(|ip| ip.to_string())
        })
        .unwrap_or_else(|| "-".to_string())
}

/// A formatter that produces GELF documents.
///
/// Construction-time state is immutable thereafter; [`format`](Gelf::format) takes `&self` and
/// may be called concurrently.
pub struct Gelf {
    facility: String,
    host: String,
    extra: BTreeMap<String, FieldValue>,
}

pub struct GelfBuilder {
    imp: Gelf,
}

impl GelfBuilder {
    /// Override the `host` attribute stamped on every message.
    pub fn host<H: Into<String>>(mut self, host: H) -> Self {
        self.imp.host = host.into();
        self
    }

    /// Add a static extra field, merged into every outgoing message.
    ///
    /// Supply the bare name; the underscore prefix is applied at send time. A per-event field
    /// recorded under the same name takes precedence.
    pub fn extra<K: Into<String>, V: Into<FieldValue>>(mut self, key: K, value: V) -> Self {
        self.imp.extra.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Gelf {
        self.imp
    }
}

impl Gelf {
    /// Start building a formatter for messages from the service named `facility`.
    pub fn builder<F: Into<String>>(facility: F) -> GelfBuilder {
        GelfBuilder {
            imp: Gelf {
                facility: facility.into(),
                host: default_host(),
                extra: BTreeMap::new(),
            },
        }
    }

    /// Assemble a [`Message`] from one event's parts.
    ///
    /// `text` is split on its first newline: everything before it becomes `short_message`, and
    /// the whole (trimmed) text becomes `full_message`-- so the two are equal for single-line
    /// messages. `fields` overlays the static extras, every value is stringified, and every key
    /// gains its underscore prefix.
    pub(crate) fn render(
        &self,
        level: u8,
        text: &str,
        fields: BTreeMap<&'static str, FieldValue>,
        file: Option<&str>,
        line: Option<u32>,
    ) -> Message {
        let text = text.trim();
        let short = match text.split_once('\n') {
            Some((first, _)) => first,
            None => text,
        };

        let mut extra = BTreeMap::new();
        for (key, value) in &self.extra {
            extra.insert(format!("_{}", key), value.to_string());
        }
        for (key, value) in &fields {
            extra.insert(format!("_{}", key), value.to_string());
        }

        let now = Utc::now();

        Message {
            version: "1.1",
            host: self.host.clone(),
            short_message: short.to_owned(),
            full_message: text.to_owned(),
            timestamp: now.timestamp() as f64 + f64::from(now.timestamp_subsec_millis()) / 1.0e3,
            level,
            facility: self.facility.clone(),
            file: file.map(str::to_owned),
            line,
            extra,
        }
    }

    /// Assemble & serialize one event, yielding the bytes to hand to a
    /// [`Transport`](crate::transport::Transport).
    pub fn format(
        &self,
        level: u8,
        text: &str,
        fields: BTreeMap<&'static str, FieldValue>,
        file: Option<&str>,
        line: Option<u32>,
    ) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.render(level, text, fields, file, line)).map_err(|err| {
            Error::Format {
                source: Box::new(err),
                back: Backtrace::new(),
            }
        })
    }
}
