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
//! A [`tracing-subscriber`] [`Layer`] implementation for forwarding [`tracing`] [`Event`]s to a
//! [Graylog]-compatible receiver as [GELF] over UDP.
//!
//! [`tracing-subscriber`]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/index.html
//! [`Layer`]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/trait.Layer.html
//! [`tracing`]: https://docs.rs/tracing/latest/tracing/index.html
//! [`Event`]: https://docs.rs/tracing/0.1.35/tracing/struct.Event.html
//! [Graylog]: https://graylog.org
//! [GELF]: https://go2docs.graylog.org/current/getting_in_log_data/gelf.html
//!
//! # Introduction
//!
//! The [`tracing`] crate is a "scoped, structured logging and diagnostics system". It draws a
//! sharp line between producers of events and their consumers ([`Subscriber`]s, in [`tracing`]
//! parlance), and the [`tracing-subscriber`] crate decomposes the consumer side further into
//! [`Layer`]s-- modular implementations of specific behaviors that can be stacked up in a single
//! [`Subscriber`].
//!
//! [`Subscriber`]: https://docs.rs/tracing/latest/tracing/trait.Subscriber.html
//!
//! This crate provides one such facet: a [`Layer`] that maps each [`Event`] to a GELF document
//! and ships it to a Graylog input as a single UDP datagram. GELF is a structured, JSON-based
//! format; beyond the standard `short_message`/`full_message`/`level`/`facility` attributes, it
//! carries arbitrary event metadata as underscore-prefixed "extra" fields, which is where this
//! layer puts both the static fields configured at construction and the fields recorded on each
//! event.
//!
//! Delivery is best-effort by design: a log pipe that breaks must never take the host
//! application down with it. Send failures are contained inside the layer.
//!
//! # Usage
//!
//! ```no_run
//! use tracing::info;
//! use tracing_graylog::gelf::Gelf;
//! use tracing_graylog::layer::Layer;
//! use tracing_subscriber::layer::SubscriberExt; // Needed to get `with()`
//! use tracing_subscriber::registry::Registry;
//!
//! let layer = Layer::new(
//!     "graylog.internal:12201",
//!     Gelf::builder("my-service")
//!         .extra("environment", "staging")
//!         .build(),
//! )
//! .unwrap();
//!
//! // Attach the layer to a locally-constructed subscriber; no process-wide
//! // registry is involved.
//! let subscriber = Registry::default().with(layer);
//! let _guard = tracing::subscriber::set_default(subscriber);
//!
//! info!("Hello, world!");
//! ```
//!
//! Will show up in Graylog as a message with `short_message` "Hello, world!", facility
//! "my-service" and an extra field `_environment` = "staging".
//!
//! The transport is configurable; anything implementing
//! [`Transport`](crate::transport::Transport) can be injected via
//! [`Layer::with_transport`](crate::layer::Layer::with_transport), and the severity table via
//! [`Layer::map_level_with`](crate::layer::Layer::map_level_with).

pub mod error;
pub mod field;
pub mod gelf;
pub mod layer;
pub mod transport;
