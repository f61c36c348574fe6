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
//! End-to-end exercises: a real subscriber, a real socket, a datagram caught on the far side.

use tracing_graylog::field::FieldValue;
use tracing_graylog::gelf::Gelf;
use tracing_graylog::layer::Layer;

use serde_json::Value;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;

use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

#[derive(Debug)]
struct TestError(&'static str);

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for TestError {}

/// Stand in for a Graylog input: a socket the layer's datagrams land on.
fn reader() -> (UdpSocket, SocketAddr) {
    let sock = UdpSocket::bind("127.0.0.1:0").expect("failed to bind reader socket");
    sock.set_read_timeout(Some(Duration::from_secs(5)))
        .expect("failed to set read timeout");
    let addr = sock.local_addr().expect("failed to get reader address");
    (sock, addr)
}

fn read_message(sock: &UdpSocket) -> Value {
    let mut buf = [0u8; 8192];
    let (len, _) = sock.recv_from(&mut buf).expect("no datagram received");
    serde_json::from_slice(&buf[..len]).expect("payload is not valid JSON")
}

#[test]
fn writing_to_udp() {
    let (sock, addr) = reader();

    let layer = Layer::new(
        addr,
        Gelf::builder("test_facility")
            .extra("foo", "bar")
            .extra("error1", FieldValue::error(TestError("error from extra")))
            .build(),
    )
    .expect("failed to construct layer");
    let subscriber = Registry::default().with(layer);

    let err = TestError("error from data");
    let mut expected_line = 0;
    tracing::subscriber::with_default(subscriber, || {
        expected_line = line!() + 1;
        tracing::info!(
            withField = "1",
            error = &err as &(dyn std::error::Error + 'static),
            "test message\nsecond line"
        );
    });

    let msg = read_message(&sock);

    assert_eq!(msg["short_message"], "test message");
    assert_eq!(msg["full_message"], "test message\nsecond line");
    assert_eq!(msg["level"], 6);
    assert_eq!(msg["facility"], "test_facility");
    assert_eq!(msg["version"], "1.1");

    // Static extras, the event's own field, and the attached error: four entries, all
    // underscore-prefixed, event extras layered over the construction-time ones.
    let extra: Vec<&String> = msg
        .as_object()
        .unwrap()
        .keys()
        .filter(|k| k.starts_with('_'))
        .collect();
    assert_eq!(extra.len(), 4, "wrong number of extra fields in {:?}", extra);
    assert_eq!(msg["_foo"], "bar");
    assert_eq!(msg["_withField"], "1");
    assert_eq!(msg["_error1"], "error from extra");
    assert_eq!(msg["_error"], "error from data");

    // Location is the callsite of the `info!` above, not anything in the layer or the
    // subscriber's dispatch path.
    assert!(
        msg["file"].as_str().unwrap().ends_with("udp.rs"),
        "msg.file: {:?}",
        msg["file"]
    );
    assert_eq!(msg["line"].as_u64(), Some(u64::from(expected_line)));
}

#[test]
fn error_level_reporting() {
    let (sock, addr) = reader();

    let layer = Layer::new(addr, Gelf::builder("test_facility").extra("foo", "bar").build())
        .expect("failed to construct layer");
    let subscriber = Registry::default().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        tracing::error!("test message\nsecond line");
    });

    let msg = read_message(&sock);

    assert_eq!(msg["short_message"], "test message");
    assert_eq!(msg["full_message"], "test message\nsecond line");
    assert_eq!(msg["level"], 7);
    assert_eq!(msg["facility"], "test_facility");
    assert_eq!(msg["_foo"], "bar");
}

#[test]
fn bad_addresses_fail_at_construction() {
    assert!(Layer::new(
        "this-host-does-not-exist.invalid:12201",
        Gelf::builder("test_facility").build()
    )
    .is_err());
}
