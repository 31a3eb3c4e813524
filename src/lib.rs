// Copyright 2018 Google LLC
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tarpc::context;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*};

/// The one message shape on the wire. Requests and replies are both a
/// `Message`; the payload is opaque bytes and nothing else is carried.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub payload: Vec<u8>,
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message {
            payload: text.into_bytes(),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message {
            payload: text.as_bytes().to_vec(),
        }
    }
}

impl From<Vec<u8>> for Message {
    fn from(payload: Vec<u8>) -> Self {
        Message { payload }
    }
}

/// This is the service definition. It looks a lot like a trait definition.
/// It defines one RPC, request_reply, which takes a Message and returns a
/// Message of the same shape.
#[tarpc::service]
pub trait MessageService {
    /// Returns the message with its payload uppercased.
    async fn request_reply(message: Message) -> Message;
}

/// Uppercases a payload as text. Valid UTF-8 gets the Unicode case mapping;
/// anything else falls back to byte-wise ASCII uppercasing, so non-alphabetic
/// bytes pass through unchanged. Total and idempotent.
pub fn uppercase(payload: &[u8]) -> Vec<u8> {
    match std::str::from_utf8(payload) {
        Ok(text) => text.to_uppercase().into_bytes(),
        Err(_) => payload.to_ascii_uppercase(),
    }
}

// This is the type that implements the generated MessageService trait. It is
// the business logic and is used to start the server. The SocketAddr is the
// peer the channel was accepted from.
#[derive(Clone)]
pub struct Uppercase(pub SocketAddr);

impl MessageService for Uppercase {
    async fn request_reply(self, _: context::Context, message: Message) -> Message {
        tracing::info!(
            peer = %self.0,
            payload = %String::from_utf8_lossy(&message.payload),
            "received payload"
        );
        Message {
            payload: uppercase(&message.payload),
        }
    }
}

/// Initializes a tracing subscriber logging to stderr, filtered by the
/// environment.
pub fn init_tracing(service_name: &str) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    tracing::debug!(%service_name, "tracing initialized");
    Ok(())
}
