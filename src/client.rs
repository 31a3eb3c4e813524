// Copyright 2018 Google LLC
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::Parser;
use service::{Message, MessageServiceClient};
use std::net::SocketAddr;
use tarpc::{client, context, tokio_serde::formats::Json};

#[derive(Parser)]
struct Flags {
    /// Sets the server address to connect to.
    #[clap(long, default_value = "127.0.0.1:55554")]
    server_addr: SocketAddr,
    /// Sets the payload to send.
    #[clap(long, default_value = "default test message")]
    message: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let flags = Flags::parse();
    service::init_tracing("Uppercase Client")?;

    let transport = tarpc::serde_transport::tcp::connect(flags.server_addr, Json::default);
    let client = MessageServiceClient::new(client::Config::default(), transport.await?).spawn();

    let reply = client
        .request_reply(context::current(), Message::from(flags.message))
        .await?;

    tracing::info!(
        payload = %String::from_utf8_lossy(&reply.payload),
        "client received payload"
    );

    Ok(())
}
