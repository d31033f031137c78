use anyhow::Context;
use std::env;
use std::net::SocketAddr;

pub const DEFAULT_PORT: u16 = 4000;

pub fn port() -> anyhow::Result<u16> {
    match env::var("PORT") {
        Ok(raw) => raw
            .trim()
            .parse::<u16>()
            .with_context(|| format!("PORT must be a valid port number, got {raw:?}")),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

pub fn bind_addr() -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from(([0, 0, 0, 0], port()?)))
}
