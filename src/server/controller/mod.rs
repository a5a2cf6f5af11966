//! HTTP request handlers.
//!
//! The server exposes two read-only endpoints: an instructions page and the per-user
//! calendar feeds. Feeds are produced by the bot and the poller; handlers only read
//! them from the data directory.

pub mod feed;

#[cfg(test)]
mod test;
