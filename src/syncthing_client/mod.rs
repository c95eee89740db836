mod api_types;
mod client;
mod helpers;

pub use api_types::{ConnectionsResponse, SyncthingEvent};
pub use client::SyncthingClient;
