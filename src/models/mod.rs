//! Wire-level data models shared between the gateway and its client.
//!
//! These are the explicit schemas the HTTP surface commits to, serialized
//! as camelCase JSON via `serde`.

pub mod object;
pub mod upload;
