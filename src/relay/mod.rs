//! Client side of the relay HTTP surface and the shared wire types.
pub mod client;
pub mod protocol;
