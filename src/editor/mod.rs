//! Client-side editing core: history, pending adjustments, the comparator
//! and the orchestrator that talks to the relay.
pub mod adjustments;
pub mod comparator;
pub mod history;
pub mod image;
pub mod orchestrator;
