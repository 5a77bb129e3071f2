//! Domains module containing business logic organized by bounded contexts.
//!
//! The server currently exposes a single domain, `tools`, holding the event
//! search tool and the registry that publishes it.

pub mod tools;
