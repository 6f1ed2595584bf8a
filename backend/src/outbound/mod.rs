//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL (Diesel) and in-memory user repositories
//! - **cache**: bounded in-process user side-cache
//! - **completion**: reqwest client for the chat-completion proxy
//!
//! Adapters translate between domain types and infrastructure
//! representations and carry no business rules.

pub mod cache;
pub mod completion;
pub mod persistence;
