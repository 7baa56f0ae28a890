//! Driven adapters: the PostgreSQL record store and the cache backends.
//!
//! Each adapter translates between its infrastructure types and the domain
//! types at the port boundary and nothing more.

pub mod cache;
pub mod persistence;
