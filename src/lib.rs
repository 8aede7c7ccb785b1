//! Dive Portal - membership portal backend for a diving club.
//!
//! Tracks what members have paid for (one-time dive credits and periodical
//! fees), lets them subscribe to club events with the best payment they
//! hold, and manages club memberships on a configurable period grid.
//!
//! The crate is laid out in hexagonal layers: `domain` holds pure rules,
//! `ports` the storage traits, `application` the command and query
//! handlers, and `adapters` the HTTP, PostgreSQL and in-memory
//! implementations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
