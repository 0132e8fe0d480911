//! Remote Data Client
//!
//! Thin client for the managed Supabase project: REST reads against the
//! `BinStatus` table, credential/session operations, and the wire codec for
//! the realtime change feed. The service itself is consumed, never
//! reimplemented.

pub mod client;
pub mod realtime;

pub use client::{get_project_config, AuthSession, User};
