//! # stratus-api
//!
//! Client-side core of the stratus control plane API.
//!
//! Handles:
//! - **Resources**: Wire-level JSON envelopes and their mapping to domain models.
//! - **Models**: Applications, organizations, environments, and their summaries.
//! - **Gateway**: The HTTP transport boundary and its `reqwest` implementation.
//! - **Repository**: Per-aggregate operations, address construction, pagination,
//!   and error classification.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod error;
pub mod gateway;
pub mod models;
pub mod repository;
pub mod resources;

#[cfg(test)]
pub(crate) mod testing;
