//! PawCart Core - Shared types library.
//!
//! This crate provides common types used across all PawCart components:
//! - `storefront` - Public-facing pet-products store
//! - `admin` - Internal administration panel
//! - `client` - REST backend API client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Every entity
//! here is a thin client-side mirror of a backend resource: the backend owns
//! all creation and mutation, and these types only reflect fetched state.
//!
//! # Modules
//!
//! - [`types`] - Prices in minor currency units, newtype IDs, status enums,
//!   and entity mirrors (products, orders, discounts, tax configuration)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
