#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the catalog-core crate.
//! [catalog_core]: https://docs.rs/catalog_core/latest/catalog_core/index.html
//! [catalog_axum]: https://docs.rs/catalog_axum/latest/catalog_axum/index.html
//! [catalog_sqlite]: https://docs.rs/catalog_sqlite/latest/catalog_sqlite/index.html
#![doc = include_str!("../README.md")]

/// Core domain models for the product catalog.
///
/// This module contains the data structures that describe a product, the
/// pages returned by list operations, and the aggregated catalog statistics.
/// The models carry no persistence logic; storage adapters map them to and
/// from their own row types.
pub mod models;

/// Interface traits for the product catalog.
///
/// These are the "ports" of the hexagonal architecture: the contract between
/// the HTTP layer and whatever store holds the products, plus the
/// application-level hooks (such as authorization) that a deployment
/// provides.
pub mod ports;

/// Translation of raw query parameters into a store-level query.
pub mod query;

/// Field-level validation shared by the create and update operations.
pub mod validate;
