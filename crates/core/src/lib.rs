//! Core currency logic for Agora.
//!
//! This crate contains pure value logic with no storage or network
//! dependencies.
//!
//! # Modules
//!
//! - `currency` - Currency definitions, arbitrary-precision values, conversion
//! - `pricing` - Listing prices and the legacy price format

pub mod currency;
pub mod pricing;
