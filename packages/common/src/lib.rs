//! Common - Shared Types for the Threshold Bridge Contracts
//!
//! This package provides the wire types exchanged between relayers and the
//! bridge contract, shared by the contract crates and their test suites.

pub mod types;

pub use types::{LogicCallArgs, Signature, TokenAmount};
