//! Shared building blocks for the staking contract suite.
//!
//! This crate provides:
//! - [`access`]: capability-based access control: an explicit persistent map
//!   from identity to the capabilities it has been granted.

#![no_std]

pub mod access;

pub use access::Capability;
