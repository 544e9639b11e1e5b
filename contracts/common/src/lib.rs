//! Shared utilities for the Termlock contract suite.
//!
//! Currently this crate carries the role registry ([`roles`]): the
//! Owner/SuperAdmin singletons, the Admin membership set, and the
//! functional-role assignments every contract in the workspace gates its
//! privileged entry points on.

#![no_std]

pub mod roles;

pub use roles::RoleKind;
