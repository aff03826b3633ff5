// SPDX-License-Identifier: MPL-2.0
//! Application layer - Ports between the session and the outside world.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The session and app driver use the ports, never the adapters directly

pub mod port;
