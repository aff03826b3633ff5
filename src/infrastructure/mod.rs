// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. These adapters wrap external dependencies such as the
//! HTTP stack.
//!
//! # Available Adapters
//!
//! - [`http`]: Remote processing over HTTP (implements [`ImageProcessor`])
//!
//! [`ImageProcessor`]: crate::application::port::ImageProcessor

pub mod http;

pub use http::HttpImageProcessor;
