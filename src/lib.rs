// SPDX-License-Identifier: MPL-2.0
//! `pixel_studio` is the editing-session core of a remote image-processing
//! client.
//!
//! Pixel work happens in a remote service. This crate decides which requests
//! are sent and when, keeps an undo/redo history of the results, and drives
//! two-phase perspective capture.

#![doc(html_root_url = "https://docs.rs/pixel_studio/0.1.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod media;
pub mod session;

#[cfg(test)]
pub(crate) mod test_utils;
