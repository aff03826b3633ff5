// SPDX-License-Identifier: MPL-2.0
//! Image handles exchanged between the session, its history and the
//! processing service.

pub mod image;

pub use image::{ImageKind, ImageRef};
