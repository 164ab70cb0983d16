//! # qirust-pdf
//!
//! A Rust library for rendering QR code symbols into PDF documents.
//!
//! `qirust-pdf` takes an already encoded QR code (a grid of dark and light modules) and draws it
//! as filled rectangles on a single PDF page, optionally with a logo centered on top. Encoding is
//! left to any QR encoder that can report its modules; [`layout`] turns such a grid into page
//! geometry.
//!
//! ## Features
//!
//! - Render module matrices as vector rectangles, sized in mm, pt, cm or in.
//! - Custom opaque foreground and background colors.
//! - Centered logos (PNG, JPEG and the other formats `image` reads), with aspect-ratio-preserving
//!   sizing when only the width is given.
//! - A pluggable [`canvas::Canvas`] so the same writer can drive other document backends.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qirust-pdf = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Render a symbol with a logo:
//!
//! ```rust,no_run
//! use qirust_pdf::data::{Color, LogoSpec, RenderOptions};
//! use qirust_pdf::layout::{matrix_from_fn, Layout};
//! use qirust_pdf::writer::PdfWriter;
//!
//! fn main() -> qirust_pdf::Result<()> {
//!     // Any encoder works; this one just draws a checkerboard.
//!     let matrix = matrix_from_fn(29, |x, y| (x + y) % 2 == 0);
//!     let mut data = Layout::new(60.0, 5.0).apply(matrix)?;
//!     data.foreground_color = Color::rgb(255, 165, 0); // Orange
//!     data.logo = Some(LogoSpec::new("src/logo.png").with_width(12));
//!
//!     let pdf = PdfWriter::new().render(&data, &RenderOptions::default())?;
//!     std::fs::write("qr.pdf", pdf)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`writer`]: Validation and rendering, the core of the crate.
//! - [`canvas`]: The drawing surface and its PDF implementation.
//! - [`data`]: Input types (symbol data, colors, logo, options).
//! - [`layout`]: Page geometry from a bare module grid.
//! - [`metrics`]: Logo size lookup.
//! - [`helper`]: Utilities for rendering straight to bytes or files.

#![forbid(unsafe_code)]

pub mod canvas;
pub mod data;
pub mod error;
pub mod helper;
pub mod layout;
pub mod metrics;
pub mod writer;

pub use error::{Error, Result};
