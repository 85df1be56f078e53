//! Upload → convert (PNG / JPEG / GIF) → download web application.
//!
//! [`infrastructure::image_converter::convert`] is the standalone conversion
//! utility; everything else wires it into an axum server.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
