//! URL building and name handling
//!
//! This module contains the pure string utilities the crawler relies on:
//! - Tag encoding for catalog request URLs
//! - Cache-busting query values
//! - Filesystem-safe name sanitization

mod encode;
mod sanitize;

pub use encode::{build_file_url, build_page_url, cache_buster, encode_tag};
pub use sanitize::sanitize_component;
