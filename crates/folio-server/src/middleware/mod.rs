//! HTTP middleware.

pub(crate) mod error_pages;
pub(crate) mod security;
