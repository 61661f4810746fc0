// pdf-convert/src/lib.rs

//! HTML to PDF conversion through wkhtmltopdf.
//!
//! [`PdfConverter`] turns [`ConversionOptions`] into [`RenderSettings`]
//! (page geometry, margins, header/footer content and the page flag string)
//! and hands them to a [`RenderEngine`].

pub mod config;
pub mod context;
pub mod converter;
pub mod error;
pub mod models;
pub mod renderers;

pub use context::{CookieLookup, RequestCookies};
pub use converter::{PdfConverter, RenderSettings};
pub use error::{ConvertError, RenderError, Result};
pub use models::{
    ConversionOptions, HeaderFooter, HeaderFooterArgs, HeaderFooterKind, HeaderFooterRole,
    PageMargins, PageOrientation, PageSize, TextHeaderFooter,
};
pub use renderers::{RenderEngine, WkHtmlToPdf};
