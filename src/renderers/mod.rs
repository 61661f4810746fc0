// pdf-convert/src/renderers/mod.rs

mod args;
mod wkhtmltopdf;

pub use args::split_args;
pub use wkhtmltopdf::{Invocation, WkHtmlToPdf};

use crate::converter::RenderSettings;
use crate::error::RenderError;
use std::path::Path;

/// An HTML to PDF rendering backend.
pub trait RenderEngine: Send + Sync {
    fn generate_pdf(&self, settings: &RenderSettings, html: &str) -> Result<Vec<u8>, RenderError>;

    fn generate_pdf_from_file(
        &self,
        settings: &RenderSettings,
        path: &Path,
        cover_html: Option<&str>,
    ) -> Result<Vec<u8>, RenderError>;
}

impl<E: RenderEngine + ?Sized> RenderEngine for std::sync::Arc<E> {
    fn generate_pdf(&self, settings: &RenderSettings, html: &str) -> Result<Vec<u8>, RenderError> {
        (**self).generate_pdf(settings, html)
    }

    fn generate_pdf_from_file(
        &self,
        settings: &RenderSettings,
        path: &Path,
        cover_html: Option<&str>,
    ) -> Result<Vec<u8>, RenderError> {
        (**self).generate_pdf_from_file(settings, path, cover_html)
    }
}
