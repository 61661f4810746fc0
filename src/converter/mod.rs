// pdf-convert/src/converter/mod.rs

mod flags;
mod header_footer;

pub use flags::create_custom_page_flags;
pub use header_footer::{
    apply_header_footer, is_partial_html, resolve_margins, ARGS_SECTION_MARGIN,
    HTML_SECTION_MARGIN,
};

use crate::context::CookieLookup;
use crate::error::{ConvertError, Result};
use crate::models::{
    non_empty, ConversionOptions, HeaderFooterRole, PageMargins, PageOrientation, PageSize,
};
use crate::renderers::RenderEngine;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Everything a rendering engine needs for one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub grayscale: bool,
    pub low_quality: bool,
    pub orientation: PageOrientation,
    pub page_size: PageSize,
    pub page_width: Option<f32>,
    pub page_height: Option<f32>,
    pub zoom: f32,
    pub margins: PageMargins,
    /// Partial markup rendered as page header.
    pub page_header_html: Option<String>,
    /// Partial markup rendered as page footer.
    pub page_footer_html: Option<String>,
    /// Global renderer arguments.
    pub custom_args: Option<String>,
    /// Page arguments, applied to the converted page.
    pub custom_page_args: Option<String>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            grayscale: false,
            low_quality: false,
            orientation: PageOrientation::default(),
            page_size: PageSize::default(),
            page_width: None,
            page_height: None,
            zoom: 1.0,
            margins: PageMargins::default(),
            page_header_html: None,
            page_footer_html: None,
            custom_args: None,
            custom_page_args: None,
        }
    }
}

impl RenderSettings {
    /// Appends space separated arguments to the page flags.
    pub fn append_page_args(&mut self, args: &str) {
        let args = args.trim();
        if args.is_empty() {
            return;
        }

        match &mut self.custom_page_args {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(args);
            }
            None => self.custom_page_args = Some(args.to_string()),
        }
    }
}

/// Converts HTML to PDF by translating [`ConversionOptions`] into
/// [`RenderSettings`] and handing them to a [`RenderEngine`].
pub struct PdfConverter<E> {
    engine: E,
    cookies: Option<Arc<dyn CookieLookup>>,
}

impl<E: RenderEngine> PdfConverter<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            cookies: None,
        }
    }

    /// Cookies of the current request, used to forward the forms
    /// authentication cookie to the renderer.
    pub fn with_cookies(mut self, cookies: impl CookieLookup + 'static) -> Self {
        self.cookies = Some(Arc::new(cookies));
        self
    }

    pub fn with_shared_cookies(mut self, cookies: Arc<dyn CookieLookup>) -> Self {
        self.cookies = Some(cookies);
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[instrument(skip_all, fields(html_len = html.len()))]
    pub fn convert_html(&self, html: &str, options: &ConversionOptions) -> Result<Vec<u8>> {
        if html.trim().is_empty() {
            return Err(ConvertError::empty_argument("html"));
        }

        let settings = self.create_settings(options);

        let pdf = self.engine.generate_pdf(&settings, html).map_err(|e| {
            error!(error = %e, "Html to Pdf conversion error");
            ConvertError::from(e)
        })?;

        info!(size_bytes = pdf.len(), "PDF generated successfully");
        Ok(pdf)
    }

    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn convert_file(
        &self,
        path: impl AsRef<Path>,
        options: &ConversionOptions,
        cover_html: Option<&str>,
    ) -> Result<Vec<u8>> {
        let path = path.as_ref();
        if path.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(ConvertError::empty_argument("path"));
        }

        let settings = self.create_settings(options);

        let pdf = self
            .engine
            .generate_pdf_from_file(&settings, path, cover_html)
            .map_err(|e| {
                error!(error = %e, "Html to Pdf conversion error");
                ConvertError::from(e)
            })?;

        info!(size_bytes = pdf.len(), "PDF generated successfully");
        Ok(pdf)
    }

    /// Derives the renderer settings for `options`.
    pub fn create_settings(&self, options: &ConversionOptions) -> RenderSettings {
        let mut settings = RenderSettings {
            grayscale: options.grayscale,
            low_quality: options.low_quality,
            orientation: options.orientation,
            page_size: options.page_size,
            page_width: options.page_width,
            page_height: options.page_height,
            zoom: options.zoom,
            custom_args: non_empty(&options.custom_flags).map(|flags| flags.trim().to_string()),
            custom_page_args: self.create_custom_page_flags(options),
            ..Default::default()
        };

        apply_header_footer(
            HeaderFooterRole::Header,
            options.page_header.as_ref(),
            &mut settings,
        );
        apply_header_footer(
            HeaderFooterRole::Footer,
            options.page_footer.as_ref(),
            &mut settings,
        );

        settings.margins = resolve_margins(options);

        debug!(
            page_args = settings.custom_page_args.as_deref().unwrap_or_default(),
            "Render settings created"
        );

        settings
    }

    pub fn create_custom_page_flags(&self, options: &ConversionOptions) -> Option<String> {
        create_custom_page_flags(options, self.cookies.as_deref())
    }
}
