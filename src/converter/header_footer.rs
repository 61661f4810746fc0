// pdf-convert/src/converter/header_footer.rs

use crate::converter::RenderSettings;
use crate::models::{
    ConversionOptions, HeaderFooter, HeaderFooterKind, HeaderFooterRole, PageMargins,
};
use tracing::{debug, warn};

/// Vertical margin reserved for a renderer-drawn (args) header or footer.
pub const ARGS_SECTION_MARGIN: f32 = 15.0;
/// Vertical margin reserved for an HTML or URL header or footer.
pub const HTML_SECTION_MARGIN: f32 = 35.0;

const DOCTYPE_MARKER: &str = "<!DOCTYPE";

/// Returns the caller's margins with top and bottom filled in for the
/// header/footer combination. Sides the caller already set are kept.
///
/// | header | footer | top | bottom |
/// |--------|--------|-----|--------|
/// | args   | args   | 15  | 15     |
/// | args   | other  | 15  | 35     |
/// | other  | args   | 35  | 15     |
///
/// Any other combination, including a missing header or footer, leaves the
/// margins untouched.
pub fn resolve_margins(options: &ConversionOptions) -> PageMargins {
    let mut margins = options.margins.clone();

    let (Some(header), Some(footer)) = (&options.page_header, &options.page_footer) else {
        return margins;
    };

    let header_is_args = header.kind() == HeaderFooterKind::Args;
    let footer_is_args = footer.kind() == HeaderFooterKind::Args;

    let (top, bottom) = match (header_is_args, footer_is_args) {
        (true, true) => (ARGS_SECTION_MARGIN, ARGS_SECTION_MARGIN),
        (true, false) => (ARGS_SECTION_MARGIN, HTML_SECTION_MARGIN),
        (false, true) => (HTML_SECTION_MARGIN, ARGS_SECTION_MARGIN),
        (false, false) => return margins,
    };

    margins.top.get_or_insert(top);
    margins.bottom.get_or_insert(bottom);
    margins
}

/// Applies a header or footer to the settings, either as page flags or as
/// inline markup.
pub fn apply_header_footer(
    role: HeaderFooterRole,
    section: Option<&HeaderFooter>,
    settings: &mut RenderSettings,
) {
    let Some(section) = section else {
        return;
    };

    let Some(content) = section.resolve(role) else {
        debug!(%role, "Page section resolved to empty content, skipping");
        return;
    };

    match section.kind() {
        HeaderFooterKind::Url => {
            // embedded quotes are not escaped
            settings.append_page_args(&format!("--{}-html \"{}\"", role, content));
        }
        HeaderFooterKind::Args => {
            settings.append_page_args(&content);
        }
        HeaderFooterKind::Html => {
            if is_partial_html(&content) {
                match role {
                    HeaderFooterRole::Header => settings.page_header_html = Some(content),
                    HeaderFooterRole::Footer => settings.page_footer_html = Some(content),
                }
            } else {
                // TODO: full documents need a temp file passed via --{role}-html
                warn!(%role, "Full HTML documents are not supported as page sections, dropping");
            }
        }
    }
}

/// Markup is partial unless it opens with a doctype declaration.
pub fn is_partial_html(html: &str) -> bool {
    let html = html.trim_start();
    !html
        .get(..DOCTYPE_MARKER.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(DOCTYPE_MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(header: Option<HeaderFooter>, footer: Option<HeaderFooter>) -> ConversionOptions {
        ConversionOptions {
            page_header: header,
            page_footer: footer,
            ..Default::default()
        }
    }

    fn top_bottom(options: &ConversionOptions) -> (Option<f32>, Option<f32>) {
        let margins = resolve_margins(options);
        (margins.top, margins.bottom)
    }

    #[test]
    fn both_args_get_small_margins() {
        let o = options(Some(HeaderFooter::args("--header-left A")), Some(HeaderFooter::args("--footer-left B")));
        assert_eq!(top_bottom(&o), (Some(15.0), Some(15.0)));
    }

    #[test]
    fn args_header_html_footer() {
        let o = options(Some(HeaderFooter::args("--header-left A")), Some(HeaderFooter::html("<p>f</p>")));
        assert_eq!(top_bottom(&o), (Some(15.0), Some(35.0)));
    }

    #[test]
    fn url_header_args_footer() {
        let o = options(Some(HeaderFooter::url("http://localhost/h")), Some(HeaderFooter::args("--footer-left B")));
        assert_eq!(top_bottom(&o), (Some(35.0), Some(15.0)));
    }

    #[test]
    fn no_args_sections_leave_margins_alone() {
        let o = options(Some(HeaderFooter::html("<p>h</p>")), Some(HeaderFooter::url("http://localhost/f")));
        assert_eq!(top_bottom(&o), (None, None));
    }

    #[test]
    fn single_section_leaves_margins_alone() {
        let header_only = options(Some(HeaderFooter::args("--header-left A")), None);
        let footer_only = options(None, Some(HeaderFooter::args("--footer-left B")));
        assert_eq!(top_bottom(&header_only), (None, None));
        assert_eq!(top_bottom(&footer_only), (None, None));
        assert_eq!(top_bottom(&options(None, None)), (None, None));
    }

    #[test]
    fn explicit_margins_are_never_overwritten() {
        let kinds = [
            HeaderFooter::args("--header-left A"),
            HeaderFooter::url("http://localhost/x"),
            HeaderFooter::html("<p>x</p>"),
        ];

        for header in &kinds {
            for footer in &kinds {
                let mut o = options(Some(header.clone()), Some(footer.clone()));
                o.margins = PageMargins {
                    top: Some(7.5),
                    bottom: Some(3.0),
                    left: Some(1.0),
                    right: Some(2.0),
                };
                assert_eq!(resolve_margins(&o), o.margins);
            }
        }
    }

    #[test]
    fn only_missing_side_is_filled() {
        let mut o = options(Some(HeaderFooter::args("--header-left A")), Some(HeaderFooter::html("<p>f</p>")));
        o.margins.top = Some(20.0);
        assert_eq!(top_bottom(&o), (Some(20.0), Some(35.0)));
    }

    #[test]
    fn doctype_detection_ignores_case_and_whitespace() {
        assert!(is_partial_html("<p>Hi</p>"));
        assert!(is_partial_html("<html><body></body></html>"));
        assert!(!is_partial_html("<!DOCTYPE html><html></html>"));
        assert!(!is_partial_html("  \n<!doctype html><html></html>"));
        assert!(is_partial_html("<!DOC"));
    }

    #[test]
    fn url_section_is_quoted_without_escaping() {
        let mut settings = RenderSettings::default();
        let header = HeaderFooter::url("http://localhost/h?title=\"x\"");
        apply_header_footer(HeaderFooterRole::Header, Some(&header), &mut settings);

        // embedded quotes break out of the token; kept as-is on purpose
        assert_eq!(
            settings.custom_page_args.as_deref(),
            Some("--header-html \"http://localhost/h?title=\"x\"\"")
        );
    }

    #[test]
    fn full_document_html_is_dropped() {
        let mut settings = RenderSettings::default();
        let footer = HeaderFooter::html("<!DOCTYPE html><html><body>f</body></html>");
        apply_header_footer(HeaderFooterRole::Footer, Some(&footer), &mut settings);

        assert_eq!(settings, RenderSettings::default());
    }

    #[test]
    fn empty_section_is_a_no_op() {
        let mut settings = RenderSettings::default();
        apply_header_footer(HeaderFooterRole::Header, Some(&HeaderFooter::args("  ")), &mut settings);
        apply_header_footer(HeaderFooterRole::Footer, None, &mut settings);

        assert_eq!(settings, RenderSettings::default());
    }
}
