// pdf-convert/src/models.rs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

impl PageOrientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageOrientation::Portrait => "Portrait",
            PageOrientation::Landscape => "Landscape",
        }
    }
}

/// Paper sizes understood by the renderer's `--page-size` option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Tabloid,
    Ledger,
    Executive,
    Folio,
    A0,
    A1,
    A2,
    A3,
    A5,
    A6,
    A7,
    A8,
    A9,
    B0,
    B1,
    B2,
    B3,
    B4,
    B5,
    B6,
    B7,
    B8,
    B9,
    B10,
    C5E,
    Comm10E,
    DLE,
}

impl PageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "Letter",
            PageSize::Legal => "Legal",
            PageSize::Tabloid => "Tabloid",
            PageSize::Ledger => "Ledger",
            PageSize::Executive => "Executive",
            PageSize::Folio => "Folio",
            PageSize::A0 => "A0",
            PageSize::A1 => "A1",
            PageSize::A2 => "A2",
            PageSize::A3 => "A3",
            PageSize::A5 => "A5",
            PageSize::A6 => "A6",
            PageSize::A7 => "A7",
            PageSize::A8 => "A8",
            PageSize::A9 => "A9",
            PageSize::B0 => "B0",
            PageSize::B1 => "B1",
            PageSize::B2 => "B2",
            PageSize::B3 => "B3",
            PageSize::B4 => "B4",
            PageSize::B5 => "B5",
            PageSize::B6 => "B6",
            PageSize::B7 => "B7",
            PageSize::B8 => "B8",
            PageSize::B9 => "B9",
            PageSize::B10 => "B10",
            PageSize::C5E => "C5E",
            PageSize::Comm10E => "Comm10E",
            PageSize::DLE => "DLE",
        }
    }
}

/// Page margins in millimetres. An unset side is left to the header/footer
/// margin fix or to the renderer's default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMargins {
    pub top: Option<f32>,
    pub bottom: Option<f32>,
    pub left: Option<f32>,
    pub right: Option<f32>,
}

/// Which page section a header/footer is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFooterRole {
    Header,
    Footer,
}

impl HeaderFooterRole {
    /// Prefix used by the renderer's section flags (`--header-*`, `--footer-*`).
    pub fn flag(&self) -> &'static str {
        match self {
            HeaderFooterRole::Header => "header",
            HeaderFooterRole::Footer => "footer",
        }
    }
}

impl fmt::Display for HeaderFooterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFooterKind {
    Args,
    Url,
    Html,
}

/// Content of a page header or footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HeaderFooter {
    /// Renderer arguments, either pre-formatted or built from text sections.
    Args(HeaderFooterArgs),
    /// Address of a page the renderer fetches as header/footer.
    Url(String),
    /// Inline markup.
    Html(String),
}

impl HeaderFooter {
    pub fn args(raw: impl Into<String>) -> Self {
        HeaderFooter::Args(HeaderFooterArgs::Raw(raw.into()))
    }

    pub fn text(text: TextHeaderFooter) -> Self {
        HeaderFooter::Args(HeaderFooterArgs::Text(text))
    }

    pub fn url(url: impl Into<String>) -> Self {
        HeaderFooter::Url(url.into())
    }

    pub fn html(html: impl Into<String>) -> Self {
        HeaderFooter::Html(html.into())
    }

    pub fn kind(&self) -> HeaderFooterKind {
        match self {
            HeaderFooter::Args(_) => HeaderFooterKind::Args,
            HeaderFooter::Url(_) => HeaderFooterKind::Url,
            HeaderFooter::Html(_) => HeaderFooterKind::Html,
        }
    }

    /// Concrete arguments or content for `role`. Blank content yields `None`.
    pub fn resolve(&self, role: HeaderFooterRole) -> Option<String> {
        let resolved = match self {
            HeaderFooter::Args(HeaderFooterArgs::Raw(raw)) => raw.clone(),
            HeaderFooter::Args(HeaderFooterArgs::Text(text)) => text.to_args(role)?,
            HeaderFooter::Url(url) => url.clone(),
            HeaderFooter::Html(html) => html.clone(),
        };

        if resolved.trim().is_empty() {
            None
        } else {
            Some(resolved)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderFooterArgs {
    Raw(String),
    Text(TextHeaderFooter),
}

/// Plain-text header/footer laid out by the renderer itself. Sections may
/// contain renderer placeholders such as `[page]`, `[topage]` or `[date]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextHeaderFooter {
    pub left: Option<String>,
    pub center: Option<String>,
    pub right: Option<String>,
    pub font_name: Option<String>,
    pub font_size: Option<f32>,
}

impl TextHeaderFooter {
    fn to_args(&self, role: HeaderFooterRole) -> Option<String> {
        let mut args = String::new();

        let sections = [
            ("left", &self.left),
            ("center", &self.center),
            ("right", &self.right),
        ];
        for (position, text) in sections {
            if let Some(text) = non_empty(text) {
                args.push_str(&format!(" --{}-{} {}", role, position, quote(text)));
            }
        }

        // font settings alone would render an empty section
        if args.is_empty() {
            return None;
        }

        if let Some(font_name) = non_empty(&self.font_name) {
            args.push_str(&format!(" --{}-font-name {}", role, quote(font_name)));
        }
        if let Some(font_size) = self.font_size.filter(|size| *size > 0.0) {
            args.push_str(&format!(" --{}-font-size {}", role, font_size));
        }

        Some(args.trim().to_string())
    }
}

/// Wraps `text` in double quotes, escaping `\` and `"` so the value reads
/// back as a single argument.
fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Everything that controls a single HTML to PDF conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    pub grayscale: bool,
    pub low_quality: bool,
    pub orientation: PageOrientation,
    pub page_size: PageSize,
    pub page_width: Option<f32>,
    pub page_height: Option<f32>,
    pub zoom: f32,

    /// Global renderer arguments, placed before any page object.
    pub custom_flags: Option<String>,
    /// Page arguments that seed the composed page flag string.
    pub custom_page_flags: Option<String>,
    pub user_stylesheet_url: Option<String>,
    pub use_print_media_type: bool,
    pub background_disabled: bool,

    pub user_name: Option<String>,
    pub password: Option<String>,
    pub forms_authentication_cookie_name: Option<String>,

    pub page_header: Option<HeaderFooter>,
    pub page_footer: Option<HeaderFooter>,
    pub header_spacing: Option<f32>,
    pub footer_spacing: Option<f32>,
    pub show_header_line: bool,
    pub show_footer_line: bool,

    pub margins: PageMargins,

    pub post: IndexMap<String, Option<String>>,
    pub cookies: IndexMap<String, Option<String>>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            grayscale: false,
            low_quality: false,
            orientation: PageOrientation::default(),
            page_size: PageSize::default(),
            page_width: None,
            page_height: None,
            zoom: 1.0,
            custom_flags: None,
            custom_page_flags: None,
            user_stylesheet_url: None,
            use_print_media_type: false,
            background_disabled: false,
            user_name: None,
            password: None,
            forms_authentication_cookie_name: None,
            page_header: None,
            page_footer: None,
            header_spacing: None,
            footer_spacing: None,
            show_header_line: false,
            show_footer_line: false,
            margins: PageMargins::default(),
            post: IndexMap::new(),
            cookies: IndexMap::new(),
        }
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::split_args;

    #[test]
    fn raw_args_resolve_verbatim() {
        let header = HeaderFooter::args("--header-left Title");
        assert_eq!(header.kind(), HeaderFooterKind::Args);
        assert_eq!(
            header.resolve(HeaderFooterRole::Header).as_deref(),
            Some("--header-left Title")
        );
    }

    #[test]
    fn blank_content_resolves_to_none() {
        assert_eq!(HeaderFooter::html("   ").resolve(HeaderFooterRole::Footer), None);
        assert_eq!(HeaderFooter::url("").resolve(HeaderFooterRole::Header), None);
    }

    #[test]
    fn text_sections_use_role_prefix() {
        let footer = HeaderFooter::text(TextHeaderFooter {
            left: Some("Acme \"Ltd\"".into()),
            right: Some("[page] / [topage]".into()),
            font_name: Some("Arial".into()),
            font_size: Some(8.0),
            ..Default::default()
        });

        assert_eq!(
            footer.resolve(HeaderFooterRole::Footer).as_deref(),
            Some(
                "--footer-left \"Acme \\\"Ltd\\\"\" --footer-right \"[page] / [topage]\" \
                 --footer-font-name \"Arial\" --footer-font-size 8"
            )
        );
    }

    #[test]
    fn text_sections_split_back_into_single_arguments() {
        let footer = HeaderFooter::text(TextHeaderFooter {
            left: Some("C:\\".into()),
            right: Some("[page]".into()),
            font_name: Some("My \"Font\"".into()),
            ..Default::default()
        });

        let resolved = footer.resolve(HeaderFooterRole::Footer).unwrap();

        assert_eq!(
            split_args(&resolved),
            [
                "--footer-left",
                "C:\\",
                "--footer-right",
                "[page]",
                "--footer-font-name",
                "My \"Font\"",
            ]
        );
    }

    #[test]
    fn text_without_sections_is_empty() {
        let header = HeaderFooter::text(TextHeaderFooter {
            font_name: Some("Arial".into()),
            font_size: Some(10.0),
            ..Default::default()
        });
        assert_eq!(header.resolve(HeaderFooterRole::Header), None);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: ConversionOptions = serde_json::from_str(
            r#"{
                "orientation": "Landscape",
                "page_header": { "kind": "args", "value": "--header-left Title" },
                "page_footer": { "kind": "args", "value": { "center": "[page]" } },
                "cookies": { "b": "2", "a": null }
            }"#,
        )
        .unwrap();

        assert_eq!(options.orientation, PageOrientation::Landscape);
        assert_eq!(options.page_size, PageSize::A4);
        assert_eq!(options.zoom, 1.0);
        assert_eq!(options.page_header, Some(HeaderFooter::args("--header-left Title")));
        assert_eq!(
            options.page_footer,
            Some(HeaderFooter::text(TextHeaderFooter {
                center: Some("[page]".into()),
                ..Default::default()
            }))
        );
        let keys: Vec<_> = options.cookies.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a"]);
    }
}
