// pdf-convert/src/renderers/wkhtmltopdf.rs

use crate::converter::RenderSettings;
use crate::error::RenderError;
use crate::renderers::{split_args, RenderEngine};
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Wraps partial header/footer markup into a document the renderer can load.
/// Elements with a class named after a renderer variable (`page`, `topage`,
/// `date`, ...) receive its value.
const SECTION_DOCUMENT_START: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<script>
function subst() {
  var vars = {};
  var query = document.location.search.substring(1).split('&');
  for (var i = 0; i < query.length; i++) {
    var pair = query[i].split('=', 2);
    vars[pair[0]] = decodeURIComponent(pair[1] || '');
  }
  var names = ['frompage', 'topage', 'page', 'webpage', 'section', 'subsection', 'date', 'isodate', 'time', 'title', 'doctitle'];
  for (var n = 0; n < names.length; n++) {
    var elements = document.getElementsByClassName(names[n]);
    for (var e = 0; e < elements.length; e++) {
      elements[e].textContent = vars[names[n]];
    }
  }
}
</script>
</head>
<body style="margin:0" onload="subst()">
"#;

const SECTION_DOCUMENT_END: &str = "\n</body>\n</html>\n";

/// Files taking part in one renderer run.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    pub input: &'a Path,
    pub cover: Option<&'a Path>,
    pub header_html: Option<&'a Path>,
    pub footer_html: Option<&'a Path>,
    pub output: &'a Path,
}

/// Renders through the wkhtmltopdf executable.
#[derive(Debug, Clone)]
pub struct WkHtmlToPdf {
    executable: PathBuf,
    temp_dir: Option<PathBuf>,
}

impl Default for WkHtmlToPdf {
    fn default() -> Self {
        Self::new("wkhtmltopdf")
    }
}

impl WkHtmlToPdf {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            temp_dir: None,
        }
    }

    /// Directory for intermediate files; the system temp dir otherwise.
    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(temp_dir.into());
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Builds the full argument list: global options, optional cover, the
    /// page with its options, then the output path.
    pub fn command_args(settings: &RenderSettings, invocation: &Invocation<'_>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-q".into()];

        if settings.grayscale {
            args.push("--grayscale".into());
        }
        if settings.low_quality {
            args.push("--lowquality".into());
        }

        args.push("--orientation".into());
        args.push(settings.orientation.as_str().into());

        match (settings.page_width, settings.page_height) {
            (Some(width), Some(height)) => {
                args.push("--page-width".into());
                args.push(format!("{}mm", width).into());
                args.push("--page-height".into());
                args.push(format!("{}mm", height).into());
            }
            _ => {
                args.push("--page-size".into());
                args.push(settings.page_size.as_str().into());
            }
        }

        if (settings.zoom - 1.0).abs() > f32::EPSILON {
            args.push("--zoom".into());
            args.push(settings.zoom.to_string().into());
        }

        let margins = [
            ("-T", settings.margins.top),
            ("-B", settings.margins.bottom),
            ("-L", settings.margins.left),
            ("-R", settings.margins.right),
        ];
        for (flag, value) in margins {
            if let Some(value) = value {
                args.push(flag.into());
                args.push(format!("{}mm", value).into());
            }
        }

        if let Some(custom) = &settings.custom_args {
            args.extend(split_args(custom).into_iter().map(OsString::from));
        }

        if let Some(cover) = invocation.cover {
            args.push("cover".into());
            args.push(cover.into());
        }

        args.push("page".into());
        args.push(invocation.input.into());

        if let Some(page_args) = &settings.custom_page_args {
            args.extend(split_args(page_args).into_iter().map(OsString::from));
        }

        if let Some(header) = invocation.header_html {
            args.push("--header-html".into());
            args.push(header.into());
        }
        if let Some(footer) = invocation.footer_html {
            args.push("--footer-html".into());
            args.push(footer.into());
        }

        args.push(invocation.output.into());
        args
    }

    fn temp_file(&self, suffix: &str) -> std::io::Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("pdfconv-").suffix(suffix);

        match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
    }

    fn write_temp(&self, suffix: &str, content: &str) -> std::io::Result<NamedTempFile> {
        let mut file = self.temp_file(suffix)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        Ok(file)
    }

    fn write_section(&self, html: Option<&str>) -> std::io::Result<Option<NamedTempFile>> {
        html.map(|html| {
            let document = format!("{}{}{}", SECTION_DOCUMENT_START, html, SECTION_DOCUMENT_END);
            self.write_temp(".html", &document)
        })
        .transpose()
    }

    fn render(
        &self,
        settings: &RenderSettings,
        input: &Path,
        cover_html: Option<&str>,
    ) -> Result<Vec<u8>, RenderError> {
        let cover = cover_html
            .filter(|html| !html.trim().is_empty())
            .map(|html| self.write_temp(".html", html))
            .transpose()?;
        let header = self.write_section(settings.page_header_html.as_deref())?;
        let footer = self.write_section(settings.page_footer_html.as_deref())?;
        let output = self.temp_file(".pdf")?;

        let invocation = Invocation {
            input,
            cover: cover.as_ref().map(NamedTempFile::path),
            header_html: header.as_ref().map(NamedTempFile::path),
            footer_html: footer.as_ref().map(NamedTempFile::path),
            output: output.path(),
        };

        let mut cmd = Command::new(&self.executable);
        cmd.args(Self::command_args(settings, &invocation));

        debug!("Running wkhtmltopdf: {:?}", cmd);

        let result = cmd.output().map_err(|source| RenderError::Spawn {
            program: self.executable.display().to_string(),
            source,
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(RenderError::Process {
                status: result.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        let pdf_bytes = std::fs::read(output.path())?;
        if pdf_bytes.is_empty() {
            return Err(RenderError::EmptyOutput);
        }

        info!(
            input = %input.display(),
            size_kb = pdf_bytes.len() / 1024,
            "wkhtmltopdf finished"
        );

        Ok(pdf_bytes)
    }
}

impl RenderEngine for WkHtmlToPdf {
    fn generate_pdf(&self, settings: &RenderSettings, html: &str) -> Result<Vec<u8>, RenderError> {
        let page = self.write_temp(".html", html)?;
        debug!("HTML written to: {:?}", page.path());

        self.render(settings, page.path(), None)
    }

    fn generate_pdf_from_file(
        &self,
        settings: &RenderSettings,
        path: &Path,
        cover_html: Option<&str>,
    ) -> Result<Vec<u8>, RenderError> {
        self.render(settings, path, cover_html)
    }
}
