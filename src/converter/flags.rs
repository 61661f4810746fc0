// pdf-convert/src/converter/flags.rs

use crate::context::CookieLookup;
use crate::models::{non_empty, ConversionOptions};
use indexmap::IndexMap;
use std::fmt::Write;
use tracing::debug;

/// Composes the page flag string in a fixed order. Numbers are written with
/// `Display`, which is locale independent. Returns `None` when nothing was
/// requested.
pub fn create_custom_page_flags(
    options: &ConversionOptions,
    cookies: Option<&dyn CookieLookup>,
) -> Option<String> {
    let mut flags = options.custom_page_flags.clone().unwrap_or_default();

    if let Some(url) = non_empty(&options.user_stylesheet_url) {
        let _ = write!(flags, " --user-style-sheet \"{}\"", url);
    }

    if options.use_print_media_type {
        flags.push_str(" --print-media-type");
    }

    if options.background_disabled {
        flags.push_str(" --no-background");
    }

    if let Some(user_name) = non_empty(&options.user_name) {
        let _ = write!(flags, " --username {}", user_name);
    }

    if let Some(password) = non_empty(&options.password) {
        let _ = write!(flags, " --password {}", password);
    }

    if let (Some(spacing), Some(_)) = (options.header_spacing, &options.page_header) {
        let _ = write!(flags, " --header-spacing {}", spacing);
    }

    if let (Some(spacing), Some(_)) = (options.footer_spacing, &options.page_footer) {
        let _ = write!(flags, " --footer-spacing {}", spacing);
    }

    if options.show_header_line {
        flags.push_str(" --header-line");
    }

    if options.show_footer_line {
        flags.push_str(" --footer-line");
    }

    push_repeatable("--post", &options.post, &mut flags);
    push_repeatable("--cookie", &options.cookies, &mut flags);

    if let Some(name) = non_empty(&options.forms_authentication_cookie_name) {
        match cookies {
            Some(lookup) if !options.cookies.contains_key(name) => match lookup.cookie(name) {
                Some(value) => {
                    let _ = write!(flags, " --cookie {} {}", name, value);
                }
                None => debug!(cookie = name, "Authentication cookie not present on request"),
            },
            _ => {}
        }
    }

    let flags = flags.trim();
    if flags.is_empty() {
        None
    } else {
        Some(flags.to_string())
    }
}

fn push_repeatable(flag: &str, values: &IndexMap<String, Option<String>>, flags: &mut String) {
    for (key, value) in values {
        let _ = write!(flags, " {} {} {}", flag, key, value.as_deref().unwrap_or_default());
    }
}
