// pdf-convert/src/renderers/args.rs

/// Splits a flag string into process arguments.
///
/// Tokens are separated by whitespace. Double quotes group a token and are
/// removed; inside quotes `\"` and `\\` are unescaped. An unterminated quote
/// runs to the end of the input.
pub fn split_args(flags: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;
    let mut chars = flags.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            '\\' if quoted && matches!(chars.peek(), Some('"') | Some('\\')) => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        args.push(current);
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(
            split_args("  --print-media-type\t--cookie a 1 "),
            ["--print-media-type", "--cookie", "a", "1"]
        );
        assert!(split_args("   ").is_empty());
    }

    #[test]
    fn quoted_values_stay_together() {
        assert_eq!(
            split_args("--header-left \"Order #42\" --header-center \"\""),
            ["--header-left", "Order #42", "--header-center", ""]
        );
    }

    #[test]
    fn unescapes_inside_quotes() {
        assert_eq!(
            split_args(r#"--footer-left "Acme \"Ltd\" C:\\tmp""#),
            ["--footer-left", r#"Acme "Ltd" C:\tmp"#]
        );
        assert_eq!(split_args(r"C:\tmp\x"), [r"C:\tmp\x"]);
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        assert_eq!(split_args("--title \"a b"), ["--title", "a b"]);
    }
}
