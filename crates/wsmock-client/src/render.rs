//! Sanitization and formatting for rendered output.

use serde_json::Value;

/// Escapes HTML metacharacters in untrusted text.
pub fn escape_html(unsafe_text: &str) -> String {
    unsafe_text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Converts `\r\n`, `\r` and `\n` sequences to `<br>` markers.
pub fn nl2br(text: &str) -> String {
    text.replace("\r\n", "<br>").replace(['\r', '\n'], "<br>")
}

/// Prepares message text for the table view.
///
/// Escaping runs before the newline substitution so the inserted break
/// markup is never itself escaped.
pub fn sanitize_text(text: &str) -> String {
    nl2br(&escape_html(text))
}

/// Renders a JSON value the way it appears in key/value log lines: bare
/// strings keep their content, everything else prints as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escape_html_covers_all_entities() {
        insta::assert_snapshot!(
            escape_html(r#"<b>a&b's</b> "q""#),
            @r##"&lt;b&gt;a&amp;b&#039;s&lt;/b&gt; &quot;q&quot;"##
        );
    }

    #[test]
    fn escape_html_ampersand_first() {
        // `&lt;` produced from `<` must not be double-escaped
        assert_eq!(escape_html("<&"), "&lt;&amp;");
    }

    #[test]
    fn nl2br_all_newline_kinds() {
        assert_eq!(nl2br("a\r\nb\rc\nd"), "a<br>b<br>c<br>d");
    }

    #[test]
    fn sanitize_escapes_then_breaks() {
        assert_eq!(
            sanitize_text("<b>a&b's</b>\n"),
            "&lt;b&gt;a&amp;b&#039;s&lt;/b&gt;<br>"
        );
    }

    #[test]
    fn sanitize_break_markup_survives_unescaped() {
        assert_eq!(sanitize_text("a\nb"), "a<br>b");
    }

    #[test]
    fn sanitize_leaves_no_raw_metacharacters() {
        let out = sanitize_text("<b>a&b's</b>\n");
        // everything left after stripping break markup and entities must be
        // plain text
        let stripped = out
            .replace("<br>", "")
            .replace("&lt;", "")
            .replace("&gt;", "")
            .replace("&amp;", "")
            .replace("&quot;", "")
            .replace("&#039;", "");
        for c in ['<', '>', '&', '"', '\''] {
            assert!(!stripped.contains(c), "raw {:?} in {:?}", c, stripped);
        }
    }

    #[test]
    fn display_value_strings_print_bare() {
        assert_eq!(display_value(&json!("hi")), "hi");
    }

    #[test]
    fn display_value_non_strings_print_as_json() {
        assert_eq!(display_value(&json!(42)), "42");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!({"a": 1})), r#"{"a":1}"#);
        assert_eq!(display_value(&json!(null)), "null");
    }
}
