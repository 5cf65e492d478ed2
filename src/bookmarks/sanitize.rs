/// Encodes HTML-significant characters so free text cannot execute as markup
/// when a browser client renders it. Only `<` and `>` are rewritten, which is
/// enough to neutralize script tags and event-handler attributes; the output
/// contains neither character, so applying this twice is a fixpoint.
///
/// Used on the response view only. Stored rows keep the original text.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_script_tags() {
        assert_eq!(
            sanitize(r#"Malicious <script>alert("xss")</script>"#),
            r#"Malicious &lt;script&gt;alert("xss")&lt;/script&gt;"#
        );
    }

    #[test]
    fn neutralizes_event_handler_markup() {
        let escaped = sanitize(r#"Bad image <img src="x" onerror="alert(1)">"#);
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        assert!(escaped.contains("&lt;img"));
    }

    #[test]
    fn is_idempotent() {
        let once = sanitize("a <b> c");
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(sanitize("Popular search engine"), "Popular search engine");
    }
}
