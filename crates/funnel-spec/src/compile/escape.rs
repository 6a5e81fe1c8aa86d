/// Make serialized JSON safe to place inside a `<script>` element.
///
/// The result parses to the same value; only characters that could end the
/// element or break a JavaScript source line are rewritten as `\uXXXX`.
pub fn script_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_json_hides_closing_tags() {
        let json = serde_json::to_string("</script><!--").unwrap();
        let escaped = script_json(&json);
        assert!(!escaped.contains("</script"));
        assert!(!escaped.contains("<!--"));
        let parsed: String = serde_json::from_str(&escaped).unwrap();
        assert_eq!(parsed, "</script><!--");
    }
}
