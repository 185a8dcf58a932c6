/// Escape HTML-significant characters so user input can be interpolated into an HTML document.
///
/// Only `&`, `<`, `>`, `"` and `'` are replaced, in a single pass, so an already escaped entity
/// gets escaped again rather than decoded.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
