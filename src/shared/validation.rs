use lazy_static::lazy_static;
use regex::Regex;

/// Free-text fields are capped at this many characters after escaping, before
/// they can reach the email templates.
pub const MAX_FIELD_LENGTH: usize = 10_000;

lazy_static! {
    /// Regex for validating email addresses, applied on top of the `validator`
    /// crate's own email check.
    /// - Valid: "user@example.com", "first.last+tag@sub.example.co"
    /// - Invalid: "user@example", "user example.com", "@example.com"
    pub static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

/// Escape the HTML-significant characters so user input can never inject
/// markup into the generated HTML email body.
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

/// Trim, escape, and cap a free-text field. Escaping happens before length
/// checks, so bounds apply to the text exactly as it will be rendered.
pub fn sanitize_input(text: &str) -> String {
    let escaped = escape_html(text.trim());
    match escaped.char_indices().nth(MAX_FIELD_LENGTH) {
        Some((idx, _)) => escaped[..idx].to_string(),
        None => escaped,
    }
}

/// Extract the ASCII digits from a phone field.
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_regex_valid() {
        assert!(EMAIL_REGEX.is_match("user@example.com"));
        assert!(EMAIL_REGEX.is_match("first.last+tag@sub.example.co"));
        assert!(EMAIL_REGEX.is_match("a_b%c@host-name.org"));
    }

    #[test]
    fn test_email_regex_invalid() {
        assert!(!EMAIL_REGEX.is_match("user@example")); // no TLD
        assert!(!EMAIL_REGEX.is_match("user example.com")); // space
        assert!(!EMAIL_REGEX.is_match("@example.com")); // no local part
        assert!(!EMAIL_REGEX.is_match("user@.com")); // no domain label
        assert!(!EMAIL_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#039;y&#039;&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_sanitize_input_trims_and_escapes() {
        assert_eq!(sanitize_input("  a < b  "), "a &lt; b");
    }

    #[test]
    fn test_sanitize_input_caps_length() {
        let long = "x".repeat(MAX_FIELD_LENGTH + 50);
        assert_eq!(sanitize_input(&long).chars().count(), MAX_FIELD_LENGTH);
    }

    #[test]
    fn test_phone_digits() {
        assert_eq!(phone_digits("(555) 123-4567"), "5551234567");
        assert_eq!(phone_digits("no digits"), "");
    }
}
