//! Received and normalized form submissions.

/// A form body exactly as decoded from the request, in submission order.
#[derive(Debug, Clone, Default)]
pub struct RawForm {
    pairs: Vec<(String, String)>,
}

impl RawForm {
    /// Wrap decoded `(key, value)` pairs.
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Trim every submitted value, whatever its key.
    pub fn normalize(self) -> NormalizedForm {
        NormalizedForm {
            pairs: self
                .pairs
                .into_iter()
                .map(|(key, value)| (key, value.trim().to_string()))
                .collect(),
        }
    }
}

impl From<Vec<(String, String)>> for RawForm {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for RawForm {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// Trimmed submission with typed accessors. Rules run against this text;
/// [`NormalizedForm::escaped`] produces what is re-rendered and stored.
#[derive(Debug, Clone, Default)]
pub struct NormalizedForm {
    pairs: Vec<(String, String)>,
}

impl NormalizedForm {
    /// Escape every value for markup output.
    pub fn escaped(&self) -> NormalizedForm {
        NormalizedForm {
            pairs: self
                .pairs
                .iter()
                .map(|(key, value)| (key.clone(), escape(value)))
                .collect(),
        }
    }

    /// First value for `key`, or the empty string.
    pub fn text(&self, key: &str) -> String {
        self.values(key).next().unwrap_or_default().to_string()
    }

    /// First value for `key`; empty values count as absent.
    pub fn optional(&self, key: &str) -> Option<String> {
        self.values(key)
            .next()
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Every non-empty value for a multi-valued field, in submission order.
    pub fn multi(&self, key: &str) -> Vec<String> {
        self.values(key)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Trim surrounding whitespace and escape markup-significant characters.
pub fn sanitize(value: &str) -> String {
    escape(value.trim())
}

/// Escape markup-significant characters.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("  Tolkien "), "Tolkien");
        assert_eq!(
            sanitize("<b>\"O'Brien\" & co</b>"),
            "&lt;b&gt;&quot;O&#x27;Brien&quot; &amp; co&lt;&#x2F;b&gt;"
        );
        assert_eq!(sanitize("a\\b`c"), "a&#x5C;b&#96;c");
    }

    #[test]
    fn test_accessors() {
        let form = RawForm::from([
            ("title", "  Dune "),
            ("dob", "   "),
            ("genre", "g1"),
            ("genre", ""),
            ("genre", "g2"),
            ("extra", "<x>"),
        ])
        .normalize();

        assert_eq!(form.text("title"), "Dune");
        assert_eq!(form.text("missing"), "");
        assert_eq!(form.optional("dob"), None);
        assert_eq!(form.optional("title").as_deref(), Some("Dune"));
        assert_eq!(form.multi("genre"), ["g1", "g2"]);
        assert!(form.multi("missing").is_empty());
        assert_eq!(form.text("extra"), "<x>");
        assert_eq!(form.escaped().text("extra"), "&lt;x&gt;");
        assert_eq!(form.escaped().multi("genre"), ["g1", "g2"]);
    }

    #[test]
    fn test_length_is_measured_before_escaping() {
        let form = RawForm::from([("name", " <> ")]).normalize();
        assert_eq!(form.text("name").chars().count(), 2);
        assert_eq!(form.escaped().text("name"), "&lt;&gt;");
    }
}
