/// What a copy button asked for: an element to read from, or text to copy as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CopySource {
    Selector(String),
    Literal(String),
}

impl CopySource {
    /// Values starting with `#` or `.` are element selectors.
    pub fn parse(value: &str) -> Self {
        if value.starts_with('#') || value.starts_with('.') {
            Self::Selector(value.to_string())
        } else {
            Self::Literal(value.to_string())
        }
    }

    /// `lookup` returns the text content of the first element matching a selector.
    /// Resolves to `None` when the selector matches nothing.
    pub fn resolve<F>(&self, lookup: F) -> Option<String>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        match self {
            Self::Selector(selector) => lookup(selector).map(|text| text.trim().to_string()),
            Self::Literal(text) => Some(text.clone()),
        }
    }
}

pub fn copied_message(text: &str) -> String {
    format!("Disalin: {text}")
}

pub fn manual_copy_message(text: &str) -> String {
    format!("Gagal menyalin. Silakan salin manual: {text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_prefixes_are_detected() {
        assert_eq!(CopySource::parse("#emailText"), CopySource::Selector("#emailText".into()));
        assert_eq!(CopySource::parse(".phone"), CopySource::Selector(".phone".into()));
        assert_eq!(
            CopySource::parse("halo@example.com"),
            CopySource::Literal("halo@example.com".into())
        );
    }

    #[test]
    fn selector_copies_trimmed_text() {
        let source = CopySource::parse("#emailText");
        let resolved = source.resolve(|selector| {
            assert_eq!(selector, "#emailText");
            Some("\n   halo@example.com  \n".to_string())
        });

        assert_eq!(resolved.as_deref(), Some("halo@example.com"));
    }

    #[test]
    fn literal_is_copied_verbatim() {
        let source = CopySource::parse("  +62 812 ");
        let resolved = source.resolve(|_| panic!("literal must not query the page"));

        assert_eq!(resolved.as_deref(), Some("  +62 812 "));
    }

    #[test]
    fn missing_element_copies_nothing() {
        assert!(CopySource::parse("#gone").resolve(|_| None).is_none());
    }

    #[test]
    fn messages_include_the_text() {
        assert_eq!(copied_message("a@b.c"), "Disalin: a@b.c");
        assert_eq!(
            manual_copy_message("a@b.c"),
            "Gagal menyalin. Silakan salin manual: a@b.c"
        );
    }
}
