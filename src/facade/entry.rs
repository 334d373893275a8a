//! Arguments of a single log call.

use crate::translate::Params;

static NO_PARAMS: Params = Params::new();

/// One log statement, built fluently and handed to
/// [`LogFacade::log_entry`](crate::facade::LogFacade::log_entry).
///
/// ```
/// use logline::facade::Entry;
///
/// let entry = Entry::new(">> importing")
///     .with_category("Importer::run")
///     .with_level("info|debug")
///     .with_locale("en");
/// assert_eq!(entry.message(), ">> importing");
/// assert_eq!(entry.category(), Some("Importer::run"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    category: Option<&'a str>,
    message: &'a str,
    level: &'a str,
    params: &'a Params,
    source: Option<&'a str>,
    locale: Option<&'a str>,
}

impl<'a> Entry<'a> {
    pub fn new(message: &'a str) -> Self {
        Self {
            category: None,
            message,
            level: "info",
            params: &NO_PARAMS,
            source: None,
            locale: None,
        }
    }

    pub fn with_category(mut self, category: &'a str) -> Self {
        self.category = Some(category);
        self
    }

    /// Set or clear the category; `None` means "infer from the caller".
    pub fn with_optional_category(mut self, category: Option<&'a str>) -> Self {
        self.category = category;
        self
    }

    /// Pipe-separated level list, e.g. `"info|error"`.
    pub fn with_level(mut self, level: &'a str) -> Self {
        self.level = level;
        self
    }

    pub fn with_params(mut self, params: &'a Params) -> Self {
        self.params = params;
        self
    }

    /// Message source handed to the translator.
    pub fn with_source(mut self, source: &'a str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_locale(mut self, locale: &'a str) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn message(&self) -> &'a str {
        self.message
    }

    pub fn category(&self) -> Option<&'a str> {
        self.category
    }

    pub fn level(&self) -> &'a str {
        self.level
    }

    pub fn params(&self) -> &'a Params {
        self.params
    }

    pub fn source(&self) -> Option<&'a str> {
        self.source
    }

    pub fn locale(&self) -> Option<&'a str> {
        self.locale
    }
}
