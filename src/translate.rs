//! Optional message translation applied before formatting.

use std::collections::BTreeMap;

/// Placeholder substitutions, keyed by the literal text to replace
/// (for example `"{user}"`).
pub type Params = BTreeMap<String, String>;

/// Translation step the façade runs on each message when one is installed.
pub trait Translator: Send + Sync {
    fn translate(
        &self,
        category: Option<&str>,
        message: &str,
        params: &Params,
        source: Option<&str>,
        locale: Option<&str>,
    ) -> String;
}

/// Translator that only substitutes parameters.
///
/// Keys are matched literally, longest first, and replaced text is never
/// rescanned.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParamTranslator;

impl Translator for ParamTranslator {
    fn translate(
        &self,
        _category: Option<&str>,
        message: &str,
        params: &Params,
        _source: Option<&str>,
        _locale: Option<&str>,
    ) -> String {
        substitute(message, params)
    }
}

/// Replace every occurrence of each key of `params` in one pass.
pub fn substitute(message: &str, params: &Params) -> String {
    let mut keys: Vec<(&str, &str)> = params
        .iter()
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    if keys.is_empty() {
        return message.to_string();
    }
    keys.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut out = String::with_capacity(message.len());
    let mut rest = message;
    'scan: while !rest.is_empty() {
        for (key, value) in &keys {
            if let Some(after) = rest.strip_prefix(key) {
                out.push_str(value);
                rest = after;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    out
}
