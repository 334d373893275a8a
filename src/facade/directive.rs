//! Indent directives embedded at the start of a message.

/// Indent change requested by a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `>>`: entries after this one are nested one level deeper.
    Indent,
    /// `<<`: this entry and the ones after it move out one level.
    Unindent,
    None,
}

impl Directive {
    /// Split a leading `>>` / `<<` off `message`.
    ///
    /// The remainder is trimmed only when a directive was found.
    pub fn split(message: &str) -> (Directive, &str) {
        if let Some(rest) = message.strip_prefix(">>") {
            (Directive::Indent, rest.trim())
        } else if let Some(rest) = message.strip_prefix("<<") {
            (Directive::Unindent, rest.trim())
        } else {
            (Directive::None, message)
        }
    }

    /// Apply the net change to `level`, never going below zero.
    pub fn apply(self, level: usize) -> usize {
        match self {
            Directive::Indent => level.saturating_add(1),
            Directive::Unindent => level.saturating_sub(1),
            Directive::None => level,
        }
    }

    /// Depth at which the entry carrying this directive is displayed.
    pub fn display_depth(self, level: usize) -> usize {
        match self {
            Directive::Unindent => level.saturating_sub(1),
            Directive::Indent | Directive::None => level,
        }
    }
}
