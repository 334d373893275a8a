//! Caller-derived categories.
//!
//! When a log call carries no category, the façade walks the captured call
//! stack, drops runtime frames and its own frames, and names the first
//! remaining frame (after skipping `caller_depth` of them):
//!
//! ```text
//! myapp::jobs::Importer::run          -> "Importer::run"
//! myapp::main  at src/main.rs:42      -> "main.rs::main (Line 42)"
//! ```
//!
//! Capture goes through [`CallerProbe`] so hosts without symbol information
//! (or tests) can replace it. A probe that cannot see the stack yields
//! `None`, which simply means "no category".

use std::backtrace::{Backtrace, BacktraceStatus};
use std::path::Path;

/// One symbolized stack frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub symbol: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl Frame {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            file: None,
            line: None,
        }
    }

    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    fn path(&self) -> &str {
        self.symbol.trim_start_matches('<')
    }

    /// Frames from the standard library, the unwinder or the test harness.
    fn is_runtime(&self) -> bool {
        const RUNTIME_PREFIXES: &[&str] = &[
            "std::",
            "core::",
            "alloc::",
            "backtrace::",
            "test::",
            "__",
            "rust_begin_unwind",
            "_start",
        ];
        let path = self.path();
        !path.contains("::") || RUNTIME_PREFIXES.iter().any(|p| path.starts_with(p))
    }

    fn is_owned_by(&self, module: &str) -> bool {
        let path = self.path();
        path.strip_prefix(module)
            .map(|rest| rest.is_empty() || rest.starts_with("::"))
            .unwrap_or(false)
    }
}

/// Source of caller frames, innermost first.
pub trait CallerProbe: Send + Sync {
    /// Returns `None` when the stack cannot be inspected.
    fn frames(&self) -> Option<Vec<Frame>>;
}

/// Probe backed by [`std::backtrace::Backtrace`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceProbe;

impl CallerProbe for BacktraceProbe {
    fn frames(&self) -> Option<Vec<Frame>> {
        let trace = Backtrace::force_capture();
        if trace.status() != BacktraceStatus::Captured {
            return None;
        }
        let frames = parse_backtrace(&trace.to_string());
        if frames.is_empty() {
            None
        } else {
            Some(frames)
        }
    }
}

/// Probe that never sees a stack. Categories are never inferred.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCallerProbe;

impl CallerProbe for NoCallerProbe {
    fn frames(&self) -> Option<Vec<Frame>> {
        None
    }
}

/// Parse the `Display` output of a captured backtrace.
///
/// Frame lines look like `  3: crate::module::function` and are optionally
/// followed by `        at path/to/file.rs:12:5`.
pub fn parse_backtrace(text: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(location) = line.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                let (file, line_no) = split_location(location);
                frame.file = Some(file.to_string());
                frame.line = line_no;
            }
            continue;
        }

        let symbol = match line.split_once(": ") {
            Some((index, symbol)) if index.chars().all(|c| c.is_ascii_digit()) => symbol,
            _ => line,
        };
        frames.push(Frame::new(symbol.trim()));
    }

    frames
}

fn split_location(location: &str) -> (&str, Option<u32>) {
    // path:line:col, where the path itself may contain ':' (drive letters).
    let mut parts = location.rsplitn(3, ':');
    let col = parts.next();
    let line = parts.next();
    match (parts.next(), line, col) {
        (Some(file), Some(line), Some(_)) => (file, line.parse().ok()),
        _ => match location.rsplit_once(':') {
            Some((file, line)) => (file, line.parse().ok()),
            None => (location, None),
        },
    }
}

/// Name the calling frame.
///
/// `own_module` is the module path whose frames belong to the façade
/// (for example `"logline::facade"`).
pub fn infer_category(probe: &dyn CallerProbe, depth: usize, own_module: &str) -> Option<String> {
    let frames = probe.frames()?;

    frames
        .into_iter()
        .filter(|frame| !frame.is_runtime())
        .filter(|frame| !frame.is_owned_by(own_module))
        .nth(depth)
        .map(|frame| format_frame(&frame))
}

/// Render a frame as `Type::method` or `file::function (Line N)`.
pub fn format_frame(frame: &Frame) -> String {
    let symbol = clean_symbol(&frame.symbol);

    if let Some(rest) = symbol.strip_prefix('<') {
        // `<crate::Type as crate::Trait>::method`
        if let Some((impl_part, method)) = rest.rsplit_once(">::") {
            let ty = impl_part.split(" as ").next().unwrap_or(impl_part);
            return format!("{}::{}", last_segment(ty), method);
        }
    }

    let segments: Vec<&str> = symbol.split("::").collect();
    if let [.., owner, function] = segments.as_slice() {
        if owner.chars().next().is_some_and(char::is_uppercase) {
            return format!("{}::{}", owner, function);
        }
    }

    let function = segments.last().copied().unwrap_or(symbol);
    match (&frame.file, frame.line) {
        (Some(file), Some(line)) => format!("{}::{} (Line {})", base_name(file), function, line),
        (Some(file), None) => format!("{}::{}", base_name(file), function),
        _ => symbol.to_string(),
    }
}

fn clean_symbol(symbol: &str) -> &str {
    let mut symbol = symbol.trim();

    // Legacy mangling hash: `::h0123456789abcdef`.
    if let Some((head, hash)) = symbol.rsplit_once("::") {
        if hash.len() == 17
            && hash.starts_with('h')
            && hash[1..].chars().all(|c| c.is_ascii_hexdigit())
        {
            symbol = head;
        }
    }

    while let Some(head) = symbol.strip_suffix("::{{closure}}") {
        symbol = head;
    }
    symbol
}

fn last_segment(path: &str) -> &str {
    let path = path.split('<').next().unwrap_or(path);
    path.rsplit("::").next().unwrap_or(path)
}

fn base_name(file: &str) -> &str {
    Path::new(file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file)
}
