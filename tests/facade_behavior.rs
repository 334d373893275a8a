//! End-to-end behavior of the log façade.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, OnceLock, Weak};
use std::thread;

use logline::facade::{BacktraceProbe, Entry, Frame, LogFacade, NoCallerProbe};
use logline::sink::{ErrorLog, LogSink, Record, SinkError};
use logline::translate::{Params, Translator};

mod common;

use common::{FailingSink, RecordingSink, SharedBuffer, StaticProbe};

#[test]
fn test_indent_then_unindent_nests_entries() {
    let (facade, sink, _) = common::recording_facade();

    let first = facade.info(Some("Job"), ">> start");
    let second = facade.info(Some("Job"), "work");
    let third = facade.info(Some("Job"), "<< done");

    assert_eq!(first, "* start");
    assert_eq!(second, "  * work");
    assert_eq!(third, "* done");
    assert_eq!(facade.current_indent(), 0);

    let lines: Vec<String> = sink.delivered().into_iter().map(|d| d.line).collect();
    assert_eq!(lines, vec!["* start", "  * work", "* done"]);
}

#[test]
fn test_indent_level_never_negative() {
    let (facade, _, _) = common::recording_facade();
    let script = ["<< a", "<< b", ">> c", "<< d", "<< e", "<< f", ">> g", ">> h", "<< i"];

    for message in script {
        facade.info(Some("Loop"), message);
        assert!(facade.current_indent() <= script.len());
    }
    assert_eq!(facade.current_indent(), 1);

    facade.decrement_indent(10);
    assert_eq!(facade.current_indent(), 0);
}

#[test]
fn test_unindent_at_zero_displays_at_zero() {
    let (facade, _, _) = common::recording_facade();
    assert_eq!(facade.info(Some("c"), "<< closing"), "* closing");
    assert_eq!(facade.current_indent(), 0);
}

#[test]
fn test_decrement_indent_floor_is_idempotent() {
    let (facade, _, _) = common::recording_facade();
    facade.decrement_indent(1);
    facade.decrement_indent(1);
    assert_eq!(facade.current_indent(), 0);

    facade.set_current_indent(3);
    facade.decrement_indent(1);
    assert_eq!(facade.current_indent(), 2);
}

#[test]
fn test_missing_category_without_stack_is_none() {
    let (facade, sink, errors) = common::recording_facade();

    let line = facade.log(None, "hi", "info");

    assert_eq!(line, "* hi");
    assert_eq!(sink.delivered()[0].category, None);
    assert!(errors.contents().is_empty());
}

#[test]
fn test_multiple_levels_dispatch_once_each() {
    let (facade, sink, _) = common::recording_facade();

    let line = facade.log(Some("Cat"), "x", "info|error");

    assert_eq!(line, "! x");
    let delivered = sink.delivered();
    assert_eq!(delivered.len(), 2);
    assert_eq!(delivered[0].line, "* x");
    assert_eq!(delivered[0].level, "info");
    assert_eq!(delivered[0].severity, 6);
    assert_eq!(delivered[1].line, "! x");
    assert_eq!(delivered[1].level, "error");
    assert_eq!(delivered[1].severity, 3);
}

#[test]
fn test_directive_applies_once_for_multiple_levels() {
    let (facade, sink, _) = common::recording_facade();

    facade.log(Some("Cat"), ">> open", "info|debug|warning");
    assert_eq!(facade.current_indent(), 1);
    assert!(sink.delivered().iter().all(|d| !d.line.starts_with(' ')));
}

#[test]
fn test_unknown_level_uses_default_glyph() {
    let (facade, _, _) = common::recording_facade();
    facade.set_indicators(BTreeMap::from([
        ("info".to_string(), '*'),
        ("error".to_string(), '!'),
    ]));
    facade.set_default_indicator('.');

    assert_eq!(facade.log(Some("c"), "hello", "notice"), ". hello");
    assert_eq!(facade.log(Some("c"), "hello", "info"), "* hello");
}

#[test]
fn test_failing_sink_reports_once_and_still_returns() {
    let errors = SharedBuffer::default();
    let facade = LogFacade::builder()
        .sink(Arc::new(FailingSink))
        .sink(Arc::new(RecordingSink::default()))
        .error_log(Arc::new(ErrorLog::from_writer(errors.clone())))
        .caller_probe(Arc::new(NoCallerProbe))
        .build();

    let line = facade.error(Some("Db::save"), "write failed");

    assert_eq!(line, "! write failed");
    let reported = errors.lines();
    assert_eq!(reported.len(), 1);
    assert!(reported[0].contains("sink 'structured' failed"));
    assert!(reported[0].contains("backend exploded"));
    assert!(reported[0].ends_with("entry: ! write failed"));
}

#[test]
fn test_no_available_sink_falls_back_to_error_log() {
    struct Detached;

    impl LogSink for Detached {
        fn name(&self) -> &str {
            "detached"
        }
        fn is_available(&self) -> bool {
            false
        }
        fn write(&self, _record: &Record<'_>) -> Result<(), SinkError> {
            unreachable!("unavailable sinks are never written")
        }
    }

    let errors = SharedBuffer::default();
    let facade = LogFacade::builder()
        .sink(Arc::new(Detached))
        .error_log(Arc::new(ErrorLog::from_writer(errors.clone())))
        .caller_probe(Arc::new(NoCallerProbe))
        .build();

    facade.warning(Some("c"), "only stderr");
    assert_eq!(errors.lines(), vec!["- only stderr"]);
}

#[test]
fn test_prefix_sits_between_indent_and_glyph() {
    let (facade, _, _) = common::recording_facade();
    facade.set_prefix(Some("[svc] ".into()));
    facade.info(Some("c"), ">> a");

    assert_eq!(facade.info(Some("c"), "b"), "  [svc] * b");
}

#[test]
fn test_category_inferred_from_static_stack() {
    let sink = Arc::new(RecordingSink::default());
    let probe = StaticProbe(vec![
        Frame::new("std::backtrace::Backtrace::force_capture"),
        Frame::new("logline::facade::LogFacade::log_entry"),
        Frame::new("logline::facade::LogFacade::info"),
        Frame::new("billing::invoice::Invoicer::issue").at("src/invoice.rs", 40),
        Frame::new("billing::main").at("src/main.rs", 9),
    ]);
    let facade = LogFacade::builder()
        .sink(sink.clone())
        .caller_probe(Arc::new(probe))
        .build();

    facade.info(None, "issued");
    facade.set_caller_depth(1);
    facade.info(None, "issued again");
    facade.set_caller_depth(9);
    facade.info(None, "nobody");

    let categories: Vec<Option<String>> =
        sink.delivered().into_iter().map(|d| d.category).collect();
    assert_eq!(
        categories,
        vec![
            Some("Invoicer::issue".to_string()),
            Some("main.rs::main (Line 9)".to_string()),
            None,
        ]
    );
}

#[test]
fn test_backtrace_probe_skips_facade_frames() {
    let sink = Arc::new(RecordingSink::default());
    let facade = LogFacade::builder()
        .sink(sink.clone())
        .caller_probe(Arc::new(BacktraceProbe))
        .build();

    let line = facade.info(None, "from a test");

    assert_eq!(line, "* from a test");
    if let Some(category) = &sink.delivered()[0].category {
        assert!(!category.contains("LogFacade"), "{}", category);
    }
}

#[test]
fn test_trace_gated_by_environment() {
    let (facade, sink, _) = common::recording_facade();
    facade.set_trace_flags(vec!["LOGLINE_FACADE_BEHAVIOR_TRACE".to_string()]);

    assert_eq!(facade.trace(Some("c"), "hidden"), None);
    assert!(sink.delivered().is_empty());

    std::env::set_var("LOGLINE_FACADE_BEHAVIOR_TRACE", "1");
    assert_eq!(facade.trace(Some("c"), "shown").as_deref(), Some(". shown"));
    std::env::remove_var("LOGLINE_FACADE_BEHAVIOR_TRACE");

    assert_eq!(sink.delivered()[0].level, "trace");
}

#[test]
fn test_concurrent_nested_blocks_return_to_zero() {
    let (facade, sink, _) = common::recording_facade();
    let facade = Arc::new(facade);

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let facade = Arc::clone(&facade);
            thread::spawn(move || {
                for step in 0..25 {
                    let category = format!("worker-{}", worker);
                    facade.info(Some(&category), &format!(">> step {}", step));
                    facade.debug(Some(&category), "inside");
                    facade.info(Some(&category), "<< step done");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(facade.current_indent(), 0);
    assert_eq!(sink.delivered().len(), 8 * 25 * 3);
}

/// Arguments one `translate` call received.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TranslateCall {
    category: Option<String>,
    message: String,
    params: Params,
    source: Option<String>,
    locale: Option<String>,
}

/// Translator that shouts and remembers what it was asked.
#[derive(Default)]
struct ShoutingTranslator {
    calls: Mutex<Vec<TranslateCall>>,
}

impl Translator for ShoutingTranslator {
    fn translate(
        &self,
        category: Option<&str>,
        message: &str,
        params: &Params,
        source: Option<&str>,
        locale: Option<&str>,
    ) -> String {
        self.calls.lock().unwrap().push(TranslateCall {
            category: category.map(str::to_string),
            message: message.to_string(),
            params: params.clone(),
            source: source.map(str::to_string),
            locale: locale.map(str::to_string),
        });
        message.to_uppercase()
    }
}

#[test]
fn test_translator_receives_every_argument() {
    let sink = Arc::new(RecordingSink::default());
    let translator = Arc::new(ShoutingTranslator::default());
    let out = SharedBuffer::default();
    let probe = StaticProbe(vec![
        Frame::new("logline::facade::LogFacade::log_entry"),
        Frame::new("billing::invoice::Invoicer::issue").at("src/invoice.rs", 40),
    ]);
    let facade = LogFacade::builder()
        .sink(sink.clone())
        .translator(translator.clone())
        .caller_probe(Arc::new(probe))
        .echo_writer(out.clone())
        .cli_probe(|| true)
        .build();
    facade.set_echo_enabled(true);

    let params = Params::from([("{n}".to_string(), "3".to_string())]);
    let line = facade.log_entry(
        Entry::new(">> issued {n}")
            .with_category("Billing")
            .with_params(&params)
            .with_source("billing")
            .with_locale("fr"),
    );
    facade.log_entry(Entry::new("<< done").with_locale("de"));

    assert_eq!(line, "* ISSUED {N}");
    let calls = translator.calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![
            TranslateCall {
                category: Some("Billing".into()),
                message: "issued {n}".into(),
                params: params.clone(),
                source: Some("billing".into()),
                locale: Some("fr".into()),
            },
            TranslateCall {
                category: Some("Invoicer::issue".into()),
                message: "done".into(),
                params: Params::new(),
                source: None,
                locale: Some("de".into()),
            },
        ]
    );

    let lines: Vec<String> = sink.delivered().into_iter().map(|d| d.line).collect();
    assert_eq!(lines, vec!["* ISSUED {N}", "* DONE"]);
    let echoed = out.lines();
    assert!(echoed[0].ends_with("]ISSUED {N}"), "{}", echoed[0]);
    assert!(echoed[1].ends_with("]DONE"), "{}", echoed[1]);
}

/// Sink that reports every line it sees back through the façade.
#[derive(Default)]
struct AuditingSink {
    facade: OnceLock<Weak<LogFacade>>,
    lines: Mutex<Vec<String>>,
}

impl LogSink for AuditingSink {
    fn name(&self) -> &str {
        "auditing"
    }

    fn write(&self, record: &Record<'_>) -> Result<(), SinkError> {
        self.lines.lock().unwrap().push(record.line.to_string());
        if record.category != Some("Audit") {
            if let Some(facade) = self.facade.get().and_then(Weak::upgrade) {
                facade.info(Some("Audit"), &format!("saw {}", record.line));
            }
        }
        Ok(())
    }
}

#[test]
fn test_sink_may_log_through_the_same_facade() {
    let sink = Arc::new(AuditingSink::default());
    let facade = Arc::new(
        LogFacade::builder()
            .sink(sink.clone())
            .caller_probe(Arc::new(NoCallerProbe))
            .build(),
    );
    sink.facade.set(Arc::downgrade(&facade)).unwrap();

    assert_eq!(facade.log(Some("Job"), "x", "info|error"), "! x");
    assert_eq!(facade.info(Some("Job"), ">> open"), "* open");

    let lines = sink.lines.lock().unwrap().clone();
    assert_eq!(
        lines,
        vec!["* x", "* saw * x", "! x", "* saw ! x", "* open", "  * saw * open"]
    );
    assert_eq!(facade.current_indent(), 1);
}
