//! Message rendering.
//!
//! # Responsibilities
//! - Render the primary message (structured-looking strings are quoted)
//! - Render the argument sequence in a compact JSON-like form
//! - Bound output by depth, width and a per-call node budget
//! - Mark self-references
//! - Truncate the primary message to a configured limit
//!
//! # Design Decisions
//! - Rendering is total: no input makes it fail or loop
//! - `[Circular *N]` marks a back-reference, `<ref *N> ` prefixes its target
//! - Limits are counted in chars, never splitting a code point

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use crate::config::schema::{LoggerOptions, RenderLimits};
use crate::logger::value::{LogValue, SharedValue};

/// Separator between the primary message and the rendered arguments.
pub const ARGUMENTS_SEPARATOR: &str = ". Log arguments are: ";

/// Hard ceiling on nesting, whatever `max_depth` is configured to.
pub const MAX_RENDER_DEPTH: usize = 64;

/// Written in place of values past the node budget.
pub const ELIDED: &str = "[...]";

/// Build the `message` field of a record.
///
/// When truncation applies, the argument suffix is dropped entirely.
pub fn compose_message(message: &LogValue, args: &[LogValue], options: &LoggerOptions) -> String {
    let primary = render_message(message, &options.render);

    if let Some(limit) = options.truncation_limit {
        if let Some(truncated) = truncate(&primary, limit, options.truncation_marker()) {
            return truncated;
        }
    }

    let mut out = primary;
    out.push_str(ARGUMENTS_SEPARATOR);
    out.push_str(&render_arguments(args, &options.render));
    out
}

/// Render the primary message.
///
/// A string held by a shared node follows the same quoting rule as a plain one.
pub fn render_message(message: &LogValue, limits: &RenderLimits) -> String {
    match message {
        LogValue::String(s) => render_message_text(s),
        LogValue::Shared(node) => {
            if let LogValue::String(s) = &*node.read() {
                return render_message_text(s);
            }
            render_value(message, limits)
        }
        other => render_value(other, limits),
    }
}

fn render_message_text(s: &str) -> String {
    if looks_structured(s) {
        quote(s)
    } else {
        s.to_string()
    }
}

/// Render the argument sequence as a bracketed list.
pub fn render_arguments(args: &[LogValue], limits: &RenderLimits) -> String {
    let mut renderer = Renderer::new(limits);
    let mut out = String::new();
    renderer.write_array(&mut out, args, 0);
    out
}

/// Render a single value on its own.
pub fn render_value(value: &LogValue, limits: &RenderLimits) -> String {
    let mut renderer = Renderer::new(limits);
    let mut out = String::new();
    renderer.write_value(&mut out, value, 0, false);
    out
}

/// Cut `text` to `limit` chars and append `marker`.
///
/// Returns `None` when `text` already fits. The marker is appended after the
/// cut, so the result can exceed `limit` by the marker's length.
pub fn truncate(text: &str, limit: usize, marker: &str) -> Option<String> {
    let cut = text.char_indices().nth(limit).map(|(idx, _)| idx)?;
    let mut out = String::with_capacity(cut + marker.len());
    out.push_str(&text[..cut]);
    out.push_str(marker);
    Some(out)
}

fn looks_structured(s: &str) -> bool {
    matches!(s.trim_start().chars().next(), Some('{') | Some('['))
}

fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("{:?}", s))
}

struct Renderer<'a> {
    limits: &'a RenderLimits,
    max_depth: usize,
    /// Values left before the rest of the output is elided.
    budget: usize,
    /// Shared nodes currently being rendered.
    open: HashSet<usize>,
    /// Reference numbers handed out to cycle targets.
    refs: HashMap<usize, usize>,
}

impl<'a> Renderer<'a> {
    fn new(limits: &'a RenderLimits) -> Self {
        Self {
            limits,
            max_depth: limits.max_depth.min(MAX_RENDER_DEPTH),
            budget: limits.max_nodes,
            open: HashSet::new(),
            refs: HashMap::new(),
        }
    }

    fn ref_number(&mut self, id: usize) -> usize {
        let next = self.refs.len() + 1;
        *self.refs.entry(id).or_insert(next)
    }

    fn write_value(&mut self, out: &mut String, value: &LogValue, depth: usize, in_container: bool) {
        if self.budget == 0 {
            out.push_str(ELIDED);
            return;
        }
        self.budget -= 1;

        match value {
            LogValue::Undefined if in_container => out.push_str("null"),
            LogValue::Undefined => out.push_str("undefined"),
            LogValue::Null => out.push_str("null"),
            LogValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            LogValue::Number(n) => {
                let _ = write!(out, "{}", n);
            }
            LogValue::String(s) => out.push_str(&quote(s)),
            LogValue::Array(items) => self.write_array(out, items, depth),
            LogValue::Object(entries) => self.write_object(out, entries, depth),
            LogValue::Shared(node) => self.write_shared(out, node, depth, in_container),
        }
    }

    fn write_shared(&mut self, out: &mut String, node: &SharedValue, depth: usize, in_container: bool) {
        let id = node.id();
        if self.open.contains(&id) {
            let n = self.ref_number(id);
            let _ = write!(out, "[Circular *{}]", n);
            return;
        }
        // Each shared hop is a level, so wrapper chains hit the depth bound.
        if depth >= self.max_depth {
            out.push_str("[Shared]");
            return;
        }

        self.open.insert(id);
        let mut inner = String::new();
        {
            let guard = node.read();
            self.write_value(&mut inner, &guard, depth + 1, in_container);
        }
        self.open.remove(&id);

        if let Some(n) = self.refs.get(&id) {
            let _ = write!(out, "<ref *{}> ", n);
        }
        out.push_str(&inner);
    }

    fn write_array(&mut self, out: &mut String, items: &[LogValue], depth: usize) {
        if depth >= self.max_depth {
            out.push_str("[Array]");
            return;
        }

        out.push('[');
        let shown = items.len().min(self.limits.max_items);
        for (i, item) in items[..shown].iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            if self.budget == 0 {
                out.push_str(ELIDED);
                out.push(']');
                return;
            }
            self.write_value(out, item, depth + 1, true);
        }
        self.write_remainder(out, items.len() - shown, shown > 0);
        out.push(']');
    }

    fn write_object(&mut self, out: &mut String, entries: &[(String, LogValue)], depth: usize) {
        if depth >= self.max_depth {
            out.push_str("[Object]");
            return;
        }

        out.push('{');
        let present: Vec<_> = entries.iter().filter(|(_, v)| !v.is_undefined()).collect();
        let shown = present.len().min(self.limits.max_items);
        for (i, (key, value)) in present[..shown].iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            if self.budget == 0 {
                out.push_str(ELIDED);
                out.push('}');
                return;
            }
            out.push_str(&quote(key));
            out.push(':');
            self.write_value(out, value, depth + 1, true);
        }
        self.write_remainder(out, present.len() - shown, shown > 0);
        out.push('}');
    }

    fn write_remainder(&self, out: &mut String, hidden: usize, after_items: bool) {
        if hidden == 0 {
            return;
        }
        if after_items {
            out.push(',');
        }
        let _ = write!(
            out,
            "... {} more item{}",
            hidden,
            if hidden == 1 { "" } else { "s" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::value::SharedValue;

    fn limits() -> RenderLimits {
        RenderLimits::default()
    }

    fn options() -> LoggerOptions {
        LoggerOptions::new("test-logger", "test-service")
    }

    #[test]
    fn test_plain_string_message_is_verbatim() {
        assert_eq!(render_message(&"I am a log message!".into(), &limits()), "I am a log message!");
    }

    #[test]
    fn test_structured_string_message_is_quoted() {
        assert_eq!(
            render_message(&r#"{context: {info:"something"}}"#.into(), &limits()),
            r#""{context: {info:\"something\"}}""#
        );
        assert_eq!(
            render_message(&r#"["one", "two"]"#.into(), &limits()),
            r#""[\"one\", \"two\"]""#
        );
    }

    #[test]
    fn test_non_string_messages() {
        assert_eq!(render_message(&LogValue::Undefined, &limits()), "undefined");
        assert_eq!(render_message(&LogValue::Null, &limits()), "null");
        assert_eq!(render_message(&42.into(), &limits()), "42");
        assert_eq!(render_message(&vec![1, 2].into(), &limits()), "[1,2]");
    }

    #[test]
    fn test_compose_message_cases() {
        let opts = options();
        assert_eq!(
            compose_message(&"hello".into(), &[1.into(), "x".into()], &opts),
            r#"hello. Log arguments are: [1,"x"]"#
        );
        assert_eq!(compose_message(&"".into(), &[], &opts), ". Log arguments are: []");
        assert_eq!(
            compose_message(&LogValue::Undefined, &[], &opts),
            "undefined. Log arguments are: []"
        );

        let context = LogValue::object([("context", LogValue::object([("info", "something")]))]);
        assert_eq!(
            compose_message(&"I am a log message!".into(), &[context], &opts),
            r#"I am a log message!. Log arguments are: [{"context":{"info":"something"}}]"#
        );
    }

    #[test]
    fn test_undefined_inside_containers() {
        let args = [LogValue::Undefined, LogValue::object([("a", LogValue::Undefined), ("b", LogValue::Null)])];
        assert_eq!(render_arguments(&args, &limits()), r#"[null,{"b":null}]"#);
    }

    #[test]
    fn test_depth_bound() {
        let limits = RenderLimits { max_depth: 2, ..RenderLimits::default() };
        let nested = LogValue::object([("a", LogValue::object([("b", 1)]))]);
        // The argument list itself is the first level.
        assert_eq!(render_arguments(&[nested], &limits), r#"[{"a":[Object]}]"#);
    }

    #[test]
    fn test_width_bound() {
        let limits = RenderLimits { max_items: 2, ..RenderLimits::default() };
        let args: Vec<LogValue> = (1..=5).map(LogValue::from).collect();
        assert_eq!(render_arguments(&args, &limits), "[1,2,... 3 more items]");

        let limits = RenderLimits { max_items: 1, ..RenderLimits::default() };
        let obj = LogValue::object([("a", 1), ("b", 2)]);
        assert_eq!(render_value(&obj, &limits), r#"{"a":1,... 1 more item}"#);
    }

    #[test]
    fn test_direct_self_reference() {
        let node = SharedValue::new(LogValue::object([("name", "loop")]));
        node.insert("self", node.clone());

        let rendered = render_arguments(&[node.clone().into()], &limits());
        assert_eq!(rendered, r#"[<ref *1> {"name":"loop","self":[Circular *1]}]"#);

        node.set(LogValue::Null);
    }

    #[test]
    fn test_transitive_self_reference() {
        let a = SharedValue::new(LogValue::Array(vec![]));
        let b = SharedValue::new(LogValue::object([("parent", a.clone())]));
        a.push(b.clone());

        let rendered = render_value(&a.clone().into(), &limits());
        assert_eq!(rendered, r#"<ref *1> [{"parent":[Circular *1]}]"#);

        a.set(LogValue::Null);
    }

    #[test]
    fn test_shared_without_cycle_renders_twice() {
        let leaf = SharedValue::new(vec![1]);
        let args = [leaf.clone().into(), leaf.into()];
        assert_eq!(render_arguments(&args, &limits()), "[[1],[1]]");
    }

    #[test]
    fn test_shared_wrapper_chain_hits_depth_bound() {
        // Every node stays in `nodes` so teardown below is iterative.
        let mut nodes = vec![SharedValue::new(1)];
        for _ in 0..100_000 {
            let outer = SharedValue::new(nodes[nodes.len() - 1].clone());
            nodes.push(outer);
        }
        let value: LogValue = nodes[nodes.len() - 1].clone().into();

        let limits = RenderLimits { max_depth: 3, ..RenderLimits::default() };
        assert_eq!(render_arguments(&[value.clone()], &limits), "[[Shared]]");
        assert_eq!(render_value(&value, &limits), "[Shared]");

        // A small stack is enough: recursion stops at the default depth.
        let rendered = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(move || render_arguments(&[value], &RenderLimits::default()))
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(rendered, "[[Shared]]");

        for node in nodes.iter().rev() {
            node.set(LogValue::Null);
        }
    }

    #[test]
    fn test_configured_depth_is_capped() {
        let limits = RenderLimits { max_depth: usize::MAX, ..RenderLimits::default() };
        let mut value = LogValue::from(0);
        for _ in 0..1_000 {
            value = LogValue::Array(vec![value]);
        }
        let rendered = render_value(&value, &limits);
        assert_eq!(rendered.matches('[').count(), MAX_RENDER_DEPTH + 1);
        assert!(rendered.contains("[Array]"));
    }

    #[test]
    fn test_diamond_output_is_bounded() {
        // Seven levels, each an array of ten aliases of the next level.
        let mut level = SharedValue::new(LogValue::from("leaf"));
        for _ in 0..7 {
            let items: Vec<LogValue> = (0..10).map(|_| level.clone().into()).collect();
            level = SharedValue::new(LogValue::Array(items));
        }

        let limits = RenderLimits { max_depth: 32, ..RenderLimits::default() };
        let rendered = render_arguments(&[level.into()], &limits);
        assert!(rendered.len() < limits.max_nodes * 16, "len {}", rendered.len());
        assert!(rendered.contains(ELIDED));
        assert!(rendered.ends_with("]]"));
    }

    #[test]
    fn test_node_budget_elides_remainder() {
        let limits = RenderLimits { max_nodes: 3, ..RenderLimits::default() };
        let args: Vec<LogValue> = (1..=5).map(LogValue::from).collect();
        assert_eq!(render_arguments(&args, &limits), "[1,2,3,[...]]");
    }

    #[test]
    fn test_shared_string_message_follows_quoting_rule() {
        let plain: LogValue = SharedValue::new("plain text").into();
        assert_eq!(render_message(&plain, &limits()), "plain text");

        let structured: LogValue = SharedValue::new("[1, 2]").into();
        assert_eq!(render_message(&structured, &limits()), r#""[1, 2]""#);
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("abcdef", 3, "…"), Some("abc…".to_string()));
        assert_eq!(truncate("ääää", 2, "[x]"), Some("ää[x]".to_string()));
        assert_eq!(truncate("abc", 3, "[x]"), None);
        assert_eq!(truncate("abc", 0, "[x]"), Some("[x]".to_string()));
    }

    #[test]
    fn test_truncation_drops_argument_suffix() {
        let mut opts = options();
        opts.truncation_limit = Some(20);
        let message: LogValue = r#"{"stack":"Error: 14 UNAVAILABLE: No connection established}"#.into();

        let composed = compose_message(&message, &[1.into()], &opts);
        assert_eq!(
            composed,
            format!(r#""{{\"stack\":\"Error:{}"#, opts.truncation_marker())
        );
        assert!(!composed.contains(ARGUMENTS_SEPARATOR));
    }

    #[test]
    fn test_large_limit_is_untruncated() {
        let mut opts = options();
        let untruncated = compose_message(&"short".into(), &[1.into()], &opts);
        opts.truncation_limit = Some(1000);
        assert_eq!(compose_message(&"short".into(), &[1.into()], &opts), untruncated);
    }
}
