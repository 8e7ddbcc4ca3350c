use std::{
    backtrace::{Backtrace, BacktraceStatus},
    error::Error as StdError,
};

/// How many errors of a causal chain are rendered before the rest is dropped.
pub const MAX_CHAIN_DEPTH: usize = 64;

/// An iterator over an error and its causes, outermost first, following
/// [`source`](StdError::source). Stops after [`MAX_CHAIN_DEPTH`] errors, so a chain that loops back
/// on itself still ends.
///
/// `Chain` is `Clone`, so a walk can be restarted from any point.
#[derive(Clone, Debug)]
pub struct Chain<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
    remaining: usize,
}

impl<'a> Chain<'a> {
    /// Starts a walk at `head`.
    pub fn new(head: &'a (dyn StdError + 'static)) -> Self {
        Self {
            next: Some(head),
            remaining: MAX_CHAIN_DEPTH,
        }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let error = self.next?;
        if self.remaining == 0 {
            log::warn!("error chain is deeper than {MAX_CHAIN_DEPTH}, dropping the rest");
            self.next = None;
            return None;
        }
        self.remaining -= 1;
        self.next = error.source();
        Some(error)
    }
}

/// Renders `error` and its causal chain as one string.
///
/// The result is the outermost error's message, then, if `trace` was captured, a newline and the
/// trace, then each cause's message on its own line. Causes never get a trace. An absent error
/// renders as the empty string.
///
/// # Example
///
/// ```
/// use coreext::format_error;
///
/// let error = "x".parse::<u8>().unwrap_err();
/// assert_eq!("invalid digit found in string", format_error(Some(&error), None));
/// assert_eq!("", format_error(None, None));
/// ```
pub fn format_error(error: Option<&(dyn StdError + 'static)>, trace: Option<&Backtrace>) -> String {
    let trace = trace
        .filter(|trace| trace.status() == BacktraceStatus::Captured)
        .map(Backtrace::to_string);
    render(error, trace.as_deref())
}

fn render(error: Option<&(dyn StdError + 'static)>, trace: Option<&str>) -> String {
    let Some(error) = error else {
        return String::new();
    };

    let mut chain = Chain::new(error);
    let mut out = chain.next().map(ToString::to_string).unwrap_or_default();

    if let Some(trace) = trace.filter(|trace| !trace.trim().is_empty()) {
        out.push('\n');
        out.push_str(trace);
    }

    for cause in chain {
        out.push('\n');
        out.push_str(&cause.to_string());
    }

    out
}

/// Renders an error with its causal chain; see [`format_error`].
///
/// Only [`anyhow::Error`] carries a trace. Plain [`std::error::Error`] values render without one
/// even when `include_trace` is set.
///
/// # Example
///
/// ```
/// use anyhow::anyhow;
/// use coreext::ErrorMessage;
///
/// let error = anyhow!("connection refused").context("could not load settings");
/// assert_eq!(
///     "could not load settings\nconnection refused",
///     error.to_error_message(false)
/// );
/// ```
pub trait ErrorMessage {
    /// The error's message and its causes' messages, one per line, with the outermost trace if
    /// `include_trace` is set and one was captured.
    fn to_error_message(&self, include_trace: bool) -> String;
}

impl ErrorMessage for anyhow::Error {
    fn to_error_message(&self, include_trace: bool) -> String {
        let error: &(dyn StdError + 'static) = &**self;
        format_error(Some(error), include_trace.then(|| self.backtrace()))
    }
}

impl ErrorMessage for dyn StdError + 'static {
    fn to_error_message(&self, _include_trace: bool) -> String {
        format_error(Some(self), None)
    }
}

impl ErrorMessage for dyn StdError + Send + Sync + 'static {
    fn to_error_message(&self, _include_trace: bool) -> String {
        format_error(Some(self), None)
    }
}

impl<T: ErrorMessage + ?Sized> ErrorMessage for Option<&T> {
    fn to_error_message(&self, include_trace: bool) -> String {
        self.map(|error| error.to_error_message(include_trace))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_exact_with, Culture};
    use anyhow::anyhow;
    use core::fmt;

    #[derive(Debug)]
    struct Layer {
        message: &'static str,
        cause: Option<Box<Layer>>,
    }

    impl Layer {
        fn chain(messages: &[&'static str]) -> Option<Box<Layer>> {
            messages.iter().rev().fold(None, |cause, &message| {
                Some(Box::new(Layer { message, cause }))
            })
        }
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message)
        }
    }

    impl StdError for Layer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.cause.as_deref().map(|cause| cause as &(dyn StdError + 'static))
        }
    }

    /// its own cause
    #[derive(Debug)]
    struct Ouroboros;

    impl fmt::Display for Ouroboros {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("again")
        }
    }

    impl StdError for Ouroboros {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(self)
        }
    }

    #[test]
    fn test_absent_error_is_empty() {
        assert_eq!("", format_error(None, None));
        assert_eq!("", None::<&anyhow::Error>.to_error_message(true));
    }

    #[test]
    fn test_single_error() {
        let error = Layer::chain(&["A"]).unwrap();
        assert_eq!("A", format_error(Some(&*error), None));
    }

    #[test]
    fn test_causes_in_order() {
        let error = Layer::chain(&["A", "B", "C"]).unwrap();
        assert_eq!("A\nB\nC", format_error(Some(&*error), None));
    }

    #[test]
    fn test_trace_after_outermost_message_only() {
        let error = Layer::chain(&["A", "B"]).unwrap();
        assert_eq!("A\n<trace>\nB", render(Some(&*error), Some("<trace>")));
    }

    #[test]
    fn test_blank_trace_is_skipped() {
        let error = Layer::chain(&["A", "B"]).unwrap();
        assert_eq!("A\nB", render(Some(&*error), Some("  \n")));
    }

    #[test]
    fn test_uncaptured_trace_is_skipped() {
        let error = Layer::chain(&["A", "B"]).unwrap();
        let disabled = Backtrace::disabled();
        assert_eq!("A\nB", format_error(Some(&*error), Some(&disabled)));
    }

    #[test]
    fn test_captured_trace() {
        let error = Layer::chain(&["A", "B"]).unwrap();
        let trace = Backtrace::force_capture();
        let expected = if trace.status() == BacktraceStatus::Captured {
            format!("A\n{trace}\nB")
        } else {
            "A\nB".to_owned()
        };
        assert_eq!(expected, format_error(Some(&*error), Some(&trace)));
    }

    #[test]
    fn test_anyhow_context_chain() {
        let error = anyhow!("B").context("A");
        assert_eq!("A\nB", error.to_error_message(false));

        let traced = error.to_error_message(true);
        assert!(traced.starts_with("A"));
        assert!(traced.ends_with("\nB"));
    }

    #[test]
    fn test_dyn_error() {
        let error: Box<dyn StdError + Send + Sync> = Layer::chain(&["A", "B"]).unwrap();
        assert_eq!("A\nB", error.to_error_message(true));
        assert_eq!("A\nB", Some(&*error).to_error_message(true));
    }

    #[test]
    fn test_cyclic_chain_is_bounded() {
        let message = format_error(Some(&Ouroboros), None);
        assert_eq!(MAX_CHAIN_DEPTH, message.lines().count());
        assert!(message.lines().all(|line| line == "again"));
    }

    #[test]
    fn test_chain_restarts() {
        let error = Layer::chain(&["A", "B", "C"]).unwrap();
        let mut chain = Chain::new(&*error);
        chain.next();
        let rest = chain.clone();
        assert_eq!(2, chain.count());
        assert_eq!(
            vec!["B", "C"],
            rest.map(|e| e.to_string()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_parse_error_chain() {
        let error = parse_exact_with("31/12/2023", "dd/MM/yyyy'", Culture::vietnamese())
            .unwrap_err();
        assert_eq!(
            "Date pattern or culture is unusable\n\
             Invalid date/time pattern\n\
             Quoted literal starting at byte 10 should be terminated with a matching `'`",
            format_error(Some(&error), None)
        );
    }

    #[test]
    fn test_repeatable() {
        let error = Layer::chain(&["A", "B"]).unwrap();
        assert_eq!(
            format_error(Some(&*error), None),
            format_error(Some(&*error), None)
        );
    }
}
