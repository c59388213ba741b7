//! Diagnostic hook for non-fatal conditions: write errors, per-entry read
//! errors, and walker skip notices. None of these abort the session on
//! their own; they are reported here and handled by the caller.

/// A diagnostic callback. Receives the message with no prefix or trailing
/// newline; the default sink adds both.
pub type LogHook = Box<dyn FnMut(&str) + Send>;

pub(crate) struct LogSink {
    hook: Option<LogHook>,
}

impl LogSink {
    pub(crate) fn new() -> Self {
        Self { hook: None }
    }

    pub(crate) fn set_hook(&mut self, hook: Option<LogHook>) {
        self.hook = hook;
    }

    pub(crate) fn emit(&mut self, msg: &str) {
        match &mut self.hook {
            Some(hook) => hook(msg),
            None => eprintln!("zipflow: {}", msg),
        }
    }
}
