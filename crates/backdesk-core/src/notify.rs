/// Fire-and-forget notification sink.
///
/// Implementations present toasts, status lines, or colored stderr;
/// delivery order follows call order, nothing is returned.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that discards everything. Headless and test use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
