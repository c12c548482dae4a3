#[cfg(test)]
use mockall::automock;

/// Receives query outcomes from a node. Adaptive host selection policies implement this to learn
/// which nodes are healthy; nodes only report and never interpret the handle.
#[cfg_attr(test, automock)]
pub trait HealthFeedback {
    /// A query run through the node's pool succeeded.
    fn report_success(&self);

    /// A query run through the node's pool failed.
    fn report_failure(&self);
}

/// Feedback handle which ignores all reports. Useful when host selection does not depend on node
/// health.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NoopHealthFeedback;

impl HealthFeedback for NoopHealthFeedback {
    #[inline]
    fn report_success(&self) {}

    #[inline]
    fn report_failure(&self) {}
}
