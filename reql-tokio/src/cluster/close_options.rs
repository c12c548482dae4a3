use derive_more::Constructor;

/// Options for closing a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Constructor)]
pub struct CloseOptions {
    /// Wait for all noreply queries to be processed by the server before closing connections.
    pub noreply_wait: bool,
}

impl CloseOptions {
    #[must_use]
    pub fn with_noreply_wait(mut self, noreply_wait: bool) -> Self {
        self.noreply_wait = noreply_wait;
        self
    }
}
