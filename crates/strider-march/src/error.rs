use strider_paths::PathError;

/// Errors from planning or stepping a [`Mover`](crate::Mover).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarchError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("no route is planned")]
    NotPlanned,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl MarchError {
    /// Whether the underlying cause is that no route exists.
    pub fn is_no_path(&self) -> bool {
        matches!(self, Self::Path(e) if e.is_no_path())
    }
}
