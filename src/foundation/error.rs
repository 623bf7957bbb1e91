/// Crate-wide result alias.
pub type PilgenResult<T> = Result<T, PilgenError>;

/// Errors surfaced by the layer model, project files and code generation.
#[derive(thiserror::Error, Debug)]
pub enum PilgenError {
    /// A model invariant does not hold (bad opacity, duplicate id, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Generation was refused because the project has no base image.
    #[error("no base image configured; set a base image before generating code")]
    MissingBaseImage,

    /// Two generated parameters share a name and strict checking is on.
    #[error("duplicate parameter name '{0}'")]
    DuplicateParameter(String),

    /// A project document could not be read or interpreted.
    #[error("project error: {0}")]
    Project(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PilgenError {
    /// Build a [`PilgenError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PilgenError::Project`].
    pub fn project(msg: impl Into<String>) -> Self {
        Self::Project(msg.into())
    }

    /// `true` for the refusals that a UI shows as a warning rather than a failure.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::MissingBaseImage | Self::DuplicateParameter(_))
    }
}
