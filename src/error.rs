use thiserror::Error;

pub type SceneResult<T> = Result<T, SceneError>;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid surface size: width={width}, height={height}")]
    InvalidSurface { width: f64, height: f64 },

    #[error("attaching node would create a hierarchy cycle")]
    HierarchyCycle,

    #[error("the root node cannot be attached to a parent")]
    RootAttachment,

    #[error("unknown node kind `{0}`")]
    UnknownNodeKind(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("content failure: {0}")]
    Content(String),
}
