use crate::render::RenderError;
use crate::types::TypeTag;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    // Registration errors
    #[error("LAYOUT_CONFLICT: layout '{name}' is registered more than once for context '{context}'")]
    LayoutConflict { name: String, context: TypeTag },

    #[error("ROUTE_NOT_FOUND: route '{0}' is not declared")]
    RouteNotFound(String),

    // Rendering errors
    #[error("LAYOUT_MISSING_RENDERER: layout '{0}' has no renderer")]
    MissingRenderer(String),

    #[error(transparent)]
    Render(RenderError),

    #[error("LAYOUT_TEMPLATE_INVALID: failed to load template '{path}': {reason}")]
    TemplateInvalid { path: PathBuf, reason: String },

    // Site errors
    #[error("RESOURCE_NOT_FOUND: no resource at path '{0}'")]
    ResourceNotFound(String),

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        LayoutError::Generic(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;
