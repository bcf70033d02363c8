//! GUI error types

use std::path::PathBuf;

/// Errors raised by render backends
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Draw call issued outside a batch
    #[error("No batch is active")]
    NoActiveBatch,

    /// A batch was begun while another was active
    #[error("A batch is already active")]
    BatchAlreadyActive,

    /// Backend-specific failure
    #[error("Backend error: {0}")]
    Backend(String),
}

/// GUI errors
#[derive(thiserror::Error, Debug)]
pub enum GuiError {
    /// Markup is not well-formed XML
    #[error("Markup syntax error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Markup file could not be read
    #[error("Failed to read markup file {path}: {source}")]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Document root is not a window element
    #[error("Root element must be <Window>, found <{0}>")]
    InvalidRoot(String),

    /// Control tag not present in the control registry
    #[error("Unknown control type: {0}")]
    UnknownControl(String),

    /// Visual type not present in the visual registry
    #[error("Unknown visual type: {0}")]
    UnknownVisual(String),

    /// Control references a template that is not declared
    #[error("Control '{control}' references unknown template '{template}'")]
    UnknownTemplate {
        /// Referencing control
        control: String,
        /// Missing template name
        template: String,
    },

    /// Control ended up with no visuals
    #[error("Control '{0}' has no visuals")]
    NoVisuals(String),

    /// Two controls share a name
    #[error("Duplicate control name: {0}")]
    DuplicateControl(String),

    /// Required attribute is absent
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        /// Element tag
        element: String,
        /// Attribute name
        attribute: String,
    },

    /// Attribute value could not be parsed
    #[error("Invalid value '{value}' for attribute '{attribute}'")]
    InvalidAttribute {
        /// Attribute name
        attribute: String,
        /// Offending text
        value: String,
    },

    /// Sprite or font not provided by content
    #[error("Missing content asset: {0}")]
    MissingAsset(String),

    /// No control with this name in the window
    #[error("No control named '{0}'")]
    ControlNotFound(String),

    /// Render backend failure
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl GuiError {
    /// Build an [`GuiError::InvalidAttribute`]
    pub fn invalid_attribute(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Build a [`GuiError::MissingAttribute`]
    pub fn missing_attribute(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }
}
