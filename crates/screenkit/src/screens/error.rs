//! Screen stack errors

use thiserror::Error;

use crate::ui::GuiError;

/// Failure attributed to a named screen
#[derive(Error, Debug)]
pub enum ScreenError {
    /// Window markup or content failed to load
    #[error("Screen '{screen}' failed to load: {source}")]
    Load {
        /// Screen name
        screen: String,
        /// Underlying GUI error
        #[source]
        source: GuiError,
    },

    /// Drawing the screen failed
    #[error("Screen '{screen}' failed to draw: {source}")]
    Draw {
        /// Screen name
        screen: String,
        /// Underlying GUI error
        #[source]
        source: GuiError,
    },
}

impl ScreenError {
    /// Name of the screen that failed
    pub fn screen(&self) -> &str {
        match self {
            Self::Load { screen, .. } | Self::Draw { screen, .. } => screen,
        }
    }
}
