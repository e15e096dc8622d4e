/*
 * Error Module
 *
 * This module defines the crate-wide error type. The simulation step itself
 * never fails; errors come from invalid configuration or from drawing a frame.
 */

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Invalid world, grid, cadence or placement parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Drawing the current frame failed.
    #[error("unable to update frame: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidParam("cell_size must be > 0".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid parameter"));
        assert!(msg.contains("cell_size"));
    }

    #[test]
    fn render_error_mentions_frame() {
        let e = Error::Render("surface lost".into());
        assert_eq!(e.to_string(), "unable to update frame: surface lost");
    }
}
