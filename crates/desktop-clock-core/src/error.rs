//! Error kinds shared by the platform layer and the binary.

use std::fmt;

/// Failure inside the drawing stack.
///
/// `code` carries the raw `HRESULT` so logs can be matched against the
/// Direct2D/DirectWrite error tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// A factory, text format, surface or brush could not be created.
    Init { stage: &'static str, code: i32 },
    /// The drawing device went away; the surface must be recreated.
    DeviceLost,
    /// Any other failure while drawing or resizing.
    Draw { code: i32 },
}

impl GraphicsError {
    /// Whether the renderer can carry on after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Init { .. })
    }
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init { stage, code } => {
                write!(f, "failed to create {stage} (HRESULT 0x{code:08X})")
            }
            Self::DeviceLost => f.write_str("drawing device lost, surface will be recreated"),
            Self::Draw { code } => write!(f, "draw failed (HRESULT 0x{code:08X})"),
        }
    }
}

impl std::error::Error for GraphicsError {}

/// Fatal startup or runtime failure of the clock application.
#[derive(Debug)]
pub enum AppError {
    /// The window class or window could not be created.
    Window(String),
    /// The renderer could not be initialised.
    Graphics(GraphicsError),
    /// The host platform has no windowing backend.
    Unsupported,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Window(msg) => write!(f, "window creation failed: {msg}"),
            Self::Graphics(e) => write!(f, "graphics initialisation failed: {e}"),
            Self::Unsupported => f.write_str("desktop-clock only runs on Windows"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Graphics(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GraphicsError> for AppError {
    fn from(e: GraphicsError) -> Self {
        Self::Graphics(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_errors_are_fatal() {
        let init = GraphicsError::Init {
            stage: "Direct2D factory",
            code: 0x8000_4005_u32 as i32,
        };

        assert!(!init.is_recoverable());
        assert!(GraphicsError::DeviceLost.is_recoverable());
        assert!(GraphicsError::Draw { code: 1 }.is_recoverable());
    }

    #[test]
    fn display_shows_hresult_in_hex() {
        let err = GraphicsError::Init {
            stage: "text format",
            code: 0x8899_000C_u32 as i32,
        };

        assert_eq!(
            err.to_string(),
            "failed to create text format (HRESULT 0x8899000C)"
        );
    }

    #[test]
    fn app_error_wraps_graphics_source() {
        use std::error::Error;

        let err = AppError::from(GraphicsError::DeviceLost);

        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("graphics initialisation failed"));
    }
}
