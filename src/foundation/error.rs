/// Convenience result type used across pixfx.
pub type PixfxResult<T> = Result<T, PixfxError>;

/// Top-level error taxonomy used by filter and pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum PixfxError {
    /// Rejected user-provided parameter (radius, target size, quality, path).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Decode or encode failure reported by the codec layer.
    #[error("io error: {context}")]
    Io {
        /// What was being read or written when the failure happened.
        context: String,
        /// Underlying codec error.
        #[source]
        source: image::ImageError,
    },
}

impl PixfxError {
    /// Build a [`PixfxError::InvalidParameter`] value.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Build a [`PixfxError::Io`] value.
    pub fn io(context: impl Into<String>, source: image::ImageError) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
