use std::fmt;

/// Errors that can occur when reading a `Variant`
///
/// Failures raised by an alternative's own constructor are not represented
/// here; they keep the caller's error type (see `Variant::try_emplace`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantError {
    /// The requested alternative is not the one currently held
    BadAccess {
        /// Type name of the alternative that was asked for
        requested: &'static str,
        /// Type name of the alternative that is live
        active: &'static str,
    },
    /// The variant lost its value when a construction failed
    Valueless {
        /// Type name of the alternative that was asked for
        requested: &'static str,
    },
}

impl VariantError {
    /// Type name of the alternative the failed access asked for
    pub fn requested(&self) -> &'static str {
        match self {
            VariantError::BadAccess { requested, .. } => requested,
            VariantError::Valueless { requested } => requested,
        }
    }
}

impl fmt::Display for VariantError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VariantError::BadAccess { requested, active } => write!(
                f,
                "Bad variant access: requested {} but {} is active",
                requested, active
            ),
            VariantError::Valueless { requested } => write!(
                f,
                "Bad variant access: requested {} but the variant is valueless",
                requested
            ),
        }
    }
}

impl std::error::Error for VariantError {}
