//! Free-standing accessors.
//!
//! These mirror the checked accessors on [`Variant`] for code that prefers
//! `get::<T, _, _>(&value)` over method syntax.
//!
//! ```
//! use sovran_variant::{get, holds_alternative, Variant};
//!
//! let value: Variant![i32, String] = Variant::new("text");
//! assert!(holds_alternative::<String, _, _>(&value));
//! assert_eq!(get::<String, _, _>(&value).map(String::len), Ok(4));
//! assert!(get::<i32, _, _>(&value).is_err());
//! ```

use crate::error::VariantError;
use crate::resolve::{At, Locate};
use crate::variant::Variant;

/// Returns the live `T` of `variant`.
///
/// # Errors
///
/// - Returns `VariantError::BadAccess` if another alternative is live
/// - Returns `VariantError::Valueless` if the variant is valueless
pub fn get<T, I, L>(variant: &Variant<L>) -> Result<&T, VariantError>
where
    L: Locate<T, I>,
{
    variant.get::<T, I>()
}

/// Returns the live `T` of `variant` mutably.
///
/// # Errors
///
/// Same as [`get`].
pub fn get_mut<T, I, L>(variant: &mut Variant<L>) -> Result<&mut T, VariantError>
where
    L: Locate<T, I>,
{
    variant.get_mut::<T, I>()
}

/// Returns the alternative at slot `I` of `variant`.
///
/// # Errors
///
/// Same as [`get`].
pub fn get_at<I, L>(variant: &Variant<L>) -> Result<&<L as At<I>>::Output, VariantError>
where
    L: At<I>,
{
    variant.get_at::<I>()
}

/// Returns the alternative at slot `I` of `variant` mutably.
///
/// # Errors
///
/// Same as [`get`].
pub fn get_at_mut<I, L>(
    variant: &mut Variant<L>,
) -> Result<&mut <L as At<I>>::Output, VariantError>
where
    L: At<I>,
{
    variant.get_at_mut::<I>()
}

/// Returns the live `T` of `variant`, or `None` if it holds something else
pub fn get_if<T, I, L>(variant: &Variant<L>) -> Option<&T>
where
    L: Locate<T, I>,
{
    variant.get_if::<T, I>()
}

/// Moves the live `T` out of `variant`.
///
/// # Errors
///
/// Same as [`get`].
pub fn into_inner<T, I, L>(variant: Variant<L>) -> Result<T, VariantError>
where
    L: Locate<T, I>,
{
    variant.into_inner::<T, I>()
}

/// Returns true if `T` is the live alternative of `variant`
pub fn holds_alternative<T, I, L>(variant: &Variant<L>) -> bool
where
    L: Locate<T, I>,
{
    variant.holds_alternative::<T, I>()
}
