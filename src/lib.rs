//! # sovran-variant
//!
//! A type-safe sum type over a fixed list of alternatives.
//!
//! `sovran-variant` provides [`Variant`], a value that holds exactly one instance of
//! one of the types in a list fixed at compile time. The value is stored inline
//! without allocation or dynamic dispatch, the live alternative is tracked next to
//! it, and every access is checked: asking for a type that is not in the list does
//! not compile, and asking for one that is in the list but not live returns an
//! error.
//!
//! ## Key Features
//!
//! - **Type-safe**: Unlisted types and out-of-range slots are rejected at compile time
//! - **Allocation-free**: Alternatives live in a cell sized for the largest one
//! - **Value resolution**: Construction and assignment pick the slot from the input
//!   type, promoting `f32` to an `f64` alternative and `&str` to a `String` one
//! - **Explicit failure**: Fallible constructors either report their error
//!   ([`Variant::try_emplace`]) or leave the variant valueless ([`Variant::set_with`])
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use sovran_variant::{Variant, VariantError};
//!
//! fn main() -> Result<(), VariantError> {
//!     // An int, a string or a double
//!     let mut value: Variant![i32, String, f64] = Variant::new(5i32);
//!     assert_eq!(value.index(), 0);
//!     assert_eq!(*value.get::<i32, _>()?, 5);
//!
//!     // Assigning a different alternative switches the live slot
//!     value.set("abc");
//!     assert_eq!(value.index(), 1);
//!     println!("Text: {}", value.get::<String, _>()?);
//!
//!     // A narrower float resolves to the f64 alternative
//!     value.set(2.5f32);
//!     assert_eq!(value.index(), 2);
//!
//!     // Reading the wrong alternative is an error
//!     match value.get::<String, _>() {
//!         Ok(text) => println!("Text: {}", text),
//!         Err(VariantError::BadAccess { requested, active }) => {
//!             println!("Asked for {} but {} is live", requested, active)
//!         }
//!         Err(e) => println!("Other error: {}", e),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Emplacing and Failure
//!
//! ```rust
//! use sovran_variant::Variant;
//!
//! let mut value: Variant![i32, Vec<i32>] = Variant::default();
//!
//! // Build the new alternative directly from constructor arguments
//! value.emplace::<Vec<i32>, _, _>([1, 2, 3]);
//! assert!(value.holds_alternative::<Vec<i32>, _>());
//!
//! // A failing constructor is reported, and the variant is left valueless
//! let parsed = value.try_emplace::<i32, _, _, _>(|| "twelve".parse::<i32>());
//! assert!(parsed.is_err());
//! assert!(value.valueless_by_exception());
//!
//! // Any later assignment or emplacement refills it
//! value.set(12i32);
//! assert_eq!(value.get::<i32, _>(), Ok(&12));
//! ```
//!
//! ### Slots
//!
//! Alternatives can be named by slot instead of type, which is the only way to
//! reach a type listed more than once.
//!
//! ```rust
//! use sovran_variant::{Variant, S0, S1};
//!
//! let mut value: Variant![u8, u8] = Variant::default();
//! value.emplace_at::<S1, _, _>(7u8);
//! assert!(value.holds_at::<S1>());
//! assert!(value.get_at::<S0>().is_err());
//! ```
//!
//! Types outside the list do not compile:
//!
//! ```compile_fail
//! use sovran_variant::Variant;
//!
//! let value: Variant![i32, String] = Variant::new(5i32);
//! value.get::<u64, _>();
//! ```

#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($($arg:tt)*) => { ::tracing::trace!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($($arg:tt)*) => {
        ()
    };
}

#[cfg(feature = "tracing")]
macro_rules! debug_event {
    ($($arg:tt)*) => { ::tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_event {
    ($($arg:tt)*) => {
        ()
    };
}

pub mod access;
mod alternatives;
mod error;
mod policy;
mod resolve;
mod storage;
mod variant;


pub use alternatives::{
    Alternatives, CloneAlternatives, Cons, DebugAlternatives, EqAlternatives, HashAlternatives,
    Nil,
};
pub use error::VariantError;
pub use policy::{Admit, Assign, Borrow, Const, Exact, Promote, Seal};
pub use resolve::{
    At, Here, Locate, There, S0, S1, S10, S11, S2, S3, S4, S5, S6, S7, S8, S9,
};
pub use variant::{Variant, VARIANT_NPOS};

pub use access::{get, get_at, get_at_mut, get_if, get_mut, holds_alternative, into_inner};

/// Builds an alternative list type.
///
/// `Alts![A, B, C]` is `Cons<A, Cons<B, Cons<C, Nil>>>`.
#[macro_export]
macro_rules! Alts {
    [] => [$crate::Nil];
    [$head:ty $(, $tail:ty)* $(,)?] => [$crate::Cons<$head, $crate::Alts![$($tail),*]>];
}

/// Names the variant type over the given alternatives.
///
/// ```
/// use sovran_variant::Variant;
///
/// let value: Variant![bool, char] = Variant::new('x');
/// assert_eq!(value.index(), 1);
/// ```
#[macro_export]
macro_rules! Variant {
    [$($alt:ty),+ $(,)?] => [$crate::Variant<$crate::Alts![$($alt),+]>];
}
