//! Value model for the REBOL-family scanner.
//!
//! - [`Span`] for source locations
//! - [`Symbol`] and [`SymbolTable`] for interned, case-preserving words
//! - [`Value`], [`ScannedValue`] and [`Block`] for scan output
//! - [`ScanError`] and [`ScanFailure`] for diagnostics
//!
//! Values own their children; there is no arena or garbage collector.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod datetime;
mod scan_error;
mod span;
mod symbol;
mod symbol_table;
mod value;

pub use datetime::{Date, Time, Zone};
pub use scan_error::{ScanError, ScanErrorKind, ScanFailure};
pub use span::Span;
pub use symbol::Symbol;
pub use symbol_table::{InternError, SymbolTable};
pub use value::{
    Block, BlockKind, ScannedValue, Tuple, Value, WordKind, MAX_TUPLE, MIN_TUPLE,
};
