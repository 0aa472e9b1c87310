/// Numeric conversion and digit layout helpers.
///
/// This module provides the truncating float-to-integer conversion used by
/// value conversions, radix digit rendering for integers, and the decimal
/// digit layouts (positional, scientific, general) shared by both float
/// kinds.
pub mod num;
