/// Arbitrary-precision float support.
///
/// Fixes the working precision and rounding mode of the
/// `ArbitraryPrecisionFloat` variant, and renders such floats as text with a
/// fixed number of significant digits.
pub mod big_float;
/// The runtime value type and its promotion lattice.
pub mod core;
/// Base-aware rendering of values.
///
/// Defines the output bases, their prefixes and float formats, the
/// packed-bytes-as-string mode and the character decomposition used by the
/// `print /c` command.
pub mod format;
