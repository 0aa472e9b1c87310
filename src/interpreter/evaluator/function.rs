/// Builtin function implementations.
///
/// Contains the `random` generator and the conversion functions that make
/// every value kind reachable from input.
pub mod builtin;

/// The builtin registry and call dispatch.
pub mod core;
