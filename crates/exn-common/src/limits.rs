//! Centralized limits and thresholds for the analyzer.
//!
//! Inheritance chains and documentation comments come from host input, so every
//! walk over them is bounded here rather than trusting the input to be well formed.

/// Maximum number of base-type hops followed by a subtype query.
///
/// A model with an inheritance cycle (`class A : B`, `class B : A`) would
/// otherwise loop forever. Chains deeper than this are treated as unrelated.
pub const MAX_INHERITANCE_DEPTH: u32 = 256;

/// Remaining stack below which nested model (de)serialization grows the stack.
pub const STACK_RED_ZONE: usize = 64 * 1024;

/// Size of each stack segment allocated while (de)serializing nested operations.
pub const STACK_GROWTH: usize = 2 * 1024 * 1024;

/// Maximum number of `<exception>` entries read from one documentation comment.
pub const MAX_DOCUMENTED_EXCEPTIONS: usize = 256;

/// Initial capacity for per-check escape buffers.
pub const ESCAPE_BUFFER_CAPACITY: usize = 16;
