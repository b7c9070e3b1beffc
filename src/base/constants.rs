//! Domain constants.

/// Deepest containment chain the model can express:
/// software system → container → component.
///
/// Every upward walk over `parent` links stops after this many steps.
pub const MAX_NESTING_DEPTH: usize = 3;

/// Separator between the numbering components of a nested sequence label
/// (`"2.1"`, `"2.1.3"`).
pub const SEQUENCE_SEPARATOR: char = '.';
