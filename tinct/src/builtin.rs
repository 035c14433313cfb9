/// Built-in variables a dialect names.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum BuiltIn {
  /// Clip-space position written by the vertex stage.
  Position,
  /// Final fragment color, written by the lighting epilogue.
  FragColor,
  /// Index of the current draw in a multi-draw call.
  DrawId,
}

/// Stage-local draw index forwarded from the vertex stage.
pub(crate) const DRAW_INDEX: &str = "uniform_draw";
