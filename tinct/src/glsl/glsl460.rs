//! GLSL 4.60 core.

use crate::{
  builtin::BuiltIn,
  dialect::{Decl, Dialect, Template},
  error::Error,
  glsl,
  source::{Program, Source},
  stage::{FragmentCore, VertexCore},
  types::Type,
};

/// GLSL 4.60 dialect.
///
/// Uses core-profile storage qualifiers, bindless textures and an explicit `out_color` fragment output. With
/// [`Glsl460::with_indexed_draws`], per-draw uniforms (obtained through `get`) are read from shader storage buffers
/// indexed by `gl_DrawID`, so that a single multi-draw call can feed each draw its own values.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Glsl460 {
  precision: usize,
  indexed_draws: bool,
}

impl Default for Glsl460 {
  fn default() -> Self {
    Self {
      precision: 4,
      indexed_draws: false,
    }
  }
}

impl Glsl460 {
  pub fn new() -> Self {
    Self::default()
  }

  /// Render float literals with `precision` decimals (at least one).
  pub fn with_float_precision(self, precision: usize) -> Self {
    Self {
      precision: precision.max(1),
      ..self
    }
  }

  /// Store per-draw uniforms in buffers indexed by the draw ID.
  pub fn with_indexed_draws(self, indexed_draws: bool) -> Self {
    Self {
      indexed_draws,
      ..self
    }
  }
}

impl Dialect for Glsl460 {
  fn name(&self) -> &'static str {
    "GLSL 460"
  }

  fn type_name(&self, ty: Type) -> Option<&'static str> {
    Some(glsl::type_name(ty))
  }

  fn template(&self, key: Template) -> Option<&'static str> {
    match key {
      Template::Decl(Decl::PerDraw) => {
        Some("layout(std430, binding = {2}) readonly buffer {0}_block {{ {1} {0}[]; }};")
      }
      _ => glsl::template(key),
    }
  }

  fn preamble(&self) -> &'static str {
    "#version 460\n#extension GL_ARB_bindless_texture : require\n"
  }

  fn builtin(&self, builtin: BuiltIn) -> &'static str {
    glsl::builtin(builtin)
  }

  fn indexed_draws(&self) -> bool {
    self.indexed_draws
  }

  fn float_precision(&self) -> usize {
    self.precision
  }
}

/// Compile a program to GLSL 4.60.
pub fn compile<V, F>(vertex: V, fragment: F) -> Result<Program, Error>
where
  V: FnOnce(&VertexCore<'_>),
  F: FnOnce(&FragmentCore<'_>),
{
  Source::new(Glsl460::default()).compile(vertex, fragment)
}
