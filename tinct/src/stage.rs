//! Stage cores.
//!
//! A core is what a vertex or fragment procedure receives. Both kinds dereference to a [`Core`], which gathers the
//! factories and statements common to both stages; each kind then adds its own outputs. The fragment core has no `out`
//! and the vertex core has no `discard`: misuse does not compile.

use crate::{
  attribute::Attributes,
  builtin::BuiltIn,
  dialect::{Decl, Template},
  expr::{Handle, Raw, Rgba, Vec3, Vec4},
  lighting,
  lit::Constructor,
  state::Ctx,
  uniform::{Frequency, Uniforms},
  var::{Definer, Setter},
};
use std::{fmt, ops::Deref};

/// Pipeline stage.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Stage {
  Vertex,
  Fragment,
}

/// Factories and statements shared by both stages.
///
/// Control flow (`when`, `range`, `loop_while`, …) is also available on the core.
pub struct Core<'s> {
  /// Stage inputs: vertex attributes, or varyings written by the vertex stage.
  pub input: Attributes<'s>,
  /// Per-frame uniforms.
  pub uniform: Uniforms<'s>,
  /// Per-draw uniforms.
  pub get: Uniforms<'s>,
  /// Variable definitions.
  pub var: Definer<'s>,
  /// Literals and composites.
  pub new: Constructor<'s>,
  /// Assignments.
  pub set: Setter<'s>,
  pub(crate) ctx: Ctx<'s>,
}

impl fmt::Debug for Core<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Core")
      .field("stage", &self.ctx.stage)
      .field("dialect", &self.ctx.dialect.name())
      .finish()
  }
}

impl<'s> Core<'s> {
  fn new(ctx: Ctx<'s>, input: Attributes<'s>) -> Self {
    Self {
      input,
      uniform: Uniforms::new(ctx, Frequency::Frame),
      get: Uniforms::new(ctx, Frequency::Draw),
      var: Definer::new(ctx),
      new: Constructor::new(ctx),
      set: Setter::new(ctx),
      ctx,
    }
  }

  /// Stage this core emits to.
  pub fn stage(&self) -> Stage {
    self.ctx.stage
  }
}

/// Core of the vertex stage.
#[derive(Debug)]
pub struct VertexCore<'s> {
  core: Core<'s>,
  /// Varyings read by the fragment stage.
  pub out: Attributes<'s>,
  /// Clip-space position.
  pub position: Vec4<'s>,
}

impl<'s> VertexCore<'s> {
  pub(crate) fn new(ctx: Ctx<'s>) -> Self {
    let position = Raw::new(ctx.dialect.builtin(BuiltIn::Position), ctx);

    Self {
      core: Core::new(ctx, Attributes::vertex_input(ctx)),
      out: Attributes::vertex_output(ctx),
      position: Vec4::from_raw(position),
    }
  }
}

impl<'s> Deref for VertexCore<'s> {
  type Target = Core<'s>;

  fn deref(&self) -> &Self::Target {
    &self.core
  }
}

/// Core of the fragment stage.
///
/// The fragment procedure does not write the final color itself: it writes a surface color to
/// [`fragment`](Self::fragment) and optionally a normal to [`normal`](Self::normal), and the lighting epilogue computes
/// the final color from both.
#[derive(Debug)]
pub struct FragmentCore<'s> {
  core: Core<'s>,
  /// Surface color, before lighting.
  pub fragment: Rgba<'s>,
  /// Surface normal; faces the viewer unless written.
  pub normal: Vec3<'s>,
  pub(crate) color: Vec4<'s>,
}

impl<'s> FragmentCore<'s> {
  pub(crate) fn new(ctx: Ctx<'s>) -> Self {
    let core = Core::new(ctx, Attributes::fragment_input(ctx));
    let color = ctx.dialect.builtin(BuiltIn::FragColor);

    if ctx.dialect.template(Template::Decl(Decl::FragmentOutput)).is_some() {
      ctx.declare(Decl::FragmentOutput, &[color]);
    }

    let (fragment, normal) = lighting::prologue(&core);

    Self {
      core,
      fragment,
      normal,
      color: Vec4::from_raw(Raw::new(color, ctx)),
    }
  }
}

impl<'s> Deref for FragmentCore<'s> {
  type Target = Core<'s>;

  fn deref(&self) -> &Self::Target {
    &self.core
  }
}
