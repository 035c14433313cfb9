//! Program compilation.
//!
//! A [`Source`] runs a vertex and a fragment procedure against a dialect and assembles the emitted declarations and
//! statements into one [`Program`].

use crate::{
  builtin::{BuiltIn, DRAW_INDEX},
  dialect::{Decl, Dialect, Stmt, Template},
  error::Error,
  lighting,
  stage::{FragmentCore, Stage, VertexCore},
  state::{Ctx, Emission, State},
  uniform::UniformRecord,
};
use std::fmt;

/// Compiler of vertex and fragment procedure pairs.
///
/// Every call to [`Source::compile`] starts from fresh counters: compiling the same procedures twice yields the same
/// program.
#[derive(Clone, Debug, Default)]
pub struct Source<D> {
  dialect: D,
}

impl<D> Source<D>
where
  D: Dialect,
{
  pub fn new(dialect: D) -> Self {
    Self { dialect }
  }

  pub fn dialect(&self) -> &D {
    &self.dialect
  }

  /// Run `vertex` then `fragment` and assemble both stages.
  ///
  /// Returns the first error either procedure ran into, if any.
  ///
  /// # Examples
  ///
  /// ```
  /// use std::{cell::Cell, rc::Rc};
  /// use tinct::{glsl460::Glsl460, Source};
  ///
  /// let tint = Rc::new(Cell::new([1., 0.5, 0.5, 1.]));
  /// let program = Source::new(Glsl460::default())
  ///   .compile(
  ///     |v| v.set.vec4(&v.position, &v.input.vec4("position")),
  ///     |f| f.set.rgba(&f.fragment, &f.uniform.rgba(&tint)),
  ///   )
  ///   .unwrap();
  ///
  /// assert!(program.fragment.contains("uniform vec4 uniform_1;\n"));
  /// assert_eq!(program.uniforms.len(), 1);
  /// ```
  pub fn compile<V, F>(&self, vertex: V, fragment: F) -> Result<Program, Error>
  where
    V: FnOnce(&VertexCore<'_>),
    F: FnOnce(&FragmentCore<'_>),
  {
    let dialect: &dyn Dialect = &self.dialect;
    tracing::debug!(dialect = dialect.name(), "compiling program");

    let state = State::default();
    let vertex_ctx = Ctx::new(dialect, &state, Stage::Vertex);
    let fragment_ctx = Ctx::new(dialect, &state, Stage::Fragment);

    vertex(&VertexCore::new(vertex_ctx));

    let core = FragmentCore::new(fragment_ctx);
    fragment(&core);
    lighting::epilogue(&core);

    let forward_draw_index = state.fragment.borrow().draw_index;
    if forward_draw_index {
      forward(vertex_ctx, fragment_ctx);
    }

    if let Some(err) = state.take_error() {
      return Err(err);
    }

    let mut vertex = String::new();
    write_stage(&mut vertex, dialect, &state.vertex.borrow(), true)?;

    let mut fragment = String::new();
    let fragment_helpers = state.fragment.borrow().helpers;
    write_stage(&mut fragment, dialect, &state.fragment.borrow(), fragment_helpers)?;

    let uniforms = state.uniforms.take();

    tracing::debug!(
      dialect = dialect.name(),
      vertex_len = vertex.len(),
      fragment_len = fragment.len(),
      uniforms = uniforms.len(),
      "program compiled"
    );

    Ok(Program {
      vertex,
      fragment,
      uniforms,
    })
  }
}

/// Forward the draw ID to the fragment stage.
fn forward(vertex: Ctx<'_>, fragment: Ctx<'_>) {
  let draw_id = vertex.dialect.builtin(BuiltIn::DrawId);
  let line = vertex.render(Template::Stmt(Stmt::Assign), &[DRAW_INDEX, draw_id]);

  vertex.declare(Decl::DrawIndexOut, &[DRAW_INDEX]);
  vertex
    .state
    .vertex
    .borrow_mut()
    .body
    .insert_str(0, &format!("{}\n", line));

  fragment.declare(Decl::DrawIndexIn, &[DRAW_INDEX]);
}

/// Write a stage: preamble, header, helpers and `main`.
///
/// Extensions the stage needs go right after the `#version` line that starts the preamble.
fn write_stage(
  f: &mut impl fmt::Write,
  dialect: &dyn Dialect,
  emission: &Emission,
  helpers: bool,
) -> Result<(), fmt::Error> {
  let preamble = dialect.preamble();

  match preamble.split_once('\n') {
    Some((version, rest)) if !emission.extensions.is_empty() => {
      writeln!(f, "{}", version)?;

      for extension in &emission.extensions {
        writeln!(f, "#extension {} : enable", extension)?;
      }

      f.write_str(rest)?;
    }

    _ => f.write_str(preamble)?,
  }

  f.write_str(&emission.header)?;

  if helpers {
    f.write_str(dialect.helpers())?;
  }

  write_main(f, &emission.body)
}

fn write_main(f: &mut impl fmt::Write, body: &str) -> Result<(), fmt::Error> {
  f.write_str("\nvoid main() {\n")?;
  f.write_str(body)?;
  f.write_str("}\n")
}

/// A compiled program.
#[derive(Clone, Debug)]
pub struct Program {
  /// Vertex stage source.
  pub vertex: String,
  /// Fragment stage source.
  pub fragment: String,
  /// Uniforms of both stages, vertex first, in declaration order.
  pub uniforms: Vec<UniformRecord>,
}

impl Program {
  /// Sources as bytes, for APIs taking raw shader text.
  pub fn into_bytes(self) -> (Vec<u8>, Vec<u8>, Vec<UniformRecord>) {
    (self.vertex.into_bytes(), self.fragment.into_bytes(), self.uniforms)
  }
}
