//! Emission state.
//!
//! A compilation owns one [`State`]: the name counters, uniform records and varying table shared by both stages, plus
//! one [`Emission`] (header and body buffers) per stage. Everything handles and cores need to reach it is bundled in a
//! copyable [`Ctx`].

use crate::{
  dialect::{self, Decl, Dialect, Stmt, Template},
  error::Error,
  stage::Stage,
  template,
  types::Type,
  uniform::UniformRecord,
};
use std::{
  cell::{Cell, RefCell},
  collections::HashMap,
};

/// Lexeme of an expression whose construction failed; the compilation returns the error instead of any source.
const POISON: &str = "0";

/// Header and body of a stage.
#[derive(Debug, Default)]
pub(crate) struct Emission {
  pub(crate) header: String,
  pub(crate) body: String,
  depth: usize,
  declared: HashMap<String, Type>,
  /// The stage reads a per-draw buffer through the forwarded draw index.
  pub(crate) draw_index: bool,
  /// The stage uses functions only the dialect helpers provide.
  pub(crate) helpers: bool,
  /// Extensions enabled by the types the stage uses.
  pub(crate) extensions: Vec<&'static str>,
}

impl Emission {
  fn push_header(&mut self, line: &str) {
    self.header.push_str(line);
    self.header.push('\n');
  }

  fn push_body(&mut self, line: &str) {
    for _ in 0..self.depth {
      self.body.push('\t');
    }

    self.body.push_str(line);
    self.body.push('\n');
  }

  /// Record a declared identifier; `Ok(false)` if it was already declared with the same type.
  fn declare_name(&mut self, name: &str, ty: Type) -> Result<bool, Error> {
    match self.declared.get(name) {
      Some(&first) if first == ty => Ok(false),
      Some(&first) => Err(Error::Redeclared {
        name: name.to_owned(),
        first,
        second: ty,
      }),
      None => {
        self.declared.insert(name.to_owned(), ty);
        Ok(true)
      }
    }
  }
}

/// Per-compilation state.
#[derive(Debug, Default)]
pub(crate) struct State {
  next_var: Cell<u32>,
  next_uniform: Cell<u32>,
  next_block: Cell<u32>,
  pub(crate) uniforms: RefCell<Vec<UniformRecord>>,
  varyings: RefCell<Vec<(String, Type)>>,
  pub(crate) vertex: RefCell<Emission>,
  pub(crate) fragment: RefCell<Emission>,
  error: RefCell<Option<Error>>,
}

impl State {
  pub(crate) fn next_variable_name(&self) -> String {
    let n = self.next_var.get() + 1;
    self.next_var.set(n);
    format!("var_{}", n)
  }

  pub(crate) fn next_uniform_name(&self) -> String {
    let n = self.next_uniform.get() + 1;
    self.next_uniform.set(n);
    format!("uniform_{}", n)
  }

  /// Next free storage buffer binding point.
  pub(crate) fn next_block(&self) -> u32 {
    let n = self.next_block.get();
    self.next_block.set(n + 1);
    n
  }

  /// Number of `var_N` names handed out so far.
  #[cfg(test)]
  pub(crate) fn variables(&self) -> u32 {
    self.next_var.get()
  }

  pub(crate) fn emission(&self, stage: Stage) -> &RefCell<Emission> {
    match stage {
      Stage::Vertex => &self.vertex,
      Stage::Fragment => &self.fragment,
    }
  }

  /// Record an error. Only the first one is kept.
  pub(crate) fn fail(&self, err: Error) {
    let mut slot = self.error.borrow_mut();

    if slot.is_none() {
      tracing::warn!(error = %err, "shader compilation failed");
      *slot = Some(err);
    } else {
      tracing::debug!(error = %err, "dropping error after the first failure");
    }
  }

  pub(crate) fn take_error(&self) -> Option<Error> {
    self.error.borrow_mut().take()
  }

  fn write_varying(&self, name: &str, ty: Type) {
    let mut varyings = self.varyings.borrow_mut();

    if !varyings.iter().any(|(n, _)| n == name) {
      varyings.push((name.to_owned(), ty));
    }
  }

  fn read_varying(&self, name: &str, ty: Type) -> Result<(), Error> {
    let varyings = self.varyings.borrow();

    match varyings.iter().find(|(n, _)| n == name) {
      Some(&(_, output)) if output == ty => Ok(()),
      Some(&(_, output)) => Err(Error::VaryingMismatch {
        name: name.to_owned(),
        output,
        input: ty,
      }),
      None => Err(Error::UnmatchedVarying {
        name: name.to_owned(),
      }),
    }
  }
}

/// Everything needed to emit for one stage.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Ctx<'s> {
  pub(crate) dialect: &'s dyn Dialect,
  pub(crate) state: &'s State,
  pub(crate) stage: Stage,
}

impl<'s> Ctx<'s> {
  pub(crate) fn new(dialect: &'s dyn Dialect, state: &'s State, stage: Stage) -> Self {
    Self {
      dialect,
      state,
      stage,
    }
  }

  fn emission(&self) -> &'s RefCell<Emission> {
    self.state.emission(self.stage)
  }

  pub(crate) fn fail(&self, err: Error) {
    self.state.fail(err);
  }

  /// Target name of a type, or a placeholder once the failure is recorded.
  pub(crate) fn type_of(&self, ty: Type) -> &'static str {
    let name = match self.dialect.type_of(ty) {
      Ok(name) => name,
      Err(err) => {
        self.fail(err);
        return POISON;
      }
    };

    if let Some(extension) = self.dialect.extension(ty) {
      let mut emission = self.emission().borrow_mut();

      if !emission.extensions.contains(&extension) {
        emission.extensions.push(extension);
      }
    }

    name
  }

  /// Render the template of `key` with `args`.
  pub(crate) fn render(&self, key: Template, args: &[&str]) -> String {
    let Some(template) = self.dialect.template(key) else {
      self.fail(Error::MissingTemplate {
        key,
        dialect: self.dialect.name(),
      });
      return POISON.to_owned();
    };

    if key == Template::Op(Type::Mat4, dialect::Op::TransformNormal) {
      self.emission().borrow_mut().helpers = true;
    }

    dialect::render(key, template, args).unwrap_or_else(|err| {
      self.fail(err);
      POISON.to_owned()
    })
  }

  /// Render a float literal at the dialect precision.
  pub(crate) fn float(&self, x: f32) -> String {
    let value = template::float(x, self.dialect.float_precision());
    self.render(Template::Literal(Type::Float), &[value.as_str()])
  }

  /// Write a statement to the body at the current depth.
  pub(crate) fn statement(&self, stmt: Stmt, args: &[&str]) {
    let line = self.render(Template::Stmt(stmt), args);
    self.emission().borrow_mut().push_body(&line);
  }

  /// Write a declaration to the header.
  pub(crate) fn declare(&self, decl: Decl, args: &[&str]) {
    let line = self.render(Template::Decl(decl), args);
    tracing::trace!(stage = ?self.stage, %line, "declaration");
    self.emission().borrow_mut().push_header(&line);
  }

  /// Claim `name` in this stage; `false` if it is already declared with the same type.
  pub(crate) fn claim(&self, name: &str, ty: Type) -> bool {
    let claimed = self.emission().borrow_mut().declare_name(name, ty);

    claimed.unwrap_or_else(|err| {
      self.fail(err);
      false
    })
  }

  pub(crate) fn write_varying(&self, name: &str, ty: Type) {
    self.state.write_varying(name, ty);
  }

  pub(crate) fn read_varying(&self, name: &str, ty: Type) {
    if let Err(err) = self.state.read_varying(name, ty) {
      self.fail(err);
    }
  }

  /// Mark the stage as reading the forwarded draw index.
  pub(crate) fn use_draw_index(&self) {
    self.emission().borrow_mut().draw_index = true;
  }

  /// Run `run` one block deeper.
  pub(crate) fn indent(&self, run: impl FnOnce()) {
    self.emission().borrow_mut().depth += 1;
    run();
    self.emission().borrow_mut().depth -= 1;
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::glsl::glsl110::Glsl110;

  #[test]
  fn names_count_from_one() {
    let state = State::default();

    assert_eq!(state.next_variable_name(), "var_1");
    assert_eq!(state.next_variable_name(), "var_2");
    assert_eq!(state.next_uniform_name(), "uniform_1");
    assert_eq!(state.variables(), 2);
    assert_eq!(state.next_block(), 0);
    assert_eq!(state.next_block(), 1);
  }

  #[test]
  fn statements_are_indented() {
    let (dialect, state) = (Glsl110::default(), State::default());
    let ctx = Ctx::new(&dialect, &state, Stage::Vertex);

    ctx.statement(Stmt::If, &["c"]);
    ctx.indent(|| {
      ctx.statement(Stmt::While, &["d"]);
      ctx.indent(|| ctx.statement(Stmt::Break, &[]));
      ctx.statement(Stmt::End, &[]);
    });
    ctx.statement(Stmt::End, &[]);

    assert_eq!(
      state.vertex.borrow().body,
      "if (c) {\n\twhile (d) {\n\t\tbreak;\n\t}\n}\n"
    );
    assert!(state.fragment.borrow().body.is_empty());
  }

  #[test]
  fn first_error_wins() {
    let state = State::default();

    state.fail(Error::UnmatchedVarying {
      name: "frag_a".to_owned(),
    });
    state.fail(Error::UnmatchedVarying {
      name: "frag_b".to_owned(),
    });

    assert_eq!(
      state.take_error(),
      Some(Error::UnmatchedVarying {
        name: "frag_a".to_owned()
      })
    );
  }

  #[test]
  fn claims_detect_conflicts() {
    let (dialect, state) = (Glsl110::default(), State::default());
    let ctx = Ctx::new(&dialect, &state, Stage::Fragment);

    assert!(ctx.claim("frag_uv", Type::Vec2));
    assert!(!ctx.claim("frag_uv", Type::Vec2));
    assert!(!ctx.claim("frag_uv", Type::Vec3));

    assert_eq!(
      state.take_error(),
      Some(Error::Redeclared {
        name: "frag_uv".to_owned(),
        first: Type::Vec2,
        second: Type::Vec3,
      })
    );
  }

  #[test]
  fn varyings_are_checked() {
    let state = State::default();

    state.write_varying("frag_uv", Type::Vec2);
    assert_eq!(state.read_varying("frag_uv", Type::Vec2), Ok(()));
    assert_eq!(
      state.read_varying("frag_uv", Type::Vec3),
      Err(Error::VaryingMismatch {
        name: "frag_uv".to_owned(),
        output: Type::Vec2,
        input: Type::Vec3,
      })
    );
    assert_eq!(
      state.read_varying("frag_n", Type::Vec3),
      Err(Error::UnmatchedVarying {
        name: "frag_n".to_owned()
      })
    );
  }

  #[test]
  fn missing_template_is_recorded() {
    let (dialect, state) = (Glsl110::default(), State::default());
    let ctx = Ctx::new(&dialect, &state, Stage::Vertex);

    let lexeme = ctx.render(Template::Op(Type::Bool, dialect::Op::Sin), &["b"]);

    assert!(!lexeme.is_empty());
    assert_eq!(
      state.take_error(),
      Some(Error::MissingTemplate {
        key: Template::Op(Type::Bool, dialect::Op::Sin),
        dialect: "GLSL 110",
      })
    );
  }
}
