//! Variables and assignments.

use crate::{
  dialect::Stmt,
  expr::{Bool, Float, Int, Mat2, Mat3, Mat4, Raw, Rgb, Rgba, Uint, Value, Vec2, Vec3, Vec4},
  state::Ctx,
};
use std::fmt;

/// Variable definitions of a stage.
///
/// Each definition writes `T var_N = init;` to the body at the current depth and returns a handle on `var_N`, which
/// can then be read or assigned through a [`Setter`].
pub struct Definer<'s> {
  ctx: Ctx<'s>,
}

impl fmt::Debug for Definer<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Definer").field("stage", &self.ctx.stage).finish()
  }
}

impl<'s> Definer<'s> {
  pub(crate) fn new(ctx: Ctx<'s>) -> Self {
    Self { ctx }
  }

  /// Define a fresh variable initialized with `init`.
  pub fn define<T>(&self, init: &T) -> T
  where
    T: Value<'s>,
  {
    let name = self.ctx.state.next_variable_name();
    self.define_named(name, init)
  }

  /// Define a variable with a fixed name.
  pub(crate) fn define_named<T>(&self, name: impl Into<String>, init: &T) -> T
  where
    T: Value<'s>,
  {
    let name = name.into();
    let type_name = self.ctx.type_of(T::TYPE);

    self.ctx.statement(Stmt::Define, &[type_name, name.as_str(), init.value()]);
    T::from_raw(Raw::new(name, self.ctx))
  }
}

/// Assignments of a stage.
///
/// Writes `lhs = rhs;` to the body at the current depth. The left-hand side should be a variable, an output or a
/// built-in sink; swizzles of those are fine as well.
pub struct Setter<'s> {
  ctx: Ctx<'s>,
}

impl fmt::Debug for Setter<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Setter").field("stage", &self.ctx.stage).finish()
  }
}

impl<'s> Setter<'s> {
  pub(crate) fn new(ctx: Ctx<'s>) -> Self {
    Self { ctx }
  }

  /// Assign `rhs` to `lhs`.
  pub fn assign<T>(&self, lhs: &T, rhs: &T)
  where
    T: Value<'s>,
  {
    self.ctx.statement(Stmt::Assign, &[lhs.value(), rhs.value()]);
  }
}

macro_rules! impl_typed {
  ($($name:ident => $t:ident),* $(,)?) => {
    impl<'s> Definer<'s> {
      $(
        #[doc = concat!("Define a `", stringify!($t), "` variable.")]
        pub fn $name(&self, init: &$t<'s>) -> $t<'s> {
          self.define(init)
        }
      )*
    }

    impl<'s> Setter<'s> {
      $(
        #[doc = concat!("Assign a `", stringify!($t), "`.")]
        pub fn $name(&self, lhs: &$t<'s>, rhs: &$t<'s>) {
          self.assign(lhs, rhs)
        }
      )*
    }
  };
}

impl_typed! {
  bool => Bool,
  int => Int,
  uint => Uint,
  float => Float,
  vec2 => Vec2,
  vec3 => Vec3,
  vec4 => Vec4,
  mat2 => Mat2,
  mat3 => Mat3,
  mat4 => Mat4,
  rgb => Rgb,
  rgba => Rgba,
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::{
    expr::{test::named, Handle},
    glsl::glsl110::Glsl110,
    stage::Stage,
    state::State,
  };

  #[test]
  fn define_then_assign() {
    let (dialect, state) = (Glsl110::default(), State::default());
    let ctx = Ctx::new(&dialect, &state, Stage::Vertex);
    let var = Definer::new(ctx);
    let set = Setter::new(ctx);
    let x: Float = named(ctx, "x");

    let a = var.float(&x);
    let b = var.float(&(&a * &x));
    set.float(&a, &b);

    assert_eq!(a.value(), "var_1");
    assert_eq!(b.value(), "var_2");
    assert_eq!(
      state.vertex.borrow().body,
      "float var_1 = x;\nfloat var_2 = (var_1 * x);\nvar_1 = var_2;\n"
    );
  }

  #[test]
  fn uint_variables_on_legacy() {
    let (dialect, state) = (Glsl110::default(), State::default());
    let ctx = Ctx::new(&dialect, &state, Stage::Fragment);
    let n: Uint = named(ctx, "n");

    Definer::new(ctx).uint(&n);

    assert_eq!(state.fragment.borrow().body, "int var_1 = n;\n");
  }
}
