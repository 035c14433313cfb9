//! Value handles.
//!
//! A handle is an immutable, typed carrier of a target-language expression. Every operation on a handle renders a
//! dialect template with the lexemes of its operands and returns a new handle; nothing is written to the stage while
//! doing so. Statements are only emitted through a [`Core`](crate::Core).

use crate::{
  dialect::{Op, Template},
  state::Ctx,
  types::Type,
};
use std::{fmt, ops};

/// Lexeme and compilation context of a handle.
#[derive(Clone)]
pub struct Raw<'s> {
  value: String,
  ctx: Ctx<'s>,
}

impl<'s> Raw<'s> {
  pub(crate) fn new(value: impl Into<String>, ctx: Ctx<'s>) -> Self {
    Self {
      value: value.into(),
      ctx,
    }
  }

  /// Apply `op` with `self` as receiver.
  pub(crate) fn op<T>(&self, ty: Type, op: Op, args: &[&str]) -> T
  where
    T: Handle<'s>,
  {
    let mut positions = Vec::with_capacity(args.len() + 1);
    positions.push(self.value.as_str());
    positions.extend_from_slice(args);

    let value = self.ctx.render(Template::Op(ty, op), &positions);
    T::from_raw(Raw::new(value, self.ctx))
  }
}

mod sealed {
  pub trait Sealed {}
}

/// Typed handle on a target-language expression.
///
/// Implemented by one type per [`Type`]. Handles are tied to the compilation that created them by the `'s` lifetime.
/// They never compare equal; their only use is as operands to other operations and statements.
pub trait Handle<'s>: sealed::Sealed + Clone + fmt::Debug + fmt::Display {
  /// Semantic type of the handle.
  const TYPE: Type;

  /// Expression lexeme.
  fn value(&self) -> &str;

  #[doc(hidden)]
  fn from_raw(raw: Raw<'s>) -> Self;

  #[doc(hidden)]
  fn raw(&self) -> &Raw<'s>;
}

/// Handles of types that can be stored in variables and assigned to.
///
/// Every type but samplers.
pub trait Value<'s>: Handle<'s> {}

macro_rules! handles {
  ($($(#[$meta:meta])* $t:ident),* $(,)?) => {
    $(
      $(#[$meta])*
      #[derive(Clone)]
      pub struct $t<'s>(Raw<'s>);

      impl sealed::Sealed for $t<'_> {}

      impl<'s> Handle<'s> for $t<'s> {
        const TYPE: Type = Type::$t;

        fn value(&self) -> &str {
          &self.0.value
        }

        fn from_raw(raw: Raw<'s>) -> Self {
          Self(raw)
        }

        fn raw(&self) -> &Raw<'s> {
          &self.0
        }
      }

      impl fmt::Debug for $t<'_> {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
          f.debug_tuple(stringify!($t)).field(&self.0.value).finish()
        }
      }

      impl fmt::Display for $t<'_> {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
          f.write_str(&self.0.value)
        }
      }
    )*
  };
}

handles! {
  /// Boolean expression.
  Bool,
  /// Signed integer expression.
  Int,
  /// Unsigned integer expression.
  ///
  /// Dialects without unsigned integers represent it as a clamped signed integer.
  Uint,
  /// Float expression.
  Float,
  /// 2D vector expression.
  Vec2,
  /// 3D vector expression.
  Vec3,
  /// 4D vector expression.
  Vec4,
  /// 2×2 matrix expression.
  Mat2,
  /// 3×3 matrix expression.
  Mat3,
  /// 4×4 matrix expression.
  Mat4,
  /// Opaque color expression.
  Rgb,
  /// Color with alpha expression.
  Rgba,
  /// 1D sampler.
  Texture1D,
  /// 2D sampler.
  Texture2D,
  /// 3D sampler.
  Texture3D,
  /// Cube map sampler.
  TextureCube,
}

macro_rules! impl_Value {
  ($($t:ident),*) => {
    $(impl<'s> Value<'s> for $t<'s> {})*
  };
}

impl_Value!(Bool, Int, Uint, Float, Vec2, Vec3, Vec4, Mat2, Mat3, Mat4, Rgb, Rgba);

/// Generate operation methods in an `impl<'s>` block of a handle.
///
/// `name(arg: Type, ...) -> Output = Op;` renders the `Op` template of `Self::TYPE` with the receiver and the
/// arguments, in order.
macro_rules! handle_ops {
  ($($(#[$meta:meta])* $name:ident($($arg:ident: $arg_ty:ident),*) -> $out:ident = $op:ident;)*) => {
    $(
      $(#[$meta])*
      pub fn $name(&self, $($arg: &$arg_ty<'s>),*) -> $out<'s> {
        self.raw().op(Self::TYPE, $crate::dialect::Op::$op, &[$($arg.value()),*])
      }
    )*
  };
}

pub(crate) use handle_ops;

impl<'s> Bool<'s> {
  handle_ops! {
    /// Logical and.
    and(rhs: Bool) -> Bool = And;
    /// Logical or.
    or(rhs: Bool) -> Bool = Or;
    /// Logical negation.
    not() -> Bool = Not;
    /// `1` if true, `0` otherwise.
    to_int() -> Int = ToInt;
    /// `1.0` if true, `0.0` otherwise.
    to_float() -> Float = ToFloat;
  }
}

impl<'s> Int<'s> {
  handle_ops! {
    less_than(rhs: Int) -> Bool = LessThan;
    more_than(rhs: Int) -> Bool = MoreThan;
    plus(rhs: Int) -> Int = Plus;
    minus(rhs: Int) -> Int = Minus;
    times(rhs: Int) -> Int = Times;
    /// Integer division. A zero divisor is not guarded against; the result is undefined on the GPU.
    divided_by(rhs: Int) -> Int = DividedBy;
    to_float() -> Float = ToFloat;
    to_uint() -> Uint = ToUint;
    to_bool() -> Bool = ToBool;
  }
}

impl<'s> Uint<'s> {
  handle_ops! {
    less_than(rhs: Uint) -> Bool = LessThan;
    more_than(rhs: Uint) -> Bool = MoreThan;
    /// Addition; saturating at zero on dialects emulating unsigned integers.
    plus(rhs: Uint) -> Uint = Plus;
    /// Subtraction; saturating at zero on dialects emulating unsigned integers.
    minus(rhs: Uint) -> Uint = Minus;
    times(rhs: Uint) -> Uint = Times;
    divided_by(rhs: Uint) -> Uint = DividedBy;
    to_float() -> Float = ToFloat;
    to_int() -> Int = ToInt;
    to_bool() -> Bool = ToBool;
  }
}

impl<'s> Float<'s> {
  handle_ops! {
    less_than(rhs: Float) -> Bool = LessThan;
    more_than(rhs: Float) -> Bool = MoreThan;
    plus(rhs: Float) -> Float = Plus;
    minus(rhs: Float) -> Float = Minus;
    times(rhs: Float) -> Float = Times;
    divided_by(rhs: Float) -> Float = DividedBy;
    to_uint() -> Uint = ToUint;
    to_int() -> Int = ToInt;
    to_bool() -> Bool = ToBool;
  }
}

macro_rules! impl_vector_arith {
  ($($t:ident),*) => {
    $(
      impl<'s> $t<'s> {
        handle_ops! {
          /// Component-wise addition.
          plus(rhs: $t) -> $t = Plus;
          /// Component-wise subtraction.
          minus(rhs: $t) -> $t = Minus;
          /// Component-wise multiplication.
          times(rhs: $t) -> $t = Times;
          /// Multiplication by a scalar.
          scale(factor: Float) -> $t = Scale;
        }
      }
    )*
  };
}

impl_vector_arith!(Vec2, Vec3, Vec4);

macro_rules! impl_binop_Handle {
  ($op:ident, $meth_name:ident, $a:ident, $b:ident, $handle_op:ident) => {
    // handle OP handle
    impl<'s> ops::$op<$b<'s>> for $a<'s> {
      type Output = $a<'s>;

      fn $meth_name(self, rhs: $b<'s>) -> Self::Output {
        self.0.op(Type::$a, Op::$handle_op, &[rhs.value()])
      }
    }

    // &handle OP &handle
    impl<'a, 's> ops::$op<&'a $b<'s>> for &'a $a<'s> {
      type Output = $a<'s>;

      fn $meth_name(self, rhs: &'a $b<'s>) -> Self::Output {
        self.0.op(Type::$a, Op::$handle_op, &[rhs.value()])
      }
    }
  };
}

macro_rules! impl_arith_Handle {
  ($($t:ident),*) => {
    $(
      impl_binop_Handle!(Add, add, $t, $t, Plus);
      impl_binop_Handle!(Sub, sub, $t, $t, Minus);
      impl_binop_Handle!(Mul, mul, $t, $t, Times);
    )*
  };
}

impl_arith_Handle!(Int, Uint, Float, Vec2, Vec3, Vec4);

impl_binop_Handle!(Div, div, Int, Int, DividedBy);
impl_binop_Handle!(Div, div, Uint, Uint, DividedBy);
impl_binop_Handle!(Div, div, Float, Float, DividedBy);

impl_binop_Handle!(Mul, mul, Vec2, Float, Scale);
impl_binop_Handle!(Mul, mul, Vec3, Float, Scale);
impl_binop_Handle!(Mul, mul, Vec4, Float, Scale);

impl_binop_Handle!(BitAnd, bitand, Bool, Bool, And);
impl_binop_Handle!(BitOr, bitor, Bool, Bool, Or);

macro_rules! impl_unop_Handle {
  ($op:ident, $meth_name:ident, $t:ident, $handle_op:ident) => {
    impl<'s> ops::$op for $t<'s> {
      type Output = Self;

      fn $meth_name(self) -> Self::Output {
        self.0.op(Type::$t, Op::$handle_op, &[])
      }
    }

    impl<'a, 's> ops::$op for &'a $t<'s> {
      type Output = $t<'s>;

      fn $meth_name(self) -> Self::Output {
        self.0.op(Type::$t, Op::$handle_op, &[])
      }
    }
  };
}

impl_unop_Handle!(Neg, neg, Int, Negate);
impl_unop_Handle!(Neg, neg, Float, Negate);
impl_unop_Handle!(Neg, neg, Vec2, Negate);
impl_unop_Handle!(Neg, neg, Vec3, Negate);
impl_unop_Handle!(Neg, neg, Vec4, Negate);
impl_unop_Handle!(Not, not, Bool, Not);

#[cfg(test)]
pub(crate) mod test {
  use super::*;
  use crate::{
    glsl::{glsl110::Glsl110, glsl460::Glsl460},
    stage::Stage,
    state::State,
  };

  /// A handle named `name`, for building expressions outside of a core.
  pub(crate) fn named<'s, T: Handle<'s>>(ctx: Ctx<'s>, name: &str) -> T {
    T::from_raw(Raw::new(name, ctx))
  }

  #[test]
  fn scalar_arithmetic() {
    let (dialect, state) = (Glsl460::default(), State::default());
    let ctx = Ctx::new(&dialect, &state, Stage::Vertex);
    let a: Int = named(ctx, "a");
    let b: Int = named(ctx, "b");

    assert_eq!((&a + &b).value(), "(a + b)");
    assert_eq!((a.clone() * b.clone() - a.clone()).value(), "((a * b) - a)");
    assert_eq!((-&a).value(), "(-a)");
    assert_eq!(a.divided_by(&b).value(), "(a / b)");
    assert_eq!(a.less_than(&b).value(), "(a < b)");
    assert_eq!(a.to_float().value(), "float(a)");
    assert_eq!(a.to_uint().value(), "uint(a)");
    assert_eq!(format!("{:?}", a), "Int(\"a\")");
    assert!(state.take_error().is_none());
  }

  #[test]
  fn uint_saturates_on_legacy() {
    let (dialect, state) = (Glsl110::default(), State::default());
    let ctx = Ctx::new(&dialect, &state, Stage::Vertex);
    let a: Uint = named(ctx, "a");
    let b: Uint = named(ctx, "b");

    assert_eq!((&a - &b).value(), "int(max(0.0, float(a - b)))");
    assert_eq!(a.plus(&b).value(), "int(max(0.0, float(a + b)))");
    assert_eq!(a.times(&b).value(), "(a * b)");
    assert_eq!(a.to_int().value(), "a");
  }

  #[test]
  fn bool_logic() {
    let (dialect, state) = (Glsl460::default(), State::default());
    let ctx = Ctx::new(&dialect, &state, Stage::Fragment);
    let p: Bool = named(ctx, "p");
    let q: Bool = named(ctx, "q");

    assert_eq!((!(&p & &q)).value(), "(!(p && q))");
    assert_eq!(p.or(&q).value(), "(p || q)");
    assert_eq!(p.to_float().value(), "float(p)");
  }

  #[test]
  fn vector_arithmetic() {
    let (dialect, state) = (Glsl460::default(), State::default());
    let ctx = Ctx::new(&dialect, &state, Stage::Fragment);
    let u: Vec3 = named(ctx, "u");
    let v: Vec3 = named(ctx, "v");
    let k: Float = named(ctx, "k");

    assert_eq!((&u + &v).value(), "(u + v)");
    assert_eq!((&u * &k).value(), "(u * k)");
    assert_eq!(u.scale(&k).value(), "(u * k)");
    assert_eq!((-v).value(), "(-v)");
  }
}
