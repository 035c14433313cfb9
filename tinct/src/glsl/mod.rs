//! GLSL dialects.
//!
//! The base tables in this module describe core-profile GLSL: `in` / `out` storage qualifiers, `uint`, and the
//! overloaded `texture` sampling function. Versions override the handful of entries they disagree on and defer to
//! the base tables for everything else:
//!
//! - [`Glsl110`](glsl110::Glsl110) uses `attribute` / `varying`, the per-dimension sampling functions and maps `uint`
//!   to `int`.
//! - [`Glsl100`](glsl100::Glsl100) is [`Glsl110`](glsl110::Glsl110) with a default float precision, 1D textures
//!   stored as 2D ones and 3D textures behind `GL_OES_texture_3D`.
//! - [`Glsl460`](glsl460::Glsl460) is the base tables plus optional per-draw storage buffers.

pub mod glsl100;
pub mod glsl110;
pub mod glsl460;

use crate::{
  builtin::BuiltIn,
  dialect::{Decl, Op, Stmt, Template},
  error::Error,
  source::Program,
  stage::{FragmentCore, VertexCore},
  types::Type,
};
use std::{fmt, str::FromStr};

/// `transpose` and `inverse` for `mat4`, for versions lacking them.
pub(crate) const MATRIX_HELPERS: &str = include_str!("matrix.glsl");

/// Base type names.
pub(crate) fn type_name(ty: Type) -> &'static str {
  match ty {
    Type::Bool => "bool",
    Type::Int => "int",
    Type::Uint => "uint",
    Type::Float => "float",
    Type::Vec2 => "vec2",
    Type::Vec3 => "vec3",
    Type::Vec4 => "vec4",
    Type::Mat2 => "mat2",
    Type::Mat3 => "mat3",
    Type::Mat4 => "mat4",
    Type::Rgb => "vec3",
    Type::Rgba => "vec4",
    Type::Texture1D => "sampler1D",
    Type::Texture2D => "sampler2D",
    Type::Texture3D => "sampler3D",
    Type::TextureCube => "samplerCube",
  }
}

/// Base built-in names.
pub(crate) fn builtin(builtin: BuiltIn) -> &'static str {
  match builtin {
    BuiltIn::Position => "gl_Position",
    BuiltIn::FragColor => "out_color",
    BuiltIn::DrawId => "gl_DrawID",
  }
}

/// Base templates.
pub(crate) fn template(key: Template) -> Option<&'static str> {
  match key {
    Template::Op(ty, op) => operation(ty, op),
    Template::Literal(Type::Bool | Type::Int | Type::Float) => Some("{0}"),
    Template::Literal(Type::Uint) => Some("{0}u"),
    Template::Literal(_) => None,
    Template::Construct(ty) => constructor(ty),
    Template::Stmt(stmt) => Some(statement(stmt)),
    Template::Decl(decl) => declaration(decl),
  }
}

fn operation(ty: Type, op: Op) -> Option<&'static str> {
  let template = match (ty, op) {
    (Type::Bool, Op::And) => "({0} && {1})",
    (Type::Bool, Op::Or) => "({0} || {1})",
    (Type::Bool, Op::Not) => "(!{0})",
    (Type::Bool, Op::ToInt) => "int({0})",
    (Type::Bool, Op::ToFloat) => "float({0})",

    // scalar arithmetic
    (Type::Int | Type::Uint | Type::Float, Op::LessThan) => "({0} < {1})",
    (Type::Int | Type::Uint | Type::Float, Op::MoreThan) => "({0} > {1})",
    (Type::Int | Type::Uint | Type::Float | Type::Vec2 | Type::Vec3 | Type::Vec4, Op::Plus) => {
      "({0} + {1})"
    }
    (Type::Int | Type::Uint | Type::Float | Type::Vec2 | Type::Vec3 | Type::Vec4, Op::Minus) => {
      "({0} - {1})"
    }
    (
      Type::Int
      | Type::Uint
      | Type::Float
      | Type::Vec2
      | Type::Vec3
      | Type::Vec4
      | Type::Mat2
      | Type::Mat3
      | Type::Mat4,
      Op::Times,
    ) => "({0} * {1})",
    (Type::Int | Type::Uint | Type::Float, Op::DividedBy) => "({0} / {1})",
    (Type::Int | Type::Float | Type::Vec2 | Type::Vec3 | Type::Vec4, Op::Negate) => "(-{0})",

    // conversions
    (Type::Int | Type::Uint | Type::Float, Op::ToBool) => "bool({0})",
    (Type::Uint | Type::Float, Op::ToInt) => "int({0})",
    (Type::Int | Type::Float, Op::ToUint) => "uint({0})",
    (Type::Int | Type::Uint, Op::ToFloat) => "float({0})",

    (Type::Float, Op::Radians) => "radians({0})",
    (Type::Float, Op::Degrees) => "degrees({0})",
    (Type::Float, Op::Sin) => "sin({0})",
    (Type::Float, Op::Cos) => "cos({0})",
    (Type::Float, Op::Tan) => "tan({0})",
    (Type::Float, Op::Asin) => "asin({0})",
    (Type::Float, Op::Acos) => "acos({0})",
    (Type::Float, Op::Atan) => "atan({0})",
    (Type::Float, Op::Pow) => "pow({0}, {1})",
    (Type::Float, Op::Exp) => "exp({0})",
    (Type::Float, Op::Exp2) => "exp2({0})",
    (Type::Float, Op::Log) => "log({0})",
    (Type::Float, Op::Log2) => "log2({0})",
    (Type::Float, Op::Sqrt) => "sqrt({0})",
    (Type::Float, Op::InverseSqrt) => "inversesqrt({0})",
    (Type::Float, Op::Mod) => "mod({0}, {1})",
    (Type::Float, Op::Min) => "min({0}, {1})",
    (Type::Float, Op::Max) => "max({0}, {1})",
    (Type::Float, Op::Clamp) => "clamp({0}, {1}, {2})",
    (Type::Float, Op::Lerp) => "mix({0}, {1}, {2})",
    (Type::Float, Op::Step) => "step({1}, {0})",
    (Type::Float, Op::SmoothStep) => "smoothstep({1}, {2}, {0})",

    // swizzles
    (Type::Vec2 | Type::Vec3 | Type::Vec4, Op::X) => "{0}.x",
    (Type::Vec2 | Type::Vec3 | Type::Vec4, Op::Y) => "{0}.y",
    (Type::Vec3 | Type::Vec4, Op::Z) => "{0}.z",
    (Type::Vec4, Op::W) => "{0}.w",
    (Type::Vec4, Op::Xyz) => "{0}.xyz",
    (Type::Rgb | Type::Rgba, Op::R) => "{0}.r",
    (Type::Rgb | Type::Rgba, Op::G) => "{0}.g",
    (Type::Rgb | Type::Rgba, Op::B) => "{0}.b",
    (Type::Rgba, Op::A) => "{0}.a",
    (Type::Rgba, Op::Rgb) => "{0}.rgb",

    // geometry
    (Type::Vec2 | Type::Vec3 | Type::Vec4, Op::Length) => "length({0})",
    (Type::Vec2 | Type::Vec3 | Type::Vec4, Op::Distance) => "distance({0}, {1})",
    (Type::Vec2 | Type::Vec3 | Type::Vec4, Op::Dot) => "dot({0}, {1})",
    (Type::Vec2 | Type::Vec3 | Type::Vec4, Op::Normalize) => "normalize({0})",
    (Type::Vec2 | Type::Vec3 | Type::Vec4, Op::Scale) => "({0} * {1})",
    (Type::Vec3, Op::Cross) => "cross({0}, {1})",
    (Type::Vec3, Op::Extend) => "vec4({0}, {1})",

    // colors share their representation with vectors
    (Type::Vec3, Op::ToRgb) => "{0}",
    (Type::Vec4, Op::ToRgba) => "{0}",
    (Type::Rgb, Op::ToVec3) => "{0}",
    (Type::Rgb, Op::ToVec4) => "vec4({0}, 1.0)",
    (Type::Rgba, Op::ToVec4) => "{0}",

    (Type::Mat2 | Type::Mat3 | Type::Mat4, Op::Transform) => "({0} * {1})",
    (Type::Mat4, Op::TransformPoint) => "({0} * vec4({1}, 1.0)).xyz",
    (Type::Mat4, Op::TransformNormal) => "(transpose(inverse({0})) * {1})",

    (Type::Texture1D | Type::Texture2D | Type::Texture3D | Type::TextureCube, Op::Sample) => {
      "texture({0}, {1})"
    }

    _ => return None,
  };

  Some(template)
}

fn constructor(ty: Type) -> Option<&'static str> {
  let template = match ty {
    Type::Vec2 => "vec2({0}, {1})",
    Type::Vec3 | Type::Rgb => "vec3({0}, {1}, {2})",
    Type::Vec4 | Type::Rgba => "vec4({0}, {1}, {2}, {3})",
    Type::Mat2 => "mat2({0}, {1})",
    Type::Mat3 => "mat3({0}, {1}, {2})",
    Type::Mat4 => "mat4({0}, {1}, {2}, {3})",
    _ => return None,
  };

  Some(template)
}

fn statement(stmt: Stmt) -> &'static str {
  match stmt {
    Stmt::Define => "{0} {1} = {2};",
    Stmt::Assign => "{0} = {1};",
    Stmt::If => "if ({0}) {{",
    Stmt::ElseIf => "else if ({0}) {{",
    Stmt::Else => "else {{",
    Stmt::While => "while ({0}) {{",
    Stmt::Range => "for (int {0} = {1}; {0} < {2}; {0}++) {{",
    Stmt::End => "}}",
    Stmt::Break => "break;",
    Stmt::Continue => "continue;",
    Stmt::Discard => "discard;",
  }
}

fn declaration(decl: Decl) -> Option<&'static str> {
  let template = match decl {
    Decl::Attribute | Decl::IntegerAttribute => "in {1} {0};",
    Decl::VaryingOut => "out {1} {0};",
    Decl::VaryingIn => "in {1} {0};",
    Decl::FlatVaryingOut => "flat out {1} {0};",
    Decl::FlatVaryingIn => "flat in {1} {0};",
    Decl::Uniform => "uniform {1} {0};",
    Decl::DrawIndexOut => "flat out int {0};",
    Decl::DrawIndexIn => "flat in int {0};",
    Decl::FragmentOutput => "layout(location = 0) out vec4 {0};",
    Decl::PerDraw => return None,
  };

  Some(template)
}

/// GLSL version, for picking a dialect at runtime.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Version {
  /// GLSL ES 1.00 (WebGL 1).
  Glsl100,
  /// GLSL 1.10 (OpenGL 2.0).
  Glsl110,
  /// GLSL 4.60 core.
  Glsl460,
}

impl Version {
  pub const ALL: [Version; 3] = [Version::Glsl100, Version::Glsl110, Version::Glsl460];
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Version::Glsl100 => f.write_str("100"),
      Version::Glsl110 => f.write_str("110"),
      Version::Glsl460 => f.write_str("460"),
    }
  }
}

impl FromStr for Version {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim() {
      "100" | "100 es" => Ok(Version::Glsl100),
      "110" => Ok(Version::Glsl110),
      "460" | "460 core" => Ok(Version::Glsl460),
      _ => Err(Error::UnknownVersion(s.to_owned())),
    }
  }
}

/// Compile a vertex and fragment procedure pair with the default dialect of a version.
pub fn compile<V, F>(version: Version, vertex: V, fragment: F) -> Result<Program, Error>
where
  V: FnOnce(&VertexCore<'_>),
  F: FnOnce(&FragmentCore<'_>),
{
  match version {
    Version::Glsl100 => glsl100::compile(vertex, fragment),
    Version::Glsl110 => glsl110::compile(vertex, fragment),
    Version::Glsl460 => glsl460::compile(vertex, fragment),
  }
}
