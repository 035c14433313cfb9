//! Stage inputs and outputs.

use crate::{
  dialect::{Decl, Template},
  error::Error,
  expr::{Bool, Float, Int, Mat2, Mat3, Mat4, Raw, Rgb, Rgba, Uint, Value, Vec2, Vec3, Vec4},
  state::Ctx,
  types::Type,
};
use std::fmt;

/// Prefix of the identifiers of values passed from the vertex to the fragment stage.
pub const VARYING_PREFIX: &str = "frag_";

/// Prefixes of generated identifiers.
const RESERVED_PREFIXES: [&str; 4] = ["var_", "uniform_", "lighting_", "gl_"];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Storage {
  /// Vertex input.
  Attribute,
  /// Vertex output.
  VaryingOut,
  /// Fragment input.
  VaryingIn,
}

/// Attribute factories of a stage.
///
/// `input` on a [`Core`](crate::Core) reads vertex attributes on the vertex stage and varyings on the fragment stage;
/// `out` on a [`VertexCore`](crate::VertexCore) writes varyings. Varyings are named `frag_<name>` in both stages, and a
/// fragment input must match a vertex output of the same name and type. Integer inputs and outputs are not
/// interpolated and need a dialect with `flat` qualifiers; boolean ones are always rejected with
/// [`Error::UnsupportedInterface`](crate::Error::UnsupportedInterface). Vertex attributes cannot start with
/// [`VARYING_PREFIX`].
///
/// Asking twice for the same name returns the same identifier and declares it once.
pub struct Attributes<'s> {
  ctx: Ctx<'s>,
  storage: Storage,
}

impl fmt::Debug for Attributes<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Attributes")
      .field("stage", &self.ctx.stage)
      .field("storage", &self.storage)
      .finish()
  }
}

impl<'s> Attributes<'s> {
  pub(crate) fn vertex_input(ctx: Ctx<'s>) -> Self {
    Self {
      ctx,
      storage: Storage::Attribute,
    }
  }

  pub(crate) fn vertex_output(ctx: Ctx<'s>) -> Self {
    Self {
      ctx,
      storage: Storage::VaryingOut,
    }
  }

  pub(crate) fn fragment_input(ctx: Ctx<'s>) -> Self {
    Self {
      ctx,
      storage: Storage::VaryingIn,
    }
  }

  fn declare(&self, name: &str, ty: Type) -> String {
    let reserved = RESERVED_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
      || (self.storage == Storage::Attribute && name.starts_with(VARYING_PREFIX));

    if reserved {
      self.ctx.fail(Error::ReservedName {
        name: name.to_owned(),
      });
    }

    let integer = matches!(ty, Type::Int | Type::Uint);
    let (ident, decl) = match (self.storage, integer) {
      (Storage::Attribute, false) => (name.to_owned(), Decl::Attribute),
      (Storage::Attribute, true) => (name.to_owned(), Decl::IntegerAttribute),
      (Storage::VaryingOut, false) => (format!("{}{}", VARYING_PREFIX, name), Decl::VaryingOut),
      (Storage::VaryingOut, true) => (format!("{}{}", VARYING_PREFIX, name), Decl::FlatVaryingOut),
      (Storage::VaryingIn, false) => (format!("{}{}", VARYING_PREFIX, name), Decl::VaryingIn),
      (Storage::VaryingIn, true) => (format!("{}{}", VARYING_PREFIX, name), Decl::FlatVaryingIn),
    };

    match self.storage {
      Storage::Attribute => (),
      Storage::VaryingOut => self.ctx.write_varying(&ident, ty),
      Storage::VaryingIn => self.ctx.read_varying(&ident, ty),
    }

    // no GLSL version passes booleans between stages
    let supported = ty != Type::Bool && self.ctx.dialect.template(Template::Decl(decl)).is_some();

    if !supported {
      self.ctx.fail(Error::UnsupportedInterface {
        name: ident.clone(),
        ty,
        dialect: self.ctx.dialect.name(),
      });
      return ident;
    }

    let type_name = self.ctx.type_of(ty);

    if self.ctx.claim(&ident, ty) {
      self.ctx.declare(decl, &[ident.as_str(), type_name]);
    }

    ident
  }

  /// Declare an attribute of any storable type.
  pub fn attribute<T>(&self, name: &str) -> T
  where
    T: Value<'s>,
  {
    T::from_raw(Raw::new(self.declare(name, T::TYPE), self.ctx))
  }
}

macro_rules! impl_attribute_factories {
  ($($name:ident => $t:ident),* $(,)?) => {
    impl<'s> Attributes<'s> {
      $(
        #[doc = concat!("Declare a `", stringify!($t), "` attribute.")]
        pub fn $name(&self, name: &str) -> $t<'s> {
          self.attribute(name)
        }
      )*
    }
  };
}

impl_attribute_factories! {
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
