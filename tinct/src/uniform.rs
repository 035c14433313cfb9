//! Uniforms and their reflection records.
//!
//! A uniform is bound to a shared cell owned by the caller. Compiling a program returns one [`UniformRecord`] per
//! distinct cell, in declaration order; a driver keeps the records and reads [`Binding::value`] at draw time to upload
//! the current data under [`UniformRecord::name`].

use crate::{
  builtin::{BuiltIn, DRAW_INDEX},
  dialect::Decl,
  error::Error,
  expr::{
    Bool, Float, Handle, Int, Mat2, Mat3, Mat4, Raw, Rgb, Rgba, Texture1D, Texture2D, Texture3D,
    TextureCube, Uint, Vec2, Vec3, Vec4,
  },
  stage::Stage,
  state::Ctx,
  types::Type,
};
use std::{
  cell::Cell,
  fmt,
  rc::Rc,
};

/// Driver-side texture handle, such as a bindless texture handle.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct TextureHandle(pub u64);

macro_rules! bindings {
  ($($(#[$meta:meta])* $t:ident($v:ty)),* $(,)?) => {
    /// Shared cell a uniform reads from.
    ///
    /// Two bindings are the same uniform when they point to the same cell.
    #[derive(Clone, Debug)]
    pub enum Binding {
      $($(#[$meta])* $t(Rc<Cell<$v>>),)*
    }

    /// Current content of a [`Binding`].
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub enum UniformValue {
      $($t($v),)*
    }

    impl Binding {
      /// Semantic type of the uniform.
      pub fn ty(&self) -> Type {
        match self {
          $(Binding::$t(_) => Type::$t,)*
        }
      }

      /// Read the current value of the cell.
      pub fn value(&self) -> UniformValue {
        match self {
          $(Binding::$t(cell) => UniformValue::$t(cell.get()),)*
        }
      }

      fn addr(&self) -> *const () {
        match self {
          $(Binding::$t(cell) => Rc::as_ptr(cell) as *const (),)*
        }
      }
    }
  };
}

bindings! {
  Bool(bool),
  Int(i32),
  Uint(u32),
  Float(f32),
  Vec2([f32; 2]),
  Vec3([f32; 3]),
  Vec4([f32; 4]),
  /// Column-major.
  Mat2([[f32; 2]; 2]),
  /// Column-major.
  Mat3([[f32; 3]; 3]),
  /// Column-major.
  Mat4([[f32; 4]; 4]),
  Rgb([f32; 3]),
  Rgba([f32; 4]),
  Texture1D(TextureHandle),
  Texture2D(TextureHandle),
  Texture3D(TextureHandle),
  TextureCube(TextureHandle),
}

impl Binding {
  /// Whether both bindings share the same cell.
  pub fn ptr_eq(&self, other: &Binding) -> bool {
    self.ty() == other.ty() && self.addr() == other.addr()
  }
}

/// How often a uniform is expected to change.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Frequency {
  /// Constant across the draws of a frame.
  Frame,
  /// Changes with every draw.
  Draw,
}

/// Reflection record of a uniform.
#[derive(Clone, Debug)]
pub struct UniformRecord {
  /// Identifier in the emitted source.
  pub name: String,
  /// Cell the value comes from.
  pub binding: Binding,
  /// Declared change frequency.
  pub frequency: Frequency,
  /// Storage buffer binding point, for per-draw uniforms stored in indexed buffers.
  pub block: Option<u32>,
}

/// Uniform factories of a core.
///
/// `uniform` and `get` on a [`Core`](crate::Core) are both a [`Uniforms`]; the first declares per-frame uniforms, the
/// second per-draw ones. Referencing the same cell twice, from either stage, yields the same identifier; reading it
/// through both fails with [`Error::FrequencyMismatch`].
pub struct Uniforms<'s> {
  ctx: Ctx<'s>,
  frequency: Frequency,
}

impl fmt::Debug for Uniforms<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Uniforms")
      .field("stage", &self.ctx.stage)
      .field("frequency", &self.frequency)
      .finish()
  }
}

impl<'s> Uniforms<'s> {
  pub(crate) fn new(ctx: Ctx<'s>, frequency: Frequency) -> Self {
    Self { ctx, frequency }
  }

  /// Declare the uniform bound to `binding` and return its lexeme.
  fn declare(&self, binding: Binding) -> String {
    let state = self.ctx.state;
    let ty = binding.ty();

    let existing = state
      .uniforms
      .borrow()
      .iter()
      .find(|record| record.binding.ptr_eq(&binding))
      .map(|record| (record.name.clone(), record.block, record.frequency));

    let (name, block) = match existing {
      Some((name, block, first)) => {
        if first != self.frequency {
          self.ctx.fail(Error::FrequencyMismatch {
            name: name.clone(),
            first,
            second: self.frequency,
          });
        }

        (name, block)
      }

      None => {
        let name = state.next_uniform_name();
        let block = (self.frequency == Frequency::Draw && self.ctx.dialect.indexed_draws())
          .then(|| state.next_block());

        tracing::trace!(%name, %ty, frequency = ?self.frequency, ?block, "uniform");

        state.uniforms.borrow_mut().push(UniformRecord {
          name: name.clone(),
          binding,
          frequency: self.frequency,
          block,
        });

        (name, block)
      }
    };

    let type_name = self.ctx.type_of(ty);

    if self.ctx.claim(&name, ty) {
      match block {
        Some(block) => {
          self
            .ctx
            .declare(Decl::PerDraw, &[name.as_str(), type_name, block.to_string().as_str()])
        }
        None => self.ctx.declare(Decl::Uniform, &[name.as_str(), type_name]),
      }
    }

    match block {
      Some(_) => {
        let index = match self.ctx.stage {
          Stage::Vertex => self.ctx.dialect.builtin(BuiltIn::DrawId),
          Stage::Fragment => {
            self.ctx.use_draw_index();
            DRAW_INDEX
          }
        };

        format!("{}[{}]", name, index)
      }

      None => name,
    }
  }

  fn bind<T>(&self, binding: Binding) -> T
  where
    T: Handle<'s>,
  {
    debug_assert_eq!(binding.ty(), T::TYPE);
    T::from_raw(Raw::new(self.declare(binding), self.ctx))
  }
}

macro_rules! impl_uniform_factories {
  ($($name:ident => $t:ident($v:ty)),* $(,)?) => {
    impl<'s> Uniforms<'s> {
      $(
        #[doc = concat!("Declare a `", stringify!($t), "` uniform reading from `cell`.")]
        pub fn $name(&self, cell: &Rc<Cell<$v>>) -> $t<'s> {
          self.bind(Binding::$t(Rc::clone(cell)))
        }
      )*
    }
  };
}

impl_uniform_factories! {
  bool => Bool(bool),
  int => Int(i32),
  uint => Uint(u32),
  float => Float(f32),
  vec2 => Vec2([f32; 2]),
  vec3 => Vec3([f32; 3]),
  vec4 => Vec4([f32; 4]),
  mat2 => Mat2([[f32; 2]; 2]),
  mat3 => Mat3([[f32; 3]; 3]),
  mat4 => Mat4([[f32; 4]; 4]),
  rgb => Rgb([f32; 3]),
  rgba => Rgba([f32; 4]),
  texture1d => Texture1D(TextureHandle),
  texture2d => Texture2D(TextureHandle),
  texture3d => Texture3D(TextureHandle),
  texture_cube => TextureCube(TextureHandle),
}
