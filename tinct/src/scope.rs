//! Control flow.
//!
//! Blocks are written as they are entered: the opening line first, then whatever the closure emits one level deeper,
//! then the closing brace. Closures do not receive a scope object; they keep using the core they close over.

use crate::{
  dialect::Stmt,
  expr::{Bool, Handle, Int, Raw},
  stage::{Core, FragmentCore},
  state::Ctx,
};

impl<'s> Core<'s> {
  /// Conditional statement (`if`).
  ///
  /// Returns a [`When`] to chain `else if` and `else` branches.
  ///
  /// # Examples
  ///
  /// ```
  /// let program = tinct::glsl110::compile(
  ///   |v| {
  ///     let x = v.var.float(&v.new.float(1.));
  ///
  ///     v.when(&x.more_than(&v.new.float(0.)), || {
  ///       v.set.float(&x, &v.new.float(0.));
  ///     })
  ///     .or(|| v.set.float(&x, &v.new.float(2.)));
  ///   },
  ///   |_| {},
  /// )
  /// .unwrap();
  ///
  /// assert!(program.vertex.contains("if ((var_1 > 0.0000)) {\n\tvar_1 = 0.0000;\n}\nelse {\n\tvar_1 = 2.0000;\n}\n"));
  /// ```
  pub fn when(&self, condition: &Bool<'s>, body: impl FnOnce()) -> When<'s> {
    self.block(Stmt::If, &[condition.value()], body);
    When { ctx: self.ctx }
  }

  /// Complement form of [`Core::when`].
  pub fn unless(&self, condition: &Bool<'s>, body: impl FnOnce()) -> When<'s> {
    self.when(&condition.not(), body)
  }

  /// Counting loop (`for`).
  ///
  /// Declares a fresh `int` index going from `min` (included) to `max` (excluded) and passes it to `body`.
  pub fn range(&self, min: &Int<'s>, max: &Int<'s>, body: impl FnOnce(&Int<'s>)) {
    let name = self.ctx.state.next_variable_name();
    let index = Int::from_raw(Raw::new(name.clone(), self.ctx));

    self.block(Stmt::Range, &[name.as_str(), min.value(), max.value()], || body(&index));
  }

  /// Looping statement (`while`).
  pub fn loop_while(&self, condition: &Bool<'s>, body: impl FnOnce()) {
    self.block(Stmt::While, &[condition.value()], body);
  }

  /// Leave the innermost loop.
  pub fn loop_break(&self) {
    self.ctx.statement(Stmt::Break, &[]);
  }

  /// Go to the next iteration of the innermost loop.
  pub fn loop_continue(&self) {
    self.ctx.statement(Stmt::Continue, &[]);
  }

  fn block(&self, open: Stmt, args: &[&str], body: impl FnOnce()) {
    block(self.ctx, open, args, body);
  }
}

impl FragmentCore<'_> {
  /// Discard the fragment.
  pub fn discard(&self) {
    self.ctx.statement(Stmt::Discard, &[]);
  }
}

fn block(ctx: Ctx<'_>, open: Stmt, args: &[&str], body: impl FnOnce()) {
  ctx.statement(open, args);
  ctx.indent(body);
  ctx.statement(Stmt::End, &[]);
}

/// Conditional combinator.
///
/// Returned by [`Core::when`] and [`Core::unless`]; chains `else if` and `else` branches. A branch must directly
/// follow the previous one, with no statement emitted in between.
#[derive(Debug)]
pub struct When<'s> {
  ctx: Ctx<'s>,
}

impl<'s> When<'s> {
  /// Add a conditional branch (`else if`).
  pub fn or_else(self, condition: &Bool<'s>, body: impl FnOnce()) -> Self {
    block(self.ctx, Stmt::ElseIf, &[condition.value()], body);
    self
  }

  /// Add a final catch-all branch (`else`).
  pub fn or(self, body: impl FnOnce()) {
    block(self.ctx, Stmt::Else, &[], body);
  }
}
