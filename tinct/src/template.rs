//! Positional templates and literal rendering.
//!
//! A template is a piece of target source with placeholders. `{}` takes the next argument, `{N}` takes argument `N`
//! (argument `0` being the receiver of an operation) and `{{` / `}}` are literal braces. A template must reference
//! every argument it is given and nothing else.

use std::collections::BTreeSet;

/// Reasons a template cannot be rendered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TemplateError {
  /// The referenced positions do not match the arguments.
  Arity { expected: usize, found: usize },

  /// The template is not well-formed.
  Malformed(&'static str),
}

/// Substitute `args` into `template`.
pub(crate) fn render(template: &str, args: &[&str]) -> Result<String, TemplateError> {
  let capacity = template.len() + args.iter().map(|arg| arg.len()).sum::<usize>();
  let mut out = String::with_capacity(capacity);
  let mut referenced = BTreeSet::new();
  let mut next = 0;
  let mut chars = template.chars().peekable();

  while let Some(c) = chars.next() {
    match c {
      '{' if chars.peek() == Some(&'{') => {
        chars.next();
        out.push('{');
      }

      '{' => {
        let mut digits = String::new();

        loop {
          match chars.next() {
            Some('}') => break,
            Some(d) if d.is_ascii_digit() => digits.push(d),
            Some(_) => return Err(TemplateError::Malformed("non-numeric position")),
            None => return Err(TemplateError::Malformed("unterminated position")),
          }
        }

        let index = if digits.is_empty() {
          next += 1;
          next - 1
        } else {
          digits
            .parse::<usize>()
            .map_err(|_| TemplateError::Malformed("position out of range"))?
        };

        referenced.insert(index);

        if let Some(arg) = args.get(index) {
          out.push_str(arg);
        }
      }

      '}' if chars.peek() == Some(&'}') => {
        chars.next();
        out.push('}');
      }

      '}' => return Err(TemplateError::Malformed("unmatched `}`")),

      c => out.push(c),
    }
  }

  let highest = referenced.iter().next_back().map_or(0, |i| i + 1);
  if highest > args.len() || referenced.len() != args.len() {
    return Err(TemplateError::Arity {
      expected: args.len(),
      found: highest.max(referenced.len()),
    });
  }

  Ok(out)
}

/// Render a float literal with a fixed number of decimals.
///
/// The literal always has at least one digit on each side of the point, so it reads as a float in every dialect.
/// Non-finite values are rendered as constant divisions.
pub(crate) fn float(x: f32, precision: usize) -> String {
  if x.is_nan() {
    "(0.0 / 0.0)".to_owned()
  } else if x.is_infinite() {
    if x > 0. {
      "(1.0 / 0.0)".to_owned()
    } else {
      "(-1.0 / 0.0)".to_owned()
    }
  } else {
    format!("{:.*}", precision.max(1), x)
  }
}
