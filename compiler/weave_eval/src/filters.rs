//! Built-in filters for `{{ value | filter(args) }}`.

use weave_ir::Value;

use crate::error::RenderError;
use crate::eval::Resolved;

/// Apply filter `name` to `input`.
///
/// Undefined input passes through every filter except `default`.
pub(crate) fn apply(name: &str, input: Resolved, args: &[Value]) -> Result<Resolved, RenderError> {
    let filter = Filter::from_name(name).ok_or_else(|| RenderError::UnknownFilter {
        name: name.to_owned(),
    })?;
    filter.check_arity(args.len())?;

    let value = match (filter, input) {
        (Filter::Default, Resolved::Undefined { .. }) => {
            return Ok(Resolved::Value(args[0].clone()));
        }
        (_, undefined @ Resolved::Undefined { .. }) => return Ok(undefined),
        (_, Resolved::Value(value)) => value,
    };

    let out = match filter {
        Filter::Default => value,
        Filter::Upper => Value::from(value.to_string().to_uppercase()),
        Filter::Lower => Value::from(value.to_string().to_lowercase()),
        Filter::Title => Value::from(title_case(&value.to_string())),
        Filter::Capitalize => Value::from(capitalize(&value.to_string())),
        Filter::Trim => Value::string(value.to_string().trim()),
        Filter::Length => {
            let len = value.len().ok_or_else(|| filter.type_error(&value))?;
            Value::Int(i64::try_from(len).unwrap_or(i64::MAX))
        }
        Filter::Join => {
            let items = value.as_list().ok_or_else(|| filter.type_error(&value))?;
            let sep = args.first().map(ToString::to_string).unwrap_or_default();
            let joined: Vec<String> = items.iter().map(ToString::to_string).collect();
            Value::from(joined.join(&sep))
        }
        Filter::First | Filter::Last => {
            let items = value.as_list().ok_or_else(|| filter.type_error(&value))?;
            let picked = if filter == Filter::First {
                items.first()
            } else {
                items.last()
            };
            return Ok(picked.cloned().map_or_else(
                || Resolved::Undefined {
                    path: format!("{value} | {}", filter.name()),
                },
                Resolved::Value,
            ));
        }
    };
    Ok(Resolved::Value(out))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Filter {
    Default,
    Upper,
    Lower,
    Title,
    Capitalize,
    Trim,
    Length,
    Join,
    First,
    Last,
}

impl Filter {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "default" | "d" => Filter::Default,
            "upper" => Filter::Upper,
            "lower" => Filter::Lower,
            "title" => Filter::Title,
            "capitalize" => Filter::Capitalize,
            "trim" => Filter::Trim,
            "length" | "count" => Filter::Length,
            "join" => Filter::Join,
            "first" => Filter::First,
            "last" => Filter::Last,
            _ => return None,
        })
    }

    fn name(self) -> &'static str {
        match self {
            Filter::Default => "default",
            Filter::Upper => "upper",
            Filter::Lower => "lower",
            Filter::Title => "title",
            Filter::Capitalize => "capitalize",
            Filter::Trim => "trim",
            Filter::Length => "length",
            Filter::Join => "join",
            Filter::First => "first",
            Filter::Last => "last",
        }
    }

    /// Accepted argument counts, inclusive.
    fn arity(self) -> (usize, usize) {
        match self {
            Filter::Default => (1, 1),
            Filter::Join => (0, 1),
            _ => (0, 0),
        }
    }

    fn check_arity(self, got: usize) -> Result<(), RenderError> {
        let (min, max) = self.arity();
        if (min..=max).contains(&got) {
            Ok(())
        } else {
            Err(RenderError::FilterArity {
                filter: self.name().to_owned(),
                expected: max,
                got,
            })
        }
    }

    fn type_error(self, value: &Value) -> RenderError {
        RenderError::FilterType {
            filter: self.name().to_owned(),
            type_name: value.type_name(),
        }
    }
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(name: &str, input: Value, args: &[Value]) -> Value {
        apply(name, Resolved::Value(input), args)
            .unwrap()
            .into_value()
            .unwrap()
    }

    #[test]
    fn test_case_filters() {
        assert_eq!(run("upper", Value::string("abc"), &[]), Value::string("ABC"));
        assert_eq!(run("lower", Value::string("AbC"), &[]), Value::string("abc"));
        assert_eq!(
            run("title", Value::string("hello big-world"), &[]),
            Value::string("Hello Big-World")
        );
        assert_eq!(
            run("capitalize", Value::string("hELLO"), &[]),
            Value::string("Hello")
        );
        assert_eq!(run("trim", Value::string("  x "), &[]), Value::string("x"));
    }

    #[test]
    fn test_length_and_join() {
        let list = Value::list([Value::string("a"), Value::Int(1)]);
        assert_eq!(run("length", list.clone(), &[]), Value::Int(2));
        assert_eq!(
            run("join", list.clone(), &[Value::string("-")]),
            Value::string("a-1")
        );
        assert_eq!(run("join", list, &[]), Value::string("a1"));
    }

    #[test]
    fn test_first_last() {
        let list = Value::list([Value::Int(1), Value::Int(2)]);
        assert_eq!(run("first", list.clone(), &[]), Value::Int(1));
        assert_eq!(run("last", list, &[]), Value::Int(2));

        let empty = apply("first", Resolved::Value(Value::list([])), &[]).unwrap();
        assert!(empty.is_undefined());
    }

    #[test]
    fn test_default_replaces_only_undefined() {
        let undefined = Resolved::Undefined { path: "x".into() };
        let out = apply("default", undefined, &[Value::string("fallback")]).unwrap();
        assert_eq!(out, Resolved::Value(Value::string("fallback")));

        assert_eq!(
            run("default", Value::string(""), &[Value::string("fallback")]),
            Value::string("")
        );
    }

    #[test]
    fn test_undefined_passes_through() {
        let undefined = Resolved::Undefined { path: "x".into() };
        assert!(apply("upper", undefined, &[]).unwrap().is_undefined());
    }

    #[test]
    fn test_errors() {
        let err = apply("shout", Resolved::Value(Value::None), &[]).unwrap_err();
        assert_eq!(err, RenderError::UnknownFilter { name: "shout".into() });

        let err = apply("length", Resolved::Value(Value::Int(3)), &[]).unwrap_err();
        assert_eq!(
            err,
            RenderError::FilterType {
                filter: "length".into(),
                type_name: "int"
            }
        );

        let err = apply("default", Resolved::Value(Value::None), &[]).unwrap_err();
        assert_eq!(
            err,
            RenderError::FilterArity {
                filter: "default".into(),
                expected: 1,
                got: 0
            }
        );
    }
}
