//! Route template normalisation
//!
//! Hosts report templates in their own routing syntax. Documents use the
//! plain `{name}` form, so constraints (`{id:int}`), defaults (`{page=1}`),
//! optional markers (`{id?}`) and catch-all stars (`{*path}`) are stripped.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// A normalised route template and the parameter names it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    path: String,
    parameters: Vec<String>,
}

impl RouteTemplate {
    /// Parse and normalise a raw template.
    ///
    /// Returns a human-readable reason when the template is malformed.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("template is empty".to_string());
        }

        let mut path = String::with_capacity(trimmed.len() + 1);
        let mut parameters = Vec::new();
        if !trimmed.starts_with('/') {
            path.push('/');
        }

        let mut chars = trimmed.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                // `{{` and `}}` are literal braces
                '{' if chars.next_if_eq(&'{').is_some() => path.push('{'),
                '}' if chars.next_if_eq(&'}').is_some() => path.push('}'),
                '{' => {
                    let segment = read_parameter(&mut chars)?;
                    let name = parameter_name(&segment);
                    if name.is_empty() {
                        return Err("parameter without a name".to_string());
                    }
                    path.push('{');
                    path.push_str(name);
                    path.push('}');
                    parameters.push(name.to_string());
                }
                '}' => return Err("unmatched `}`".to_string()),
                other => path.push(other),
            }
        }

        while path.len() > 1 && path.ends_with('/') {
            path.pop();
        }

        Ok(Self { path, parameters })
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Parameter names in the order they appear.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.iter().any(|p| p == name)
    }
}

impl fmt::Display for RouteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Read a parameter body up to its closing `}`.
///
/// The name part may not contain braces. After a `:` constraint or `=`
/// default, balanced braces and `{{`/`}}` escapes are allowed, so regex
/// constraints such as `{id:regex(^\d{{3}}$)}` parse.
fn read_parameter(chars: &mut Peekable<Chars<'_>>) -> Result<String, String> {
    let mut segment = String::new();
    let mut in_constraint = false;
    let mut depth = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '{' if !in_constraint => return Err("nested `{` in parameter".to_string()),
            '{' if chars.next_if_eq(&'{').is_some() => segment.push_str("{{"),
            '{' => {
                depth += 1;
                segment.push(c);
            }
            '}' if depth > 0 => {
                depth -= 1;
                segment.push(c);
            }
            '}' if in_constraint && chars.next_if_eq(&'}').is_some() => segment.push_str("}}"),
            '}' => return Ok(segment),
            ':' | '=' => {
                in_constraint = true;
                segment.push(c);
            }
            other => segment.push(other),
        }
    }
    Err("unclosed `{`".to_string())
}

fn parameter_name(segment: &str) -> &str {
    let segment = segment.trim().trim_start_matches('*');
    let end = segment.find([':', '=', '?']).unwrap_or(segment.len());
    segment[..end].trim()
}
