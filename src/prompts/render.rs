//! Placeholder scanning and substitution.
//!
//! `{name}` is a placeholder; `{{` and `}}` are escapes for literal braces.
//! Names are ASCII letters, digits and `_`. An unclosed `{`, a lone `}` or
//! an invalid name makes the template malformed.

use std::collections::HashMap;

use super::PromptError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'t> {
    Text(&'t str),
    Var(&'t str),
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Split `template` into literal text and placeholder names.
fn scan<'t>(name: &str, template: &'t str) -> Result<Vec<Segment<'t>>, PromptError> {
    let malformed = |offset: usize, reason: &'static str| PromptError::Malformed {
        template: name.to_string(),
        offset,
        reason,
    };

    let bytes = template.as_bytes();
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    // Braces are ASCII, so every index sliced below is a char boundary.
    while i < bytes.len() {
        match bytes[i] {
            b'{' | b'}' if bytes.get(i + 1) == Some(&bytes[i]) => {
                if text_start < i {
                    segments.push(Segment::Text(&template[text_start..i]));
                }
                segments.push(Segment::Text(&template[i..i + 1]));
                i += 2;
                text_start = i;
            }
            b'{' => {
                let close = template[i + 1..]
                    .find(['{', '}'])
                    .map(|p| i + 1 + p)
                    .filter(|&p| bytes[p] == b'}')
                    .ok_or_else(|| malformed(i, "unclosed placeholder"))?;
                let var = &template[i + 1..close];
                if !is_placeholder_name(var) {
                    return Err(malformed(i, "invalid placeholder name"));
                }
                if text_start < i {
                    segments.push(Segment::Text(&template[text_start..i]));
                }
                segments.push(Segment::Var(var));
                i = close + 1;
                text_start = i;
            }
            b'}' => return Err(malformed(i, "unmatched closing brace")),
            _ => i += 1,
        }
    }
    if text_start < bytes.len() {
        segments.push(Segment::Text(&template[text_start..]));
    }
    Ok(segments)
}

/// Distinct placeholder names in order of first occurrence.
pub(crate) fn placeholders<'t>(name: &str, template: &'t str) -> Result<Vec<&'t str>, PromptError> {
    let mut seen = Vec::new();
    for segment in scan(name, template)? {
        if let Segment::Var(var) = segment {
            if !seen.contains(&var) {
                seen.push(var);
            }
        }
    }
    Ok(seen)
}

/// Substitute every placeholder in `template` from `vars`.
///
/// Fails on the first placeholder, in template order, with no binding.
/// Variables the template does not use are ignored.
pub(crate) fn render(name: &str, template: &str, vars: &HashMap<&str, &str>) -> Result<String, PromptError> {
    let segments = scan(name, template)?;
    let mut out = String::with_capacity(template.len());
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Var(var) => {
                let value = vars.get(var).ok_or_else(|| PromptError::MissingPlaceholder {
                    template: name.to_string(),
                    placeholder: var.to_string(),
                })?;
                out.push_str(value);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(pairs: &[(&'a str, &'a str)]) -> HashMap<&'a str, &'a str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn substitutes_and_collapses_escapes() {
        let out = render("t", r#"{{"city": "{city}"}}"#, &vars(&[("city", "Oslo")])).unwrap();
        assert_eq!(out, r#"{"city": "Oslo"}"#);
    }

    #[test]
    fn escaped_braces_are_not_placeholders() {
        let out = render("t", "{{name}}", &HashMap::new()).unwrap();
        assert_eq!(out, "{name}");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let out = render("t", "a{x}b", &vars(&[("x", "{y}")])).unwrap();
        assert_eq!(out, "a{y}b");
    }

    #[test]
    fn first_missing_placeholder_is_reported() {
        let err = render("t", "{a} {b} {c}", &vars(&[("a", "1")])).unwrap_err();
        assert_eq!(
            err,
            PromptError::MissingPlaceholder {
                template: "t".into(),
                placeholder: "b".into()
            }
        );
    }

    #[test]
    fn repeated_placeholder_substituted_everywhere() {
        let out = render("t", "{x}-{x}", &vars(&[("x", "7")])).unwrap();
        assert_eq!(out, "7-7");
    }

    #[test]
    fn non_ascii_text_survives() {
        let out = render("t", "用户输入：{user_input}。", &vars(&[("user_input", "你好")])).unwrap();
        assert_eq!(out, "用户输入：你好。");
    }

    #[test]
    fn malformed_templates() {
        let cases = [
            ("open {name", "unclosed placeholder"),
            ("a } b", "unmatched closing brace"),
            ("{}", "invalid placeholder name"),
            ("{bad name}", "invalid placeholder name"),
            ("{a{b}", "unclosed placeholder"),
        ];
        for (template, expected) in cases {
            match scan("t", template) {
                Err(PromptError::Malformed { reason, .. }) => assert_eq!(reason, expected, "{template}"),
                other => panic!("expected malformed for {template:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn placeholders_are_distinct_and_ordered() {
        let names = placeholders("t", "{b} {a} {b} {{c}}").unwrap();
        assert_eq!(names, vec!["b", "a"]);
    }
}
