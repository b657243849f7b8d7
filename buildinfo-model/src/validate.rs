//! Validation of parsed model files.

use std::collections::HashSet;

use miette::SourceSpan;

use crate::{
    ModelFile, Result,
    decl::{FieldDecl, RecordDecl},
    error::SourceContext,
};

/// Type names that cannot be used as record names.
const BUILTIN_TYPES: &[&str] = &[
    "string", "int", "float", "bool", "bytes", "any", "list", "map", "tuple", "optional",
];

/// Rust reserved keywords that cannot be used as record names
/// Source: https://doc.rust-lang.org/reference/keywords.html
const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "macro",
    "override", "priv", "try", "typeof", "unsized", "virtual", "yield", "union",
];

/// Validate a parsed model file.
///
/// Records are checked first so that field types can be resolved against
/// the complete set of declared record names.
pub(crate) fn validate_model(model: &ModelFile, ctx: &SourceContext) -> Result<()> {
    let mut records = HashSet::new();
    for record in &model.records {
        validate_record_name(record, ctx)?;
        if !records.insert(record.name.as_str()) {
            return Err(ctx.duplicate_record_error(
                &record.name,
                find_last_name_span(ctx.src(), &record.name),
            ));
        }
    }

    for record in &model.records {
        let mut fields = HashSet::new();
        for field in &record.fields {
            validate_field(record, field, &records, ctx)?;
            if !fields.insert(field.name.as_str()) {
                return Err(ctx.duplicate_field_error(
                    &record.name,
                    &field.name,
                    find_last_name_span(ctx.src(), &field.name),
                ));
            }
        }
    }

    Ok(())
}

fn validate_record_name(record: &RecordDecl, ctx: &SourceContext) -> Result<()> {
    let reason = if RUST_KEYWORDS.contains(&record.name.as_str()) {
        Some("name is a Rust reserved keyword")
    } else if BUILTIN_TYPES.contains(&record.name.as_str()) {
        Some("name is a built-in type")
    } else {
        validate_identifier(&record.name)
    };

    match reason {
        Some(reason) => Err(ctx.invalid_identifier_error(
            &record.name,
            "record",
            reason,
            find_name_span(ctx.src(), &record.name),
        )),
        None => Ok(()),
    }
}

fn validate_field(
    record: &RecordDecl,
    field: &FieldDecl,
    records: &HashSet<&str>,
    ctx: &SourceContext,
) -> Result<()> {
    if let Some(reason) = validate_identifier(&field.name) {
        return Err(ctx.invalid_identifier_error(
            &field.name,
            format!("field in '{}'", record.name),
            reason,
            find_name_span(ctx.src(), &field.name),
        ));
    }

    if let Some(unknown) = field
        .ty
        .named_refs()
        .into_iter()
        .find(|name| !records.contains(name))
    {
        return Err(ctx.unknown_type_error(
            &record.name,
            &field.name,
            unknown,
            find_type_span(ctx.src(), unknown),
        ));
    }

    if let Some(default) = field.default_value()
        && !field.ty.accepts(&default)
    {
        return Err(ctx.validation_error(format!(
            "default value for '{}.{}' is a {}, expected {}",
            record.name,
            field.name,
            default.kind(),
            field.ty
        )));
    }

    Ok(())
}

/// Validate that a name is a valid identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}

/// Find the span of a declared name, e.g. `name = "Agent"`.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    find_quoted(src, "name", name, |s, p| s.find(p))
}

/// Like [`find_name_span`] but for the last declaration, which is the
/// offending one for duplicates.
pub(crate) fn find_last_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    find_quoted(src, "name", name, |s, p| s.rfind(p))
}

/// Find the span of a type name inside a `type = "..."` value.
pub(crate) fn find_type_span(src: &str, ty: &str) -> Option<SourceSpan> {
    let pattern = "type = \"";
    let mut offset = 0;
    while let Some(pos) = src[offset..].find(pattern) {
        let value_start = offset + pos + pattern.len();
        let value_end = src[value_start..]
            .find('"')
            .map_or(src.len(), |end| value_start + end);
        let value = &src[value_start..value_end];
        if let Some(inner) = value.find(ty) {
            return Some(SourceSpan::from((value_start + inner, ty.len())));
        }
        offset = value_end;
    }
    None
}

fn find_quoted(
    src: &str,
    key: &str,
    value: &str,
    search: impl Fn(&str, &str) -> Option<usize>,
) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let pattern = format!("{} = {}{}{}", key, quote, value, quote);
        if let Some(pos) = search(src, pattern.as_str()) {
            let start = pos + key.len() + 4;
            return Some(SourceSpan::from((start, value.len())));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("name").is_none());
        assert!(validate_identifier("requestedBy").is_none());
        assert!(validate_identifier("_private").is_none());
        assert!(validate_identifier("sha256").is_none());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(validate_identifier("").is_some());
        assert!(validate_identifier("1st").is_some());
        assert!(validate_identifier("build-agent").is_some());
        assert!(validate_identifier("with space").is_some());
    }

    #[test]
    fn test_find_name_span() {
        let src = "[[record]]\nname = \"Agent\"\n";
        let span = find_name_span(src, "Agent").unwrap();
        assert_eq!(span.offset(), 19);
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_find_last_name_span() {
        let src = "name = \"a\"\nname = \"a\"\n";
        assert_eq!(find_name_span(src, "a").unwrap().offset(), 8);
        assert_eq!(find_last_name_span(src, "a").unwrap().offset(), 19);
    }

    #[test]
    fn test_find_type_span() {
        let src = "type = \"string\"\ntype = \"list<Missing>?\"\n";
        let span = find_type_span(src, "Missing").unwrap();
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "Missing");
    }
}
