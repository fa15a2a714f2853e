//! Textual rendering helpers for declaration source.
//!
//! Types are rendered from their declared source text with whitespace
//! collapsed, so alias names stay as written instead of being expanded.

use swc_ecma_ast::{Expr, Lit, PropName, TsEntityName, TsEnumMemberId, TsLit, TsLitType};

use crate::core::parsers::dts::SourceText;

/// Collapse whitespace runs outside string literals and drop a trailing `;`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut space = false;

    for c in text.trim().chars() {
        if let Some(q) = quote {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        if c.is_whitespace() {
            space = true;
            continue;
        }
        if space {
            out.push(' ');
            space = false;
        }
        if matches!(c, '\'' | '"' | '`') {
            quote = Some(c);
        }
        out.push(c);
    }

    out.trim_end_matches(';').trim_end().to_string()
}

/// Strip leading declaration keywords from a rendered signature.
pub fn strip_declaration_keywords(text: &str) -> &str {
    let mut text = text.trim_start();
    loop {
        let stripped = ["export ", "declare ", "default "]
            .iter()
            .find_map(|keyword| text.strip_prefix(keyword));
        match stripped {
            Some(rest) => text = rest.trim_start(),
            None => return text,
        }
    }
}

/// Render a literal type the way the compiler prints it: strings double-quoted.
pub fn literal_text(lit: &TsLitType, source: &SourceText) -> Option<String> {
    if let TsLit::Str(s) = &lit.lit
        && let Some(value) = s.value.as_str()
    {
        return serde_json::to_string(value).ok();
    }
    source.slice(lit.span).map(normalize)
}

/// Widened type of a literal initializer (`1` → `number`).
pub fn inferred_type(init: &Expr) -> &'static str {
    match init {
        Expr::Lit(Lit::Num(_)) => "number",
        Expr::Lit(Lit::Str(_)) | Expr::Tpl(_) => "string",
        Expr::Lit(Lit::Bool(_)) => "boolean",
        Expr::Lit(Lit::BigInt(_)) => "bigint",
        _ => "any",
    }
}

/// Name of a member keyed by an expression (interface members).
pub fn key_name(key: &Expr, computed: bool, source: &SourceText) -> Option<String> {
    use swc_common::Spanned;

    if computed {
        return source.slice(key.span()).map(|s| format!("[{}]", normalize(s)));
    }
    match key {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(str::to_string),
        Expr::Lit(Lit::Num(n)) => Some(number_text(n)),
        _ => source.slice(key.span()).map(normalize),
    }
}

/// Name of a class member.
pub fn prop_name(key: &PropName, source: &SourceText) -> Option<String> {
    use swc_common::Spanned;

    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(str::to_string),
        PropName::Num(n) => Some(number_text(n)),
        PropName::Computed(computed) => source
            .slice(computed.expr.span())
            .map(|s| format!("[{}]", normalize(s))),
        _ => source.slice(key.span()).map(normalize),
    }
}

pub fn enum_member_name(id: &TsEnumMemberId) -> String {
    match id {
        TsEnumMemberId::Ident(ident) => ident.sym.to_string(),
        TsEnumMemberId::Str(s) => s.value.as_str().unwrap_or_default().to_string(),
        #[allow(unreachable_patterns)]
        _ => String::new(),
    }
}

pub fn number_text(n: &swc_ecma_ast::Number) -> String {
    match &n.raw {
        Some(raw) => raw.to_string(),
        None => format_number(n.value),
    }
}

/// Integers print without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// The identifier of an unqualified type name (`Foo`, not `ns.Foo`).
pub fn entity_ident(name: &TsEntityName) -> Option<&str> {
    match name {
        TsEntityName::Ident(ident) => Some(ident.sym.as_str()),
        _ => None,
    }
}

/// The identifier of an `extends` clause target.
pub fn base_ident(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.as_str()),
        _ => None,
    }
}
