//! Readable rendering of type and method descriptors
//!
//! Formatting is deterministic, side-effect-free and total: every
//! representable descriptor formats to some string, falling back to the
//! best available partial rendering for degenerate inputs.

use itertools::Itertools;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use tracelens_core::{MethodDescriptor, Parameter, PassMode, TypeDescriptor};

/// Primitive types rendered as their language-keyword aliases
static KEYWORD_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("System.Void", "void"),
        ("System.Boolean", "bool"),
        ("System.Byte", "byte"),
        ("System.SByte", "sbyte"),
        ("System.Char", "char"),
        ("System.Int16", "short"),
        ("System.UInt16", "ushort"),
        ("System.Int32", "int"),
        ("System.UInt32", "uint"),
        ("System.Int64", "long"),
        ("System.UInt64", "ulong"),
        ("System.Single", "float"),
        ("System.Double", "double"),
        ("System.Decimal", "decimal"),
        ("System.String", "string"),
        ("System.Object", "object"),
    ])
});

/// Render a type descriptor as a readable type name
pub fn format_type(ty: &TypeDescriptor) -> String {
    // By-ref types format as their referent; the out/ref prefix is a
    // property of the parameter, not of the type.
    if ty.is_by_ref {
        if let Some(referent) = &ty.element_type {
            return format_type(referent);
        }
    }

    if let Some(keyword) = keyword_alias(ty) {
        return keyword.to_string();
    }

    if ty.is_nullable_wrapper {
        if let Some(inner) = ty.generic_args.first() {
            return format!("{}?", format_type(inner));
        }
    }

    if ty.is_value_tuple {
        return format!("({})", ty.generic_args.iter().map(format_type).join(", "));
    }

    if ty.is_array {
        if let Some(element) = &ty.element_type {
            let commas = ",".repeat(ty.array_rank.saturating_sub(1) as usize);
            return format!("{}[{}]", format_type(element), commas);
        }
    }

    let mut out = String::new();
    // Nested types qualify through their lexical owners, which takes
    // priority over the namespace prefix.
    if let Some(owner) = &ty.declaring_type {
        out.push_str(&format_type(owner));
        out.push('.');
    } else if !ty.namespace.is_empty() {
        out.push_str(&ty.namespace);
        out.push('.');
    }
    out.push_str(strip_arity_suffix(&ty.simple_name));

    if !ty.generic_args.is_empty() {
        out.push('<');
        out.push_str(&ty.generic_args.iter().map(format_type).join(", "));
        out.push('>');
    }

    out
}

/// Render a method descriptor as a readable signature
pub fn format_method(method: &MethodDescriptor) -> String {
    let mut out = String::new();

    if let Some(owner) = &method.declaring_type {
        out.push_str(&format_type(owner));
        out.push('.');
    }
    out.push_str(&pretty_name(&method.name));

    if method.is_generic && !method.generic_args.is_empty() {
        out.push('<');
        out.push_str(&method.generic_args.iter().map(format_type).join(", "));
        out.push('>');
    }

    out.push('(');
    out.push_str(&method.parameters.iter().map(format_parameter).join(", "));
    out.push(')');

    out
}

/// Marker inside a mangled member name identifying a closure/lambda body
const LAMBDA_MARKER: &str = "b__";

/// Rewrite compiler-mangled member names of the form `<Owner>suffix`
///
/// Lambda bodies render as `Owner::lambda`; other generated helpers (local
/// functions, iterator helpers) render as the bare owner name. Anything
/// that does not follow the mangling convention passes through unchanged.
pub fn pretty_name(name: &str) -> String {
    if let Some(rest) = name.strip_prefix('<') {
        if let Some((owner, suffix)) = rest.split_once('>') {
            if !owner.is_empty() {
                if suffix.contains(LAMBDA_MARKER) {
                    return format!("{owner}::lambda");
                }
                return owner.to_string();
            }
        }
    }
    name.to_string()
}

fn format_parameter(parameter: &Parameter) -> String {
    let prefix = match parameter.pass_mode {
        PassMode::Value => "",
        PassMode::Ref => "ref ",
        PassMode::Out => "out ",
    };
    let ty = format_type(&parameter.ty);
    if parameter.name.is_empty() {
        format!("{prefix}{ty}")
    } else {
        format!("{prefix}{ty} {}", parameter.name)
    }
}

fn keyword_alias(ty: &TypeDescriptor) -> Option<&'static str> {
    if ty.is_array || ty.is_nested() || !ty.generic_args.is_empty() {
        return None;
    }
    let key = format!("{}.{}", ty.namespace, ty.simple_name);
    KEYWORD_ALIASES.get(key.as_str()).copied()
}

fn strip_arity_suffix(name: &str) -> &str {
    name.split('`').next().unwrap_or(name)
}
