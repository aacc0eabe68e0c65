//! The resource model (spec §3, §4.1).

use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

use crate::context::ContextResolver;
use crate::encoding;
use crate::error::ValidationError;
use crate::options::OptionFlags;
use crate::tag::{validate_name, TagList};
use crate::template::Template;

/// The type tag of a resource's value (spec §3).
///
/// `Publish`/`Subscribe` validate identically to `String` but are kept
/// distinct because the spanning-map semantics that select between
/// publish/subscribe resources live above this engine's scope — the type
/// still has to round-trip through status files and `%` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceType {
    String,
    Integer,
    Boolean,
    List,
    Publish,
    Subscribe,
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::List => "list",
            Self::Publish => "publish",
            Self::Subscribe => "subscribe",
        }
    }

    /// One-character spec-form marker, or `None` for the default (String).
    fn from_name(s: &str) -> Result<Self, ValidationError> {
        match s {
            "" | "string" => Ok(Self::String),
            "integer" => Ok(Self::Integer),
            "boolean" => Ok(Self::Boolean),
            "list" => Ok(Self::List),
            "publish" => Ok(Self::Publish),
            "subscribe" => Ok(Self::Subscribe),
            other => Err(ValidationError::InvalidType { name: other.to_string() }),
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonicalise a boolean input per spec §3/§8: `true/yes/on/1` (any case)
/// become `"yes"`; `false/no/off/0`/empty become `""`; anything else fails.
pub fn canonicalize_boolean(s: &str) -> Result<String, ValidationError> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok("yes".to_string()),
        "false" | "no" | "off" | "0" | "" => Ok(String::new()),
        _ => Err(ValidationError::InvalidValue {
            type_name: "boolean",
            value: s.to_string(),
        }),
    }
}

/// `-?[0-9]+`, nothing else.
pub fn validate_integer(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `strtol`-style base-10 parse: leading digits parse, anything unparseable
/// (including an absent value) is treated as zero, per spec §4.1's
/// `same_value` contract.
fn strtol(s: &str) -> i64 {
    s.parse::<i64>().unwrap_or(0)
}

/// Validate `value` against `ty`, returning the canonical form to store
/// (booleans are canonicalised; everything else is passed through).
fn validate_value(ty: ResourceType, value: &str) -> Result<String, ValidationError> {
    match ty {
        ResourceType::Integer => {
            if validate_integer(value) {
                Ok(value.to_string())
            } else {
                Err(ValidationError::InvalidValue { type_name: "integer", value: value.to_string() })
            }
        }
        ResourceType::Boolean => canonicalize_boolean(value),
        ResourceType::List => {
            TagList::from_string(value).map_err(|_| ValidationError::InvalidValue {
                type_name: "list",
                value: value.to_string(),
            })?;
            Ok(value.to_string())
        }
        ResourceType::String | ResourceType::Publish | ResourceType::Subscribe => Ok(value.to_string()),
    }
}

#[derive(Debug, Clone)]
struct ResourceData {
    name: String,
    ty: ResourceType,
    value: Option<String>,
    template: Option<Template>,
    context: Option<String>,
    derivation: Option<String>,
    comment: Option<String>,
    priority: i64,
}

/// A shared handle to a resource.
///
/// Resources are reference-counted (spec §5): cloning a `Resource` shares
/// the same underlying cell rather than copying data, exactly as the spec's
/// "creation sets count to 1; each container that retains a resource
/// increments" describes — `Rc` gives this for free, with deterministic
/// drop at zero instead of manual `acquire`/`relinquish`.
#[derive(Debug, Clone)]
pub struct Resource(Rc<RefCell<ResourceData>>);

impl Resource {
    /// Create a new resource with the given name, empty value, type
    /// `String`, and priority `0`.
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        if !validate_name(name) {
            return Err(ValidationError::InvalidName { name: name.to_string() });
        }
        Ok(Self(Rc::new(RefCell::new(ResourceData {
            name: name.to_string(),
            ty: ResourceType::String,
            value: None,
            template: None,
            context: None,
            derivation: None,
            comment: None,
            priority: 0,
        }))))
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    pub fn value(&self) -> Option<String> {
        self.0.borrow().value.clone()
    }

    pub fn resource_type(&self) -> ResourceType {
        self.0.borrow().ty
    }

    pub fn template(&self) -> Option<Template> {
        self.0.borrow().template.clone()
    }

    pub fn context(&self) -> Option<String> {
        self.0.borrow().context.clone()
    }

    pub fn derivation(&self) -> Option<String> {
        self.0.borrow().derivation.clone()
    }

    pub fn comment(&self) -> Option<String> {
        self.0.borrow().comment.clone()
    }

    pub fn priority(&self) -> i64 {
        self.0.borrow().priority
    }

    /// A resource is active iff its priority is non-negative (spec §3).
    pub fn is_active(&self) -> bool {
        self.priority() >= 0
    }

    pub fn set_name(&self, new: &str) -> Result<(), ValidationError> {
        if !validate_name(new) {
            return Err(ValidationError::InvalidName { name: new.to_string() });
        }
        self.0.borrow_mut().name = new.to_string();
        Ok(())
    }

    pub fn set_value(&self, new: &str) -> Result<(), ValidationError> {
        let ty = self.resource_type();
        let canonical = validate_value(ty, new)?;
        self.0.borrow_mut().value = Some(canonical);
        Ok(())
    }

    pub fn clear_value(&self) {
        self.0.borrow_mut().value = None;
    }

    /// Change the resource's type. Succeeds only if the current value (if
    /// any) validates under `new_type` (spec §3 invariant).
    pub fn set_type(&self, new_type: ResourceType) -> Result<(), ValidationError> {
        let current_value = self.value();
        if let Some(v) = &current_value {
            let canonical = validate_value(new_type, v).map_err(|_| ValidationError::TypeChangeRejected {
                name: self.name(),
                value: v.clone(),
                new_type: new_type.as_str(),
            })?;
            let mut data = self.0.borrow_mut();
            data.ty = new_type;
            data.value = Some(canonical);
        } else {
            self.0.borrow_mut().ty = new_type;
        }
        if new_type != ResourceType::List {
            self.0.borrow_mut().template = None;
        }
        Ok(())
    }

    /// Set the list template. Only meaningful when `resource_type() ==
    /// List`; the caller is responsible for setting the type first.
    pub fn set_template(&self, template: Option<Template>) {
        self.0.borrow_mut().template = template;
    }

    pub fn set_context(&self, new: Option<&str>) -> Result<(), ValidationError> {
        // Context-expression grammar validation is delegated to the
        // external collaborator (spec §1); here we only store the string.
        self.0.borrow_mut().context = new.map(|s| s.to_string());
        Ok(())
    }

    pub fn set_comment(&self, new: Option<&str>) {
        self.0.borrow_mut().comment = new.map(|s| s.to_string());
    }

    pub fn set_priority(&self, new: i64) {
        self.0.borrow_mut().priority = new;
    }

    /// Idempotently append `extra` to the derivation with a single space,
    /// unless `extra` is already a *substring* of the current derivation.
    ///
    /// This substring test (not a token-containment test) is the policy the
    /// original engine implements; see spec §9's open question — re-adding
    /// `file:10` when `file:100` is already present silently succeeds. We
    /// preserve this literally rather than "fixing" it.
    pub fn add_derivation(&self, extra: &str) {
        let mut data = self.0.borrow_mut();
        match &mut data.derivation {
            Some(existing) if existing.contains(extra) => {}
            Some(existing) => {
                existing.push(' ');
                existing.push_str(extra);
            }
            None => data.derivation = Some(extra.to_string()),
        }
    }

    /// Evaluate the context expression (if any) via `resolver` and update
    /// priority. With no context, priority becomes `0`.
    pub fn eval_priority(&self, resolver: &dyn ContextResolver, context_list: &[String]) {
        let expr = self.context();
        let new_priority = match expr {
            Some(e) => resolver.evaluate(&e, context_list),
            None => 0,
        };
        self.set_priority(new_priority);
    }

    /// Three-way comparison by `(name, value, context)` as strings; absent
    /// attributes compare as the empty string. Type/derivation/template/
    /// comment are not compared (spec §4.1).
    pub fn compare(a: &Resource, b: &Resource) -> Ordering {
        let ad = a.0.borrow();
        let bd = b.0.borrow();
        ad.name
            .cmp(&bd.name)
            .then_with(|| ad.value.as_deref().unwrap_or("").cmp(bd.value.as_deref().unwrap_or("")))
            .then_with(|| ad.context.as_deref().unwrap_or("").cmp(bd.context.as_deref().unwrap_or("")))
    }

    pub fn equals(a: &Resource, b: &Resource) -> bool {
        Self::compare(a, b) == Ordering::Equal
    }

    /// Type-aware value equality. Missing values on both sides compare
    /// equal; otherwise comparison is type-directed (boolean canonical
    /// compare, integer numeric compare, else string compare).
    pub fn same_value(a: &Resource, b: &Resource) -> bool {
        let ad = a.0.borrow();
        let bd = b.0.borrow();
        match (&ad.value, &bd.value) {
            (None, None) => true,
            (None, Some(_)) | (Some(_), None) => false,
            (Some(av), Some(bv)) => {
                if ad.ty == bd.ty {
                    match ad.ty {
                        ResourceType::Boolean => {
                            canonicalize_boolean(av).unwrap_or_default() == canonicalize_boolean(bv).unwrap_or_default()
                        }
                        ResourceType::Integer => strtol(av) == strtol(bv),
                        _ => av == bv,
                    }
                } else {
                    av == bv
                }
            }
        }
    }

    /// `typestr = typename ( '(' comment ')' )? ( ': ' templatestr )?`
    /// (spec §6). Missing/empty typename renders as `"string"`.
    pub fn type_string(&self) -> String {
        self.type_string_opts(OptionFlags::empty())
    }

    /// As [`type_string`](Self::type_string), but omits the template
    /// fragment when `options` contains `NOTEMPLATES`.
    pub fn type_string_opts(&self, options: OptionFlags) -> String {
        let data = self.0.borrow();
        let mut s = data.ty.as_str().to_string();
        if let Some(c) = &data.comment {
            s.push('(');
            s.push_str(c);
            s.push(')');
        }
        if data.ty == ResourceType::List && !options.contains(OptionFlags::NOTEMPLATES) {
            if let Some(t) = &data.template {
                if !t.is_empty() {
                    s.push_str(": ");
                    s.push_str(&t.to_string());
                }
            }
        }
        s
    }

    /// Parse the right-hand side of a `%` line and apply it: type (+
    /// optional comment/template for list types).
    pub fn set_attribute_type(&self, type_str: &str) -> Result<(), ValidationError> {
        let (type_part, template_part) = match type_str.split_once(": ") {
            Some((t, rest)) => (t, Some(rest)),
            None => (type_str, None),
        };
        let (name_part, comment) = match type_part.split_once('(') {
            Some((n, rest)) => {
                let c = rest.strip_suffix(')').unwrap_or(rest);
                (n, Some(c.to_string()))
            }
            None => (type_part, None),
        };
        let ty = ResourceType::from_name(name_part.trim())?;
        self.set_type(ty)?;
        self.set_comment(comment.as_deref());
        if ty == ResourceType::List {
            if let Some(t) = template_part {
                let parsed = Template::parse(t)?;
                self.set_template(Some(parsed));
            }
        }
        Ok(())
    }

    /// Apply a parsed status line's right-hand side according to its
    /// leading symbol (spec §4.1, §4.3): `%` type, `#` derivation, `^`
    /// priority, `.` context, default value.
    pub fn set_attribute(&self, symbol: Option<char>, value: &str) -> Result<(), ValidationError> {
        match symbol {
            Some('%') => self.set_attribute_type(value),
            Some('#') => {
                self.0.borrow_mut().derivation = Some(value.to_string());
                Ok(())
            }
            Some('^') => {
                if !validate_integer(value) {
                    return Err(ValidationError::InvalidPriority { value: value.to_string() });
                }
                self.set_priority(value.parse().unwrap_or(0));
                Ok(())
            }
            Some('.') => self.set_context(Some(value)),
            _ => self.set_value(value),
        }
    }

    /// `[sym][prefix.]name[CTX][= value]` (spec §4.1).
    pub fn serialise_spec(&self, prefix: Option<&str>, options: OptionFlags) -> String {
        let data = self.0.borrow();
        let mut out = String::new();
        if let Some(sym) = spec_symbol(data.ty) {
            out.push(sym);
        }
        if let Some(p) = prefix {
            out.push_str(p);
            out.push('.');
        }
        out.push_str(&data.name);
        if !options.contains(OptionFlags::NOCONTEXT) {
            if let Some(c) = &data.context {
                out.push('[');
                out.push_str(c);
                out.push(']');
            }
        }
        if !options.contains(OptionFlags::NOVALUE) {
            if let Some(v) = &data.value {
                out.push_str("= ");
                if options.contains(OptionFlags::ENCODE) {
                    out.push_str(&encoding::encode(v));
                } else {
                    out.push_str(v);
                }
            }
        }
        if options.contains(OptionFlags::NEWLINE) {
            out.push('\n');
        }
        out
    }

    /// Value line, plus (when not a plain `String`, carrying a comment, or
    /// `USE_META` is set) a `%name` type line, plus (when derivation is
    /// non-empty) a `#name` derivation line (spec §4.1, §6).
    pub fn serialise_status(&self, prefix: &str, options: OptionFlags) -> String {
        let (name, value, ty, comment, derivation) = {
            let data = self.0.borrow();
            (
                data.name.clone(),
                data.value.clone(),
                data.ty,
                data.comment.clone(),
                data.derivation.clone(),
            )
        };

        let mut out = String::new();
        out.push_str(prefix);
        out.push_str(&name);
        out.push('=');
        if let Some(v) = &value {
            out.push_str(&encoding::encode(v));
        }
        out.push('\n');

        let needs_type_line =
            options.contains(OptionFlags::USE_META) || ty != ResourceType::String || comment.is_some();
        if needs_type_line {
            out.push('%');
            out.push_str(prefix);
            out.push_str(&name);
            out.push('=');
            out.push_str(&self.type_string_opts(options));
            out.push('\n');
        }

        if let Some(d) = &derivation {
            if !d.is_empty() {
                out.push('#');
                out.push_str(prefix);
                out.push_str(&name);
                out.push('=');
                out.push_str(d);
                out.push('\n');
            }
        }
        out
    }

    /// `export PFXname='value'` with `'` escaped as `'"'"'` (spec §4.4, §6).
    pub fn serialise_export(&self, prefix: &str) -> String {
        let data = self.0.borrow();
        let value = data.value.as_deref().unwrap_or("");
        format!("export {}{}='{}'\n", prefix, data.name, escape_single_quotes(value))
    }

    /// Parse a status-file key: an optional leading symbol, then the
    /// rightmost two `.`-separated segments are resource and component
    /// name; anything further left is the host/namespace (spec §4.1).
    pub fn parse_key(key: &str) -> Result<(Option<char>, Option<String>, Option<String>, String), ValidationError> {
        let (symbol, rest) = match key.chars().next() {
            Some(c @ ('%' | '#' | '^' | '.')) => (Some(c), &key[c.len_utf8()..]),
            _ => (None, key),
        };
        let parts: Vec<&str> = rest.split('.').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(ValidationError::BadKey {
                key: key.to_string(),
                reason: "empty key segment",
            });
        }
        match parts.len() {
            0 => Err(ValidationError::BadKey { key: key.to_string(), reason: "empty key" }),
            1 => Ok((symbol, None, None, parts[0].to_string())),
            2 => Ok((symbol, None, Some(parts[0].to_string()), parts[1].to_string())),
            n => {
                let host = parts[..n - 2].join(".");
                Ok((symbol, Some(host), Some(parts[n - 2].to_string()), parts[n - 1].to_string()))
            }
        }
    }
}

/// The spec-form's optional single-character type marker (spec §4.1, §6):
/// non-`String` resources are marked with `%` so a reader can spot a
/// typed resource without looking up its `%name` metadata line.
fn spec_symbol(ty: ResourceType) -> Option<char> {
    match ty {
        ResourceType::String => None,
        _ => Some('%'),
    }
}

fn escape_single_quotes(value: &str) -> String {
    value.replace('\'', r#"'"'"'"#)
}
