//! Context-expression evaluation collaborator (spec §1, §4.1).
//!
//! Context-expression evaluation is explicitly out of scope for this
//! engine: spec.md §1 treats it as "an external collaborator that, given
//! an expression and a context list, returns a signed integer priority".
//! `ContextResolver` is that seam.

/// Evaluates a context expression against a list of currently-true context
/// facts, producing a signed priority.
///
/// A negative return value means the expression is currently unsatisfied
/// (the resource becomes inactive, per spec §3's priority invariant).
pub trait ContextResolver {
    fn evaluate(&self, expr: &str, context: &[String]) -> i64;
}

/// A trivial resolver that always returns a fixed priority, regardless of
/// expression or context. Useful as a test double and as the default for
/// callers that have no real context engine wired up yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantResolver(pub i64);

impl ContextResolver for ConstantResolver {
    fn evaluate(&self, _expr: &str, _context: &[String]) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_resolver_ignores_inputs() {
        let r = ConstantResolver(5);
        assert_eq!(r.evaluate("anything", &["a".to_string()]), 5);
        assert_eq!(r.evaluate("", &[]), 5);
    }
}
