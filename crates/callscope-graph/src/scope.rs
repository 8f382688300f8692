//! Lexical scope tracking during extraction.
//!
//! The tracker holds the current nesting (class, function, nested function)
//! of one file's traversal. The module name is implicit context rather than
//! a stack entry, so a fresh tracker is empty.

/// Kind of a lexical scope on the tracker's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// A class body. Calls made directly in it have no caller.
    Class,
    /// A function or method body (sync or async).
    Function,
}

#[derive(Debug, Clone)]
struct Scope {
    qualified_name: String,
    kind: ScopeKind,
}

/// Stack of enclosing scopes for one file's traversal.
///
/// Every [`ScopeTracker::enter`] must be paired with a
/// [`ScopeTracker::leave`] once the scope's whole subtree has been visited.
#[derive(Debug, Clone)]
pub struct ScopeTracker {
    module: String,
    /// Local names of the entries in `stack`, kept in step with it.
    path: Vec<String>,
    stack: Vec<Scope>,
}

impl ScopeTracker {
    /// Creates an empty tracker for the given module.
    #[must_use]
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            path: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Computes the qualified name `local_name` would receive in the current
    /// scope, without entering it.
    ///
    /// Empty components (such as an empty module name) are left out.
    #[must_use]
    pub fn qualify(&self, local_name: &str) -> String {
        std::iter::once(self.module.as_str())
            .chain(self.path.iter().map(String::as_str))
            .chain(std::iter::once(local_name))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Pushes a new scope and returns its qualified name.
    pub fn enter(&mut self, local_name: &str, kind: ScopeKind) -> String {
        let qualified_name = self.qualify(local_name);
        self.path.push(local_name.to_owned());
        self.stack.push(Scope {
            qualified_name: qualified_name.clone(),
            kind,
        });
        qualified_name
    }

    /// Pops the innermost scope.
    pub fn leave(&mut self) {
        self.path.pop();
        self.stack.pop();
    }

    /// Returns the qualified name of the innermost scope when it is a
    /// function, which makes it the caller of any call found there.
    ///
    /// Returns `None` at module level and directly inside a class body.
    #[must_use]
    pub fn current_caller(&self) -> Option<&str> {
        self.stack
            .last()
            .filter(|scope| scope.kind == ScopeKind::Function)
            .map(|scope| scope.qualified_name.as_str())
    }

    /// Returns whether the innermost scope is a class body.
    #[must_use]
    pub fn in_class_body(&self) -> bool {
        self.stack
            .last()
            .is_some_and(|scope| scope.kind == ScopeKind::Class)
    }
}
