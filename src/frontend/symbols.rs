//! Symbol table and scope management for Typed Lua
//!
//! Globals live in one flat map for the whole run. Locals, labels, and pending gotos live in numbered scopes. Scope
//! ids grow strictly and are never reused; leaving a scope only moves `current` back to its parent, so the records
//! stay available to the goto resolver after the traversal.

use std::collections::HashMap;

use typedlua_core::Type;
use typedlua_syntax::ast::Span;

/// Index of a scope; scope 0 is the main chunk.
pub type ScopeId = usize;

/// A variable known to the checker.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub ty: Type,
    pub span: Span,
}

/// A `goto` recorded during traversal and validated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingGoto {
    pub name: String,
    pub span: Span,
}

/// A lexical scope's records.
#[derive(Debug, Default)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub locals: HashMap<String, Binding>,
    /// Label name to declaration span.
    pub labels: HashMap<String, Span>,
    pub gotos: Vec<PendingGoto>,
}

impl Scope {
    pub fn new(parent: Option<ScopeId>) -> Self {
        Self {
            parent,
            ..Self::default()
        }
    }
}

/// Symbol table for one checking run
#[derive(Debug)]
pub struct SymbolTable {
    globals: HashMap<String, Binding>,
    scopes: Vec<Scope>,
    current_scope: ScopeId,
    loop_depth: usize,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Create a table holding only scope 0 and no globals.
    pub fn new() -> Self {
        Self {
            globals: HashMap::new(),
            scopes: vec![Scope::new(None)],
            current_scope: 0,
            loop_depth: 0,
        }
    }

    // ---- scopes ----

    /// Enter a new scope nested in the current one.
    pub fn begin_scope(&mut self) -> ScopeId {
        self.scopes.push(Scope::new(Some(self.current_scope)));
        self.current_scope = self.scopes.len() - 1;
        self.current_scope
    }

    /// Return to the enclosing scope. The left scope's records are kept.
    pub fn end_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current_scope].parent {
            self.current_scope = parent;
        }
    }

    pub fn current_scope(&self) -> ScopeId {
        self.current_scope
    }

    /// Highest scope id allocated so far.
    pub fn max_scope(&self) -> ScopeId {
        self.scopes.len() - 1
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id)
    }

    // ---- loops ----

    pub fn begin_loop(&mut self) {
        self.loop_depth += 1;
    }

    pub fn end_loop(&mut self) {
        self.loop_depth = self.loop_depth.saturating_sub(1);
    }

    pub fn inside_loop(&self) -> bool {
        self.loop_depth > 0
    }

    /// Start a function body: loops outside the function do not enclose its `break`s.
    ///
    /// Returns the depth to hand back to [`SymbolTable::leave_function`].
    pub fn enter_function(&mut self) -> usize {
        std::mem::take(&mut self.loop_depth)
    }

    pub fn leave_function(&mut self, saved_loop_depth: usize) {
        self.loop_depth = saved_loop_depth;
    }

    // ---- variables ----

    /// Declare a local in the current scope, shadowing any earlier binding of the name.
    pub fn define_local(&mut self, binding: Binding) {
        self.scopes[self.current_scope]
            .locals
            .insert(binding.name.clone(), binding);
    }

    /// Look up a local from the current scope outwards.
    pub fn lookup_local(&self, name: &str) -> Option<&Binding> {
        let id = self.local_scope_of(name)?;
        self.scopes[id].locals.get(name)
    }

    fn local_scope_of(&self, name: &str) -> Option<ScopeId> {
        let mut scope_idx = self.current_scope;
        loop {
            if self.scopes[scope_idx].locals.contains_key(name) {
                return Some(scope_idx);
            }
            scope_idx = self.scopes[scope_idx].parent?;
        }
    }

    pub fn define_global(&mut self, binding: Binding) {
        self.globals.insert(binding.name.clone(), binding);
    }

    pub fn lookup_global(&self, name: &str) -> Option<&Binding> {
        self.globals.get(name)
    }

    /// Resolve a name: innermost local first, then the globals.
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.lookup_local(name).or_else(|| self.lookup_global(name))
    }

    // ---- labels and gotos ----

    /// Record a label in the current scope.
    ///
    /// ## Errors
    /// Returns the span of the earlier declaration if the current scope already has a label of this name.
    pub fn declare_label(&mut self, name: &str, span: Span) -> Result<(), Span> {
        let labels = &mut self.scopes[self.current_scope].labels;
        if let Some(&previous) = labels.get(name) {
            return Err(previous);
        }
        labels.insert(name.to_string(), span);
        Ok(())
    }

    /// Record an unresolved `goto` in the current scope.
    pub fn add_goto(&mut self, name: &str, span: Span) {
        self.scopes[self.current_scope].gotos.push(PendingGoto {
            name: name.to_string(),
            span,
        });
    }
}
