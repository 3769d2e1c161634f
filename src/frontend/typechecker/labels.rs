//! Deferred goto validation.
//!
//! Labels may follow the gotos that use them, so gotos are only recorded during the walk. Once the whole chunk has
//! been checked, each pending goto recorded in scope `n` is matched against the labels of scopes `n, n-1, ..., 0`.
//! The scan goes by scope id, not by lexical ancestry, so a label in an earlier sibling block also counts as visible.

use crate::frontend::diagnostics::errors;
use crate::frontend::symbols::PendingGoto;

use super::TypeChecker;

impl TypeChecker<'_> {
    /// Report every goto with no visible label, scanning scopes from the highest id down.
    #[tracing::instrument(skip_all, fields(max_scope = self.symbols.max_scope()))]
    pub(crate) fn resolve_gotos(&mut self) {
        let mut pending = 0usize;
        let mut unresolved: Vec<PendingGoto> = Vec::new();

        for id in (0..=self.symbols.max_scope()).rev() {
            let Some(scope) = self.symbols.scope(id) else {
                continue;
            };
            for goto in &scope.gotos {
                pending += 1;
                if !self.label_visible_from(id, &goto.name) {
                    unresolved.push(goto.clone());
                }
            }
        }

        tracing::debug!(pending, unresolved = unresolved.len(), "resolved gotos");

        for goto in unresolved {
            let line = self.line_of(goto.span);
            self.diagnostics
                .push(errors::unresolved_goto(&goto.name, line, goto.span));
        }
    }

    fn label_visible_from(&self, scope_id: usize, name: &str) -> bool {
        (0..=scope_id)
            .rev()
            .filter_map(|id| self.symbols.scope(id))
            .any(|scope| scope.labels.contains_key(name))
    }
}
