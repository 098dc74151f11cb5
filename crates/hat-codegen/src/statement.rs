//! Statement emission

use crate::generator::CodeGenerator;
use crate::model::{Action, Condition};
use crate::policy::SlotType;

impl CodeGenerator {
    /// Emit an `if` guard line
    #[must_use]
    pub fn emit_condition(&self, condition: &Condition) -> String {
        let expr = self.emit_slot(condition.expr.as_ref(), SlotType::Boolean);
        format!("if {}\n", expr.code)
    }

    /// Emit one `run` line per action, in declared order
    #[must_use]
    pub fn emit_body(&self, actions: &[Action]) -> String {
        let mut body = String::new();
        for (index, action) in actions.iter().enumerate() {
            let Some(call) = &action.call else {
                tracing::debug!("Skipping action {} with nothing to run", index);
                continue;
            };
            body.push_str("run ");
            body.push_str(&self.emit_expr(call).code);
            body.push('\n');
        }
        body
    }
}
