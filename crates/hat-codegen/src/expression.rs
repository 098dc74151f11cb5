//! Expression emission

use crate::generator::{CodeGenerator, Emitted};
use crate::model::{BinaryOp, Constant, Expr, FunctionCall, OperatorKind};
use crate::order::Order;
use crate::policy::{format_number, SlotType};

impl CodeGenerator {
    /// Emit a value-producing node
    #[must_use]
    pub fn emit_expr(&self, expr: &Expr) -> Emitted {
        match expr {
            Expr::Constant { value } => self.emit_constant(value),
            Expr::Device { handle } => Emitted::atomic(self.quote(&handle.to_string())),
            Expr::Event { name } => Emitted::atomic(name.as_str()),
            Expr::Call(call) => self.emit_call(call),
            Expr::Binary(op) => self.emit_binary(op),
            Expr::Not { operand } => {
                let operand = self.emit_slot(operand.as_deref(), SlotType::Boolean);
                Emitted::new(format!("not {}", operand.code), Order::LogicalNot)
            }
        }
    }

    /// Emit the node connected to a slot, or the slot type's default literal
    /// when nothing is connected
    #[must_use]
    pub fn emit_slot(&self, expr: Option<&Expr>, slot: SlotType) -> Emitted {
        match expr {
            Some(expr) => self.emit_expr(expr),
            None => Emitted::atomic(slot.default_literal()),
        }
    }

    fn emit_constant(&self, constant: &Constant) -> Emitted {
        match constant {
            Constant::String(value) => Emitted::atomic(self.quote(value)),
            Constant::Number(value) => Emitted::atomic(format_number(*value)),
            Constant::Boolean(value) => Emitted::atomic(value.to_string()),
            Constant::Null => Emitted::atomic("null"),
        }
    }

    fn emit_call(&self, call: &FunctionCall) -> Emitted {
        let slots = call.function.slots();
        let arity = slots.len().max(call.args.len());

        let args = (0..arity)
            .map(|i| {
                let slot = slots.get(i).copied().unwrap_or(SlotType::Any);
                let arg = call.args.get(i).and_then(Option::as_ref);
                self.emit_slot(arg, slot).code
            })
            .collect::<Vec<_>>()
            .join(", ");

        Emitted::new(
            format!("{}({})", call.function.name(), args),
            Order::FunctionCall,
        )
    }

    fn emit_binary(&self, op: &BinaryOp) -> Emitted {
        let symbol = op.op.symbol();
        match op.op.kind() {
            OperatorKind::Logical => {
                // Both sides are always wrapped, so the result is atomic
                let left = self.emit_slot(op.left.as_deref(), SlotType::Boolean);
                let right = self.emit_slot(op.right.as_deref(), SlotType::Boolean);
                Emitted::atomic(format!("({}) {} ({})", left.code, symbol, right.code))
            }
            OperatorKind::Arithmetic => {
                self.emit_infix(op, SlotType::Number, Order::Arithmetic)
            }
            OperatorKind::Comparison => self.emit_infix(op, SlotType::Any, Order::Relational),
        }
    }

    fn emit_infix(&self, op: &BinaryOp, slot: SlotType, order: Order) -> Emitted {
        let left = self.emit_slot(op.left.as_deref(), slot).within(order);
        let right = self.emit_slot(op.right.as_deref(), slot).within(order);
        Emitted::new(format!("{} {} {}", left, op.op.symbol(), right), order)
    }
}
