//! Data model for visual automation programs
//!
//! Every input the editor can leave unconnected is an `Option`; an explicitly
//! empty string constant is a value, not an absence.

use crate::policy::SlotType;
use hat_devices::DeviceHandle;
use serde::{Deserialize, Serialize};

/// A complete automation rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Automation {
    /// Id of the editor block that owns this automation
    #[serde(default)]
    pub id: Option<String>,
    /// Human-readable name, emitted as the automation's title
    pub name: String,
    /// What initiates the automation
    #[serde(default)]
    pub trigger: Option<Trigger>,
    /// Optional user condition that must hold for the actions to run
    #[serde(default)]
    pub condition: Option<Expr>,
    /// Guard statements placed among the actions; each becomes its own `if`
    /// line ahead of the body
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Actions to run, in order
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Automation {
    pub fn new(name: impl Into<String>, trigger: Option<Trigger>) -> Self {
        Self {
            id: None,
            name: name.into(),
            trigger,
            condition: None,
            conditions: Vec::new(),
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: Expr) -> Self {
        self.condition = Some(condition);
        self
    }

    #[must_use]
    pub fn with_guard(mut self, guard: Condition) -> Self {
        self.conditions.push(guard);
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}

/// Trigger types that can initiate an automation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    /// Any occurrence of a runtime event
    Event { event: String },
    /// A runtime event, only when emitted by a specific device
    DeviceEvent { event: String, device: DeviceHandle },
    /// A time of day, written as the editor validated it (e.g. "08:30")
    Time { time: String },
}

impl Trigger {
    pub fn event(event: impl Into<String>) -> Self {
        Self::Event {
            event: event.into(),
        }
    }

    pub fn device_event(event: impl Into<String>, device: DeviceHandle) -> Self {
        Self::DeviceEvent {
            event: event.into(),
            device,
        }
    }

    pub fn time(time: impl Into<String>) -> Self {
        Self::Time { time: time.into() }
    }
}

/// A statement that runs a call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(default)]
    pub call: Option<Expr>,
}

impl Action {
    pub fn run(call: Expr) -> Self {
        Self { call: Some(call) }
    }
}

/// A guard statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub expr: Option<Expr>,
}

impl Condition {
    pub fn new(expr: Option<Expr>) -> Self {
        Self { expr }
    }
}

/// Value-producing nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expr {
    Constant { value: Constant },
    Device { handle: DeviceHandle },
    Event { name: String },
    Call(FunctionCall),
    Binary(BinaryOp),
    Not {
        #[serde(default)]
        operand: Option<Box<Expr>>,
    },
}

impl Expr {
    pub fn string(value: impl Into<String>) -> Self {
        Self::Constant {
            value: Constant::String(value.into()),
        }
    }

    pub fn number(value: f64) -> Self {
        Self::Constant {
            value: Constant::Number(value),
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self::Constant {
            value: Constant::Boolean(value),
        }
    }

    pub fn null() -> Self {
        Self::Constant {
            value: Constant::Null,
        }
    }

    pub fn device(handle: DeviceHandle) -> Self {
        Self::Device { handle }
    }

    pub fn event(name: impl Into<String>) -> Self {
        Self::Event { name: name.into() }
    }

    pub fn call(function: Function, args: Vec<Option<Expr>>) -> Self {
        Self::Call(FunctionCall { function, args })
    }

    pub fn binary(op: BinaryOperator, left: Option<Expr>, right: Option<Expr>) -> Self {
        Self::Binary(BinaryOp {
            op,
            left: left.map(Box::new),
            right: right.map(Box::new),
        })
    }

    pub fn not(operand: Option<Expr>) -> Self {
        Self::Not {
            operand: operand.map(Box::new),
        }
    }
}

/// Literal values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Constant {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

/// A call to one of the runtime's built-in functions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub function: Function,
    /// Positional arguments; `None` marks an unconnected slot
    #[serde(default)]
    pub args: Vec<Option<Expr>>,
}

/// Built-in runtime functions available to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Function {
    GetDevice,
    GetIntegration,
    EventDate,
    EventTime,
    Time,
    TurnOnDevice,
    TurnOffDevice,
    DeviceStatus,
    SetDeviceTemperature,
    ToggleDevice,
    IsDeviceOn,
    IsDeviceOff,
    GetDeviceState,
    Number,
    Echo,
}

impl Function {
    /// Name of the function in generated code
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::GetDevice => "get_device",
            Self::GetIntegration => "get_integration",
            Self::EventDate => "event_date",
            Self::EventTime => "event_time",
            Self::Time => "time",
            Self::TurnOnDevice => "turn_on_device",
            Self::TurnOffDevice => "turn_off_device",
            Self::DeviceStatus => "device_status",
            Self::SetDeviceTemperature => "set_device_temperature",
            Self::ToggleDevice => "toggle_device",
            Self::IsDeviceOn => "is_device_on",
            Self::IsDeviceOff => "is_device_off",
            Self::GetDeviceState => "get_device_state",
            Self::Number => "number",
            Self::Echo => "echo",
        }
    }

    /// Declared argument slots, used to pick defaults for unconnected inputs
    #[must_use]
    pub fn slots(self) -> &'static [SlotType] {
        match self {
            Self::GetDevice | Self::GetIntegration | Self::EventDate | Self::EventTime => &[],
            Self::Time
            | Self::TurnOnDevice
            | Self::TurnOffDevice
            | Self::DeviceStatus
            | Self::ToggleDevice
            | Self::IsDeviceOn
            | Self::IsDeviceOff
            | Self::GetDeviceState => &[SlotType::String],
            Self::SetDeviceTemperature => &[SlotType::String, SlotType::Number],
            Self::Number | Self::Echo => &[SlotType::Any],
        }
    }
}

/// Binary operation over two optional operands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryOp {
    pub op: BinaryOperator,
    #[serde(default)]
    pub left: Option<Box<Expr>>,
    #[serde(default)]
    pub right: Option<Box<Expr>>,
}

/// Operator classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Arithmetic,
    Comparison,
    Logical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Greater,
    Lesser,
    Equals,
    And,
    Or,
}

impl BinaryOperator {
    #[must_use]
    pub fn kind(self) -> OperatorKind {
        match self {
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide => OperatorKind::Arithmetic,
            Self::Greater | Self::Lesser | Self::Equals => OperatorKind::Comparison,
            Self::And | Self::Or => OperatorKind::Logical,
        }
    }

    /// Operator token in generated code
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Greater => ">",
            Self::Lesser => "<",
            Self::Equals => "==",
            Self::And => "and",
            Self::Or => "or",
        }
    }
}
