//! Stored-procedure invocations handed to the database as opaque
//! capabilities.

use zeroize::Zeroizing;

/// Positional argument bound to a procedure parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcedureArg {
    /// Plain text value.
    Text(String),
    /// Sensitive text wiped from memory once the call is dropped.
    Secret(Zeroizing<String>),
    /// Decimal value bound as a double.
    Decimal(f64),
}

/// A named procedure and its positional arguments.
///
/// # Examples
/// ```
/// use user_gateway::domain::{ProcedureArg, ProcedureCall};
///
/// let call = ProcedureCall::new("UpdateBalance")
///     .arg(ProcedureArg::Text("alice".into()))
///     .arg(ProcedureArg::Decimal(50.0));
/// assert_eq!(call.placeholder_sql(), "CALL UpdateBalance(?, ?)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureCall {
    name: &'static str,
    args: Vec<ProcedureArg>,
}

impl ProcedureCall {
    /// Start a call to `name` with no arguments.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            args: Vec::new(),
        }
    }

    /// Append the next positional argument.
    #[must_use]
    pub fn arg(mut self, arg: ProcedureArg) -> Self {
        self.args.push(arg);
        self
    }

    /// Procedure name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Arguments in positional order.
    #[must_use]
    pub fn args(&self) -> &[ProcedureArg] {
        &self.args
    }

    /// `CALL` statement with one `?` placeholder per argument.
    #[must_use]
    pub fn placeholder_sql(&self) -> String {
        let placeholders = vec!["?"; self.args.len()].join(", ");
        format!("CALL {}({placeholders})", self.name)
    }
}
