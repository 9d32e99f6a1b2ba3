//! Calculator tool: add, subtract, multiply, divide

use hostagent_domain::{ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult};

use super::LocalTool;

pub const CALCULATOR: &str = "calculator";

const OPERATIONS: [&str; 4] = ["add", "subtract", "multiply", "divide"];

pub struct CalculatorTool;

impl CalculatorTool {
    fn calculate(operation: &str, a: f64, b: f64) -> Result<f64, ToolError> {
        match operation {
            "add" => Ok(a + b),
            "subtract" => Ok(a - b),
            "multiply" => Ok(a * b),
            "divide" if b == 0.0 => Err(ToolError::execution_failed(
                "Division by zero is not allowed.",
            )),
            "divide" => Ok(a / b),
            other => Err(ToolError::invalid_argument(format!(
                "Invalid operation '{}'. Only add, subtract, multiply, and divide are allowed.",
                other
            ))),
        }
    }

    fn number(call: &ToolCall, key: &str) -> Result<f64, ToolError> {
        call.get_number(key).ok_or_else(|| {
            ToolError::invalid_argument(format!("Argument '{}' must be a number", key))
        })
    }
}

impl LocalTool for CalculatorTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(CALCULATOR, "Basic calculator for arithmetic on two numbers")
            .with_parameter(
                ToolParameter::new("operation", "Operation to perform", true)
                    .with_allowed_values(OPERATIONS),
            )
            .with_parameter(ToolParameter::new("a", "First operand", true).with_type("number"))
            .with_parameter(ToolParameter::new("b", "Second operand", true).with_type("number"))
    }

    fn execute(&self, call: &ToolCall) -> ToolResult {
        let outcome = call
            .require_string("operation")
            .map_err(ToolError::invalid_argument)
            .and_then(|op| {
                let a = Self::number(call, "a")?;
                let b = Self::number(call, "b")?;
                Self::calculate(op, a, b)
            });

        match outcome {
            Ok(value) => ToolResult::success(CALCULATOR, format!("Result: {}", value)),
            Err(e) => ToolResult::failure(CALCULATOR, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(operation: &str, a: impl Into<serde_json::Value>, b: impl Into<serde_json::Value>) -> ToolResult {
        let call = ToolCall::new(CALCULATOR)
            .with_arg("operation", operation)
            .with_arg("a", a)
            .with_arg("b", b);
        CalculatorTool.execute(&call)
    }

    #[test]
    fn test_basic_operations() {
        assert_eq!(run("add", 2, 3).text(), "Result: 5");
        assert_eq!(run("subtract", 2, 3).text(), "Result: -1");
        assert_eq!(run("multiply", 6, 7).text(), "Result: 42");
        assert_eq!(run("divide", 7, 2).text(), "Result: 3.5");
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        assert_eq!(run("multiply", "6", "7").text(), "Result: 42");
    }

    #[test]
    fn test_division_by_zero() {
        let result = run("divide", 1, 0);
        assert!(!result.is_success());
        let error = result.error.unwrap();
        assert_eq!(error.code, "EXECUTION_FAILED");
        assert_eq!(error.message, "Division by zero is not allowed.");
    }

    #[test]
    fn test_invalid_operation() {
        let result = run("power", 2, 8);
        assert_eq!(result.error.unwrap().code, "INVALID_ARGUMENT");
    }

    #[test]
    fn test_missing_or_non_numeric_operand() {
        let call = ToolCall::new(CALCULATOR).with_arg("operation", "add").with_arg("a", 1);
        assert!(CalculatorTool.execute(&call).text().contains("'b' must be a number"));

        let result = run("add", "one", 2);
        assert!(result.text().contains("'a' must be a number"));
    }

    #[test]
    fn test_definition_schema() {
        let schema = CalculatorTool.definition().input_schema();
        assert_eq!(schema["properties"]["a"]["type"], "number");
        assert_eq!(schema["properties"]["operation"]["enum"][3], "divide");
        assert_eq!(schema["required"].as_array().unwrap().len(), 3);
    }
}
