//! Arithmetic expression tool.
//!
//! Evaluates `+ - * /`, parentheses, and unary minus over f64. Integral
//! results are reported as JSON integers so `2+2` comes back as `4`, not
//! `4.0`.

use async_trait::async_trait;
use chatbench_core::{Tool, ToolError};
use serde_json::json;

pub struct MathCalcTool;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MathCalcArgs {
    pub expression: String,
}

impl MathCalcTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MathCalcTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for MathCalcTool {
    fn name(&self) -> &str {
        "math_calc"
    }

    fn description(&self) -> &str {
        "Evaluate an arithmetic expression with +, -, *, / and parentheses, e.g. \"(2+3)*4\"."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "expression": {
                    "type": "string",
                    "description": "The arithmetic expression to evaluate"
                }
            },
            "required": ["expression"]
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let args: MathCalcArgs = serde_json::from_value(params)
            .map_err(|error| ToolError::InvalidArguments(error.to_string()))?;

        let value = evaluate(&args.expression)
            .map_err(|error| ToolError::Execution(format!("cannot evaluate expression: {error}")))?;

        if value.fract() == 0.0 && value.is_finite() && value.abs() < i64::MAX as f64 {
            Ok(json!(value as i64))
        } else {
            Ok(json!(value))
        }
    }
}

/// Recursive-descent evaluation over the grammar:
/// expr := term (('+'|'-') term)* ; term := factor (('*'|'/') factor)* ;
/// factor := number | '-' factor | '(' expr ')'
fn evaluate(expression: &str) -> Result<f64, String> {
    let tokens: Vec<char> = expression.chars().filter(|c| !c.is_whitespace()).collect();
    if tokens.is_empty() {
        return Err("empty expression".to_string());
    }

    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr()?;

    if parser.pos != parser.tokens.len() {
        return Err(format!(
            "unexpected character '{}' at position {}",
            parser.tokens[parser.pos], parser.pos
        ));
    }

    Ok(value)
}

struct Parser {
    tokens: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.tokens.get(self.pos).copied()
    }

    fn expr(&mut self) -> Result<f64, String> {
        let mut value = self.term()?;
        while let Some(op @ ('+' | '-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            match op {
                '+' => value += rhs,
                _ => value -= rhs,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, String> {
        let mut value = self.factor()?;
        while let Some(op @ ('*' | '/')) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            match op {
                '*' => value *= rhs,
                _ => {
                    if rhs == 0.0 {
                        return Err("division by zero".to_string());
                    }
                    value /= rhs;
                }
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, String> {
        match self.peek() {
            Some('-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some('(') => {
                self.pos += 1;
                let value = self.expr()?;
                if self.peek() != Some(')') {
                    return Err("missing closing parenthesis".to_string());
                }
                self.pos += 1;
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) => Err(format!("unexpected character '{c}' at position {}", self.pos)),
            None => Err("unexpected end of expression".to_string()),
        }
    }

    fn number(&mut self) -> Result<f64, String> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        let text: String = self.tokens[start..self.pos].iter().collect();
        text.parse::<f64>()
            .map_err(|_| format!("invalid number '{text}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn evaluates_integer_expression_to_integer() {
        let data = MathCalcTool::new()
            .execute(json!({"expression": "2+2"}))
            .await
            .expect("should evaluate");
        assert_eq!(data, json!(4));
    }

    #[tokio::test]
    async fn respects_precedence_and_parentheses() {
        let tool = MathCalcTool::new();
        assert_eq!(
            tool.execute(json!({"expression": "2+3*4"})).await.unwrap(),
            json!(14)
        );
        assert_eq!(
            tool.execute(json!({"expression": "(2+3)*4"})).await.unwrap(),
            json!(20)
        );
        assert_eq!(
            tool.execute(json!({"expression": "-(2+1)"})).await.unwrap(),
            json!(-3)
        );
    }

    #[tokio::test]
    async fn fractional_results_stay_floats() {
        let data = MathCalcTool::new()
            .execute(json!({"expression": "7/2"}))
            .await
            .unwrap();
        assert_eq!(data, json!(3.5));
    }

    #[tokio::test]
    async fn invalid_expression_is_execution_error() {
        let result = MathCalcTool::new()
            .execute(json!({"expression": "2+*3"}))
            .await;
        assert!(matches!(result, Err(ToolError::Execution(_))));
    }

    #[tokio::test]
    async fn division_by_zero_is_execution_error() {
        let result = MathCalcTool::new()
            .execute(json!({"expression": "1/0"}))
            .await;
        assert!(matches!(result, Err(ToolError::Execution(_))));
    }
}
