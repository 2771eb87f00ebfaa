//! Keypad calculator: an editable expression buffer and its evaluator.
//!
//! [`Calculator`] applies key presses to a text buffer (operator collision,
//! delete, clear, evaluate). [`evaluate_expression`] parses the buffer with a
//! small recursive-descent grammar that only knows decimal literals and the
//! operators `+ − × ÷ %`:
//!
//! ```text
//! expr   := sign? term (('+' | '−') term)*
//! term   := factor (('×' | '÷') factor)*
//! factor := number '%'?
//! sign   := '+' | '−'
//! ```
//!
//! Only the first operand may carry a sign, so a negative result keeps
//! chaining (`-3+2`) while `2--3` and `2++3` are rejected.
//!
//! `%` is a suffix dividing its operand by 100, never a modulo.
use std::fmt;

use crate::{EngineError, ResultEngine};

/// Shown instead of a number after a failed evaluation.
pub const ERROR_MARKER: &str = "Error";

/// Results are rounded to this many fractional digits to hide binary noise
/// (`0.1 + 0.2` displays as `0.3`).
pub const RESULT_DECIMALS: i32 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Percent,
}

impl Operator {
    /// Symbol written into the buffer.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
            Operator::Percent => '%',
        }
    }

    /// Accepts the keypad symbols and their ASCII spellings (`*`, `/`, `x`).
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' | '−' => Some(Operator::Subtract),
            '×' | '*' | 'x' | 'X' => Some(Operator::Multiply),
            '÷' | '/' => Some(Operator::Divide),
            '%' => Some(Operator::Percent),
            _ => None,
        }
    }

    fn is_symbol(c: char) -> bool {
        matches!(c, '+' | '-' | '×' | '÷' | '%')
    }
}

/// A key press on the calculator keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Digit `0..=9`; larger values are ignored.
    Digit(u8),
    Operator(Operator),
    DecimalPoint,
    Delete,
    Clear,
    Evaluate,
}

impl Key {
    /// Maps a typed character to a key: digits, `.`/`,`, operators, `=`,
    /// `c`/`C` for clear and `d`/`D` for delete.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        if let Some(digit) = c.to_digit(10) {
            return Some(Key::Digit(digit as u8));
        }
        match c {
            '.' | ',' => Some(Key::DecimalPoint),
            '=' => Some(Key::Evaluate),
            'c' | 'C' => Some(Key::Clear),
            'd' | 'D' => Some(Key::Delete),
            other => Operator::from_char(other).map(Key::Operator),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Keys accumulate in the buffer.
    #[default]
    Editing,
    /// The buffer holds the formatted result of the last evaluation.
    Evaluated,
    /// The last evaluation failed; the readout shows [`ERROR_MARKER`].
    Failed,
}

/// What the result line of the calculator shows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Readout {
    Value(f64),
    Error,
}

impl Default for Readout {
    fn default() -> Self {
        Readout::Value(0.0)
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readout::Value(value) => f.write_str(&format_number(*value)),
            Readout::Error => f.write_str(ERROR_MARKER),
        }
    }
}

/// Expression buffer plus the last readout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Calculator {
    buffer: String,
    readout: Readout,
    mode: Mode,
}

impl Calculator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    #[must_use]
    pub fn readout(&self) -> Readout {
        self.readout
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Applies a sequence of keys in order.
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            self.press(key);
        }
    }

    /// Applies one key press. Never fails: evaluation errors become
    /// [`Mode::Failed`] and are cleared by the next edit.
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Clear => {
                *self = Self::default();
                return;
            }
            Key::Evaluate => {
                self.evaluate();
                return;
            }
            Key::Delete if self.buffer.is_empty() => return,
            _ => {}
        }

        if self.mode == Mode::Failed {
            self.readout = Readout::default();
        }
        let fresh = self.mode == Mode::Evaluated;
        self.mode = Mode::Editing;

        match key {
            Key::Digit(digit) => {
                let Some(c) = char::from_digit(u32::from(digit), 10) else {
                    return;
                };
                if fresh {
                    self.buffer.clear();
                }
                self.buffer.push(c);
            }
            Key::DecimalPoint => {
                if fresh {
                    self.buffer.clear();
                }
                if !self.current_number().contains('.') {
                    self.buffer.push('.');
                }
            }
            Key::Operator(op) => {
                if self.buffer.ends_with(Operator::is_symbol) {
                    self.buffer.pop();
                }
                self.buffer.push(op.symbol());
            }
            Key::Delete => {
                self.buffer.pop();
            }
            Key::Clear | Key::Evaluate => {}
        }
    }

    fn evaluate(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        match evaluate_expression(&self.buffer) {
            Ok(value) => {
                self.buffer = format_number(value);
                self.readout = Readout::Value(value);
                self.mode = Mode::Evaluated;
            }
            Err(_) => {
                self.readout = Readout::Error;
                self.mode = Mode::Failed;
            }
        }
    }

    /// Digits typed since the last operator.
    fn current_number(&self) -> &str {
        match self.buffer.rfind(Operator::is_symbol) {
            Some(idx) => &self.buffer[idx..],
            None => &self.buffer,
        }
    }
}

/// Parses and evaluates an arithmetic buffer, rounding the result to
/// [`RESULT_DECIMALS`] fractional digits.
///
/// Division by zero, non-finite results and malformed input are
/// [`EngineError::Evaluation`].
pub fn evaluate_expression(buffer: &str) -> ResultEngine<f64> {
    let tokens = tokenize(buffer)?;
    if tokens.is_empty() {
        return Err(EngineError::Evaluation("empty expression".to_string()));
    }
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expression()?;
    if let Some(token) = parser.peek() {
        return Err(EngineError::Evaluation(format!("unexpected {token}")));
    }
    if !value.is_finite() {
        return Err(EngineError::Evaluation("result is not finite".to_string()));
    }
    Ok(round_result(value))
}

/// Formats a number for the buffer: no exponent, no trailing zeros, no `-0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

fn round_result(value: f64) -> f64 {
    let factor = 10_f64.powi(RESULT_DECIMALS);
    let scaled = value * factor;
    let rounded = if scaled.is_finite() {
        scaled.round() / factor
    } else {
        value
    };
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Number(f64),
    Op(Operator),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {}", format_number(*n)),
            Token::Op(op) => write!(f, "operator '{}'", op.symbol()),
        }
    }
}

fn tokenize(buffer: &str) -> ResultEngine<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut literal = String::new();

    for c in buffer.chars() {
        if c.is_ascii_digit() || c == '.' {
            literal.push(c);
            continue;
        }
        flush_literal(&mut literal, &mut tokens)?;
        let op = Operator::from_char(c)
            .filter(|_| c != 'x' && c != 'X')
            .ok_or_else(|| EngineError::Evaluation(format!("unexpected character {c:?}")))?;
        tokens.push(Token::Op(op));
    }
    flush_literal(&mut literal, &mut tokens)?;

    Ok(tokens)
}

fn flush_literal(literal: &mut String, tokens: &mut Vec<Token>) -> ResultEngine<()> {
    if literal.is_empty() {
        return Ok(());
    }
    let malformed = || EngineError::Evaluation(format!("malformed number {literal:?}"));
    if literal.matches('.').count() > 1 || !literal.chars().any(|c| c.is_ascii_digit()) {
        return Err(malformed());
    }
    let value = literal.parse::<f64>().map_err(|_| malformed())?;
    tokens.push(Token::Number(value));
    literal.clear();
    Ok(())
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next_op_if(&mut self, accept: impl Fn(Operator) -> bool) -> Option<Operator> {
        match self.peek() {
            Some(Token::Op(op)) if accept(op) => {
                self.pos += 1;
                Some(op)
            }
            _ => None,
        }
    }

    fn expression(&mut self) -> ResultEngine<f64> {
        let sign = match self.next_op_if(|op| matches!(op, Operator::Add | Operator::Subtract)) {
            Some(Operator::Subtract) => -1.0,
            _ => 1.0,
        };
        let mut acc = self.term(sign)?;
        while let Some(op) =
            self.next_op_if(|op| matches!(op, Operator::Add | Operator::Subtract))
        {
            let rhs = self.term(1.0)?;
            if op == Operator::Add {
                acc += rhs;
            } else {
                acc -= rhs;
            }
        }
        Ok(acc)
    }

    fn term(&mut self, sign: f64) -> ResultEngine<f64> {
        let mut acc = sign * self.factor()?;
        while let Some(op) =
            self.next_op_if(|op| matches!(op, Operator::Multiply | Operator::Divide))
        {
            let rhs = self.factor()?;
            if op == Operator::Multiply {
                acc *= rhs;
            } else {
                if rhs == 0.0 {
                    return Err(EngineError::Evaluation("division by zero".to_string()));
                }
                acc /= rhs;
            }
        }
        Ok(acc)
    }

    fn factor(&mut self) -> ResultEngine<f64> {
        let value = match self.peek() {
            Some(Token::Number(n)) => {
                self.pos += 1;
                n
            }
            Some(token) => {
                return Err(EngineError::Evaluation(format!(
                    "expected a number, found {token}"
                )));
            }
            None => {
                return Err(EngineError::Evaluation(
                    "expression ends with an operator".to_string(),
                ));
            }
        };
        let value = if self.next_op_if(|op| op == Operator::Percent).is_some() {
            value / 100.0
        } else {
            value
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(script: &str) -> Vec<Key> {
        script.chars().filter_map(Key::from_char).collect()
    }

    fn eval_err(buffer: &str) -> bool {
        matches!(evaluate_expression(buffer), Err(EngineError::Evaluation(_)))
    }

    #[test]
    fn precedence_is_honored() {
        assert_eq!(evaluate_expression("2+3×4").unwrap(), 14.0);
        assert_eq!(evaluate_expression("2×3+4").unwrap(), 10.0);
        assert_eq!(evaluate_expression("10-4÷2").unwrap(), 8.0);
    }

    #[test]
    fn operators_are_left_associative() {
        assert_eq!(evaluate_expression("2-3-4").unwrap(), -5.0);
        assert_eq!(evaluate_expression("8÷2÷2").unwrap(), 2.0);
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert!(eval_err("5÷0"));
        assert!(eval_err("0÷0"));
        assert!(eval_err("1÷0.0"));
    }

    #[test]
    fn floating_noise_is_rounded_away() {
        assert_eq!(evaluate_expression("0.1+0.2").unwrap(), 0.3);
        assert_eq!(evaluate_expression("1÷3").unwrap(), 0.33333333);
    }

    #[test]
    fn percent_divides_by_one_hundred() {
        assert_eq!(evaluate_expression("5%").unwrap(), 0.05);
        assert_eq!(evaluate_expression("50+10%").unwrap(), 50.1);
        assert_eq!(evaluate_expression("200×15%").unwrap(), 30.0);
        assert!(eval_err("5%3"));
    }

    #[test]
    fn signs_and_ascii_aliases() {
        assert_eq!(evaluate_expression("-3+2").unwrap(), -1.0);
        assert_eq!(evaluate_expression("+4*2.5").unwrap(), 10.0);
        assert_eq!(evaluate_expression("9/4").unwrap(), 2.25);
        assert_eq!(evaluate_expression(".5+5.").unwrap(), 5.5);
    }

    #[test]
    fn only_the_leading_operand_is_signed() {
        assert_eq!(evaluate_expression("-3×2").unwrap(), -6.0);
        assert_eq!(evaluate_expression("-50%+1").unwrap(), 0.5);

        let mut calc = Calculator::new();
        calc.press_all(keys("0-3="));
        assert_eq!(calc.buffer(), "-3");
        calc.press_all(keys("+2="));
        assert_eq!(calc.readout(), Readout::Value(-1.0));
    }

    #[test]
    fn malformed_buffers_are_errors() {
        for buffer in [
            "", "5×", "×5", "1.2.3", ".", "2--3", "2++3", "2+-3", "2×-3", "--3", "abc", "2 + 3",
            "3x4", "1e5",
        ] {
            assert!(eval_err(buffer), "{buffer:?}");
        }
    }

    #[test]
    fn format_drops_trailing_zeros_and_negative_zero() {
        assert_eq!(format_number(14.0), "14");
        assert_eq!(format_number(-2.5), "-2.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1e21), "1000000000000000000000");
    }

    #[test]
    fn operator_collision_replaces_trailing_operator() {
        let mut calc = Calculator::new();
        calc.press_all([
            Key::Digit(5),
            Key::Operator(Operator::Add),
            Key::Operator(Operator::Multiply),
        ]);
        assert_eq!(calc.buffer(), "5×");

        calc.press(Key::Operator(Operator::Percent));
        calc.press(Key::Operator(Operator::Subtract));
        assert_eq!(calc.buffer(), "5-");
    }

    #[test]
    fn delete_and_evaluate_on_empty_buffer_are_no_ops() {
        let mut calc = Calculator::new();
        let before = calc.clone();
        calc.press(Key::Delete);
        assert_eq!(calc, before);
        calc.press(Key::Evaluate);
        assert_eq!(calc, before);
    }

    #[test]
    fn delete_removes_one_character() {
        let mut calc = Calculator::new();
        calc.press_all(keys("12×"));
        calc.press(Key::Delete);
        assert_eq!(calc.buffer(), "12");
        calc.press(Key::Delete);
        assert_eq!(calc.buffer(), "1");
    }

    #[test]
    fn evaluate_shows_result_and_keeps_it_in_the_buffer() {
        let mut calc = Calculator::new();
        calc.press_all(keys("2+3×4="));
        assert_eq!(calc.mode(), Mode::Evaluated);
        assert_eq!(calc.buffer(), "14");
        assert_eq!(calc.readout(), Readout::Value(14.0));
        assert_eq!(calc.readout().to_string(), "14");
    }

    #[test]
    fn digit_after_evaluate_starts_a_new_expression() {
        let mut calc = Calculator::new();
        calc.press_all(keys("2+3=7"));
        assert_eq!(calc.buffer(), "7");
        assert_eq!(calc.mode(), Mode::Editing);

        calc.press_all(keys("=.5"));
        assert_eq!(calc.buffer(), ".5");
    }

    #[test]
    fn operator_after_evaluate_chains_from_the_result() {
        let mut calc = Calculator::new();
        calc.press_all(keys("1-4=+2="));
        assert_eq!(calc.readout(), Readout::Value(-1.0));

        let mut calc = Calculator::new();
        calc.press_all(keys("6÷4=×2"));
        assert_eq!(calc.buffer(), "1.5×2");
    }

    #[test]
    fn failed_evaluation_shows_marker_until_next_edit() {
        let mut calc = Calculator::new();
        calc.press_all(keys("5÷0="));
        assert_eq!(calc.mode(), Mode::Failed);
        assert_eq!(calc.readout().to_string(), ERROR_MARKER);
        assert_eq!(calc.buffer(), "5÷0");

        calc.press(Key::Delete);
        assert_eq!(calc.mode(), Mode::Editing);
        assert_eq!(calc.readout(), Readout::Value(0.0));
        calc.press_all(keys("2="));
        assert_eq!(calc.readout(), Readout::Value(2.5));
    }

    #[test]
    fn trailing_operator_fails_instead_of_panicking() {
        let mut calc = Calculator::new();
        calc.press_all(keys("7+="));
        assert_eq!(calc.readout(), Readout::Error);
    }

    #[test]
    fn clear_resets_everything() {
        let mut calc = Calculator::new();
        calc.press_all(keys("9×9="));
        calc.press(Key::Clear);
        assert_eq!(calc, Calculator::new());
        assert_eq!(calc.buffer(), "");
        assert_eq!(calc.readout().to_string(), "0");
    }

    #[test]
    fn second_decimal_point_in_a_number_is_ignored() {
        let mut calc = Calculator::new();
        calc.press_all(keys("1.2.3+4.5."));
        assert_eq!(calc.buffer(), "1.23+4.5");
    }

    #[test]
    fn out_of_range_digit_is_ignored() {
        let mut calc = Calculator::new();
        calc.press(Key::Digit(12));
        assert_eq!(calc.buffer(), "");
    }
}
