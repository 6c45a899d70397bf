//! Unit tests for the tree-walking evaluator.
//!
//! Each test drives tokenize and parse, then evaluates the program
//! without running the analyzer first: evaluation is independent of the
//! semantic pass and enforces its own runtime checks.

use std::str::FromStr;

use num_bigint::BigInt;
use rust_decimal::Decimal;

use super::interpreter::interpret;
use crate::{
    environment::environment::Value,
    errors::errors::Error,
    lexer::lexer::tokenize,
    parser::parser::parse,
};

fn run_program(source: &str) -> Result<Value, Error> {
    let tokens = tokenize(source.to_string(), Some("test.fable".to_string())).unwrap();
    let (_, parsed) = parse(tokens, std::rc::Rc::new("test.fable".to_string()));
    let (_, result) = interpret(&parsed.unwrap());

    result
}

fn integer(value: i64) -> Value {
    Value::Integer(BigInt::from(value))
}

fn decimal(value: &str) -> Value {
    Value::Decimal(Decimal::from_str(value).unwrap())
}

#[test]
fn test_interpret_main_return_value() {
    let value = run_program("FUN main(): Integer DO RETURN 0; END").unwrap();
    assert_eq!(value, integer(0));
}

#[test]
fn test_interpret_missing_main() {
    // Without the analyzer, a missing entry point surfaces as a failed
    // function lookup.
    let error = run_program("FUN other(): Integer DO RETURN 0; END").unwrap_err();
    assert_eq!(error.get_error_name(), "FunctionNotDeclared");
}

#[test]
fn test_interpret_precedence() {
    let value = run_program("FUN main(): Integer DO RETURN 1 + 2 * 3; END").unwrap();
    assert_eq!(value, integer(7));
}

#[test]
fn test_interpret_grouping() {
    let value = run_program("FUN main(): Integer DO RETURN (1 + 2) * 3; END").unwrap();
    assert_eq!(value, integer(9));
}

#[test]
fn test_interpret_big_integers() {
    let value =
        run_program("FUN main(): Integer DO RETURN 1000000000000 * 1000000000000; END").unwrap();
    assert_eq!(
        value,
        Value::Integer(BigInt::from_str("1000000000000000000000000").unwrap())
    );
}

#[test]
fn test_interpret_decimal_arithmetic() {
    // Evaluation never consults the static types, so main may hand back
    // any value.
    let value = run_program("FUN main(): Integer DO RETURN 1.5 + 2.25; END").unwrap();
    assert_eq!(value, decimal("3.75"));
}

#[test]
fn test_interpret_division_truncates_toward_zero() {
    let value = run_program("FUN main(): Integer DO RETURN (0 - 7) / 2; END").unwrap();
    assert_eq!(value, integer(-3));
}

#[test]
fn test_interpret_division_by_zero() {
    let error = run_program("FUN main(): Integer DO RETURN 1 / 0; END").unwrap_err();
    assert_eq!(error.get_error_name(), "DivisionByZero");
    assert_eq!(error.get_error_kind(), "Arithmetic Error");
}

#[test]
fn test_interpret_decimal_division_by_zero() {
    let error = run_program("FUN main(): Integer DO RETURN 1.0 / 0.0; END").unwrap_err();
    assert_eq!(error.get_error_name(), "DivisionByZero");
}

#[test]
fn test_interpret_integer_power() {
    let value = run_program("FUN main(): Integer DO RETURN 2 ^ 10; END").unwrap();
    assert_eq!(value, integer(1024));

    let value = run_program("FUN main(): Integer DO RETURN 2 ^ 100; END").unwrap();
    assert_eq!(
        value,
        Value::Integer(BigInt::from_str("1267650600228229401496703205376").unwrap())
    );
}

#[test]
fn test_interpret_negative_integer_exponent() {
    let error = run_program("FUN main(): Integer DO RETURN 2 ^ (0 - 1); END").unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidExponent");
    assert_eq!(error.get_error_kind(), "Arithmetic Error");
}

#[test]
fn test_interpret_decimal_power() {
    let value = run_program("FUN main(): Integer DO RETURN 2.0 ^ 3; END").unwrap();
    assert_eq!(value, decimal("8"));
}

#[test]
fn test_interpret_decimal_negative_exponent() {
    // A decimal base accepts a negative exponent through the reciprocal.
    let value = run_program("FUN main(): Integer DO RETURN 2.0 ^ (0 - 2); END").unwrap();
    assert_eq!(value, decimal("0.25"));
}

#[test]
fn test_interpret_exponent_must_be_integer() {
    let error = run_program("FUN main(): Integer DO RETURN 2 ^ 1.0; END").unwrap_err();
    assert_eq!(error.get_error_name(), "TypeMatchError");
}

#[test]
fn test_interpret_ordered_comparisons() {
    let value = run_program("FUN main(): Integer DO RETURN 1 < 2; END").unwrap();
    assert_eq!(value, Value::Boolean(true));

    let value = run_program("FUN main(): Integer DO RETURN \"apple\" < \"banana\"; END").unwrap();
    assert_eq!(value, Value::Boolean(true));

    let value = run_program("FUN main(): Integer DO RETURN 'b' > 'a'; END").unwrap();
    assert_eq!(value, Value::Boolean(true));
}

#[test]
fn test_interpret_rejects_le_and_ge() {
    // The analyzer accepts `<=`, but evaluation has no rule for it.
    let error = run_program("FUN main(): Integer DO RETURN 1 <= 2; END").unwrap_err();
    assert_eq!(error.get_error_name(), "UnsupportedBinaryOperator");
}

#[test]
fn test_interpret_equality_is_structural() {
    let value = run_program("FUN main(): Integer DO RETURN 1 == 1; END").unwrap();
    assert_eq!(value, Value::Boolean(true));

    let value = run_program("FUN main(): Integer DO RETURN \"a\" != \"b\"; END").unwrap();
    assert_eq!(value, Value::Boolean(true));

    // Different kinds of value are unequal rather than an error.
    let value = run_program("FUN main(): Integer DO RETURN 1 == 1.0; END").unwrap();
    assert_eq!(value, Value::Boolean(false));
}

#[test]
fn test_interpret_string_concatenation() {
    let value = run_program("FUN main(): Integer DO RETURN \"count: \" + 3; END").unwrap();
    assert_eq!(value, Value::String("count: 3".to_string()));

    let value = run_program("FUN main(): Integer DO RETURN 1 + \" item\"; END").unwrap();
    assert_eq!(value, Value::String("1 item".to_string()));
}

#[test]
fn test_interpret_mixed_arithmetic_fails() {
    let error = run_program("FUN main(): Integer DO RETURN 1 + 2.0; END").unwrap_err();
    assert_eq!(error.get_error_name(), "TypeMatchError");
}

#[test]
fn test_interpret_short_circuit_and() {
    // A false left side settles `&&` before the right side could fail.
    let source = "FUN main(): Integer DO IF FALSE && missing DO RETURN 1; END RETURN 0; END";
    let value = run_program(source).unwrap();
    assert_eq!(value, integer(0));
}

#[test]
fn test_interpret_short_circuit_or() {
    let source = "FUN main(): Integer DO IF TRUE || missing DO RETURN 1; END RETURN 0; END";
    let value = run_program(source).unwrap();
    assert_eq!(value, integer(1));
}

#[test]
fn test_interpret_logical_operands_checked() {
    let error = run_program("FUN main(): Integer DO RETURN 1 && TRUE; END").unwrap_err();
    assert_eq!(error.get_error_name(), "TypeMatchError");
}

#[test]
fn test_interpret_if_else() {
    let source = "FUN main(): Integer DO IF 1 < 2 DO RETURN 10; ELSE RETURN 20; END END";
    let value = run_program(source).unwrap();
    assert_eq!(value, integer(10));

    let source = "FUN main(): Integer DO IF 2 < 1 DO RETURN 10; ELSE RETURN 20; END END";
    let value = run_program(source).unwrap();
    assert_eq!(value, integer(20));
}

#[test]
fn test_interpret_if_body_shares_scope() {
    // Branch statements run in the enclosing scope, so the declaration
    // survives the IF. The analyzer rejects this shape; evaluation on
    // its own does not.
    let source = "FUN main(): Integer DO IF TRUE DO LET x = 5; END RETURN x; END";
    let value = run_program(source).unwrap();
    assert_eq!(value, integer(5));
}

#[test]
fn test_interpret_while_loop() {
    let source = "
        FUN main(): Integer DO
            LET total = 0;
            LET i = 0;
            WHILE i < 5 DO
                total = total + i;
                i = i + 1;
            END
            RETURN total;
        END
    ";
    let value = run_program(source).unwrap();
    assert_eq!(value, integer(10));
}

#[test]
fn test_interpret_while_body_scope_is_per_iteration() {
    let source = "
        FUN main(): Integer DO
            LET i = 0;
            WHILE i < 1 DO
                LET x = 9;
                i = i + 1;
            END
            RETURN x;
        END
    ";
    let error = run_program(source).unwrap_err();
    assert_eq!(error.get_error_name(), "VariableNotDeclared");
}

#[test]
fn test_interpret_return_inside_while() {
    let source = "
        FUN main(): Integer DO
            LET i = 0;
            WHILE TRUE DO
                i = i + 1;
                IF i > 3 DO
                    RETURN i;
                END
            END
        END
    ";
    let value = run_program(source).unwrap();
    assert_eq!(value, integer(4));
}

#[test]
fn test_interpret_switch() {
    let source = "
        FUN main(): Integer DO
            SWITCH 2
            CASE 1:
                RETURN 10;
            CASE 2:
                RETURN 20;
            DEFAULT
                RETURN 30;
            END
        END
    ";
    let value = run_program(source).unwrap();
    assert_eq!(value, integer(20));
}

#[test]
fn test_interpret_switch_default() {
    let source = "
        FUN main(): Integer DO
            SWITCH 9
            CASE 1:
                RETURN 10;
            DEFAULT
                RETURN 30;
            END
        END
    ";
    let value = run_program(source).unwrap();
    assert_eq!(value, integer(30));
}

#[test]
fn test_interpret_switch_without_match_falls_through() {
    let source = "
        FUN main(): Integer DO
            SWITCH 9
            CASE 1:
                RETURN 10;
            END
            RETURN 0;
        END
    ";
    let value = run_program(source).unwrap();
    assert_eq!(value, integer(0));
}

#[test]
fn test_interpret_switch_labels_win_over_earlier_default() {
    let source = "
        FUN main(): Integer DO
            SWITCH 2
            DEFAULT
                RETURN 30;
            CASE 2:
                RETURN 20;
            END
        END
    ";
    let value = run_program(source).unwrap();
    assert_eq!(value, integer(20));
}

#[test]
fn test_interpret_recursion() {
    let source = "
        FUN factorial(n: Integer): Integer DO
            IF n < 2 DO
                RETURN 1;
            END
            RETURN n * factorial(n - 1);
        END

        FUN main(): Integer DO
            RETURN factorial(5);
        END
    ";
    let value = run_program(source).unwrap();
    assert_eq!(value, integer(120));
}

#[test]
fn test_interpret_function_without_return_yields_nil() {
    let source = "
        FUN noop() DO
            LET x = 1;
        END

        FUN main(): Integer DO
            RETURN noop();
        END
    ";
    let value = run_program(source).unwrap();
    assert_eq!(value, Value::Nil);
}

#[test]
fn test_interpret_parameters_are_mutable() {
    let source = "
        FUN double(x: Integer): Integer DO
            x = x + x;
            RETURN x;
        END

        FUN main(): Integer DO
            RETURN double(21);
        END
    ";
    let value = run_program(source).unwrap();
    assert_eq!(value, integer(42));
}

#[test]
fn test_interpret_function_runs_in_defining_scope() {
    // A body runs in a child of its defining scope, so it cannot see the
    // caller's locals.
    let source = "
        FUN read(): Integer DO
            RETURN x;
        END

        FUN main(): Integer DO
            LET x = 5;
            RETURN read();
        END
    ";
    let error = run_program(source).unwrap_err();
    assert_eq!(error.get_error_name(), "VariableNotDeclared");
}

#[test]
fn test_interpret_globals_persist_across_calls() {
    let source = "
        VAR count: Integer = 0;

        FUN bump() DO
            count = count + 1;
        END

        FUN main(): Integer DO
            bump();
            bump();
            bump();
            RETURN count;
        END
    ";
    let value = run_program(source).unwrap();
    assert_eq!(value, integer(3));
}

#[test]
fn test_interpret_global_without_value_is_nil() {
    let source = "VAR x: Integer; FUN main(): Integer DO RETURN x; END";
    let value = run_program(source).unwrap();
    assert_eq!(value, Value::Nil);
}

#[test]
fn test_interpret_assignment_to_immutable() {
    let source = "VAL limit: Integer = 10; FUN main(): Integer DO limit = 20; RETURN limit; END";
    let error = run_program(source).unwrap_err();
    assert_eq!(error.get_error_name(), "AssignmentToImmutable");
    assert_eq!(error.get_error_kind(), "Immutability Error");
}

#[test]
fn test_interpret_assignment_evaluates_value_first() {
    // The value is evaluated before the receiver is resolved.
    let source = "FUN main(): Integer DO missing = 1 / 0; RETURN 0; END";
    let error = run_program(source).unwrap_err();
    assert_eq!(error.get_error_name(), "DivisionByZero");
}

#[test]
fn test_interpret_right_operand_evaluated_first() {
    let source = "
        VAR log: String = \"\";

        FUN side(tag: String, value: Integer): Integer DO
            log = log + tag;
            RETURN value;
        END

        FUN main(): Integer DO
            LET total = side(\"L\", 1) + side(\"R\", 2);
            RETURN log;
        END
    ";
    let value = run_program(source).unwrap();
    assert_eq!(value, Value::String("RL".to_string()));
}

#[test]
fn test_interpret_call_resolution_precedes_arguments() {
    // The callee resolves before the arguments are touched.
    let source = "FUN main(): Integer DO RETURN missing(1 / 0); END";
    let error = run_program(source).unwrap_err();
    assert_eq!(error.get_error_name(), "FunctionNotDeclared");
}

#[test]
fn test_interpret_call_arguments_evaluated_left_to_right() {
    let source = "
        VAR log: String = \"\";

        FUN side(tag: String, value: Integer): Integer DO
            log = log + tag;
            RETURN value;
        END

        FUN pair(a: Any, b: Any): Integer DO
            RETURN 0;
        END

        FUN main(): Integer DO
            LET total = pair(side(\"A\", 1), side(\"B\", 2));
            RETURN log;
        END
    ";
    let value = run_program(source).unwrap();
    assert_eq!(value, Value::String("AB".to_string()));
}

#[test]
fn test_interpret_call_arity_mismatch() {
    let source = "
        FUN helper(x: Integer): Integer DO
            RETURN x;
        END

        FUN main(): Integer DO
            RETURN helper(1, 2);
        END
    ";
    let error = run_program(source).unwrap_err();
    assert_eq!(error.get_error_name(), "FunctionNotDeclared");
    assert_eq!(error.get_error_kind(), "Name Error");
}

#[test]
fn test_interpret_print_returns_nil() {
    let source = "FUN main(): Integer DO LET x = print(\"hi\"); RETURN x; END";
    let value = run_program(source).unwrap();
    assert_eq!(value, Value::Nil);
}

#[test]
fn test_interpret_list_indexing() {
    let source = "LIST xs: Integer = [10, 20, 30]; FUN main(): Integer DO RETURN xs[1]; END";
    let value = run_program(source).unwrap();
    assert_eq!(value, integer(20));
}

#[test]
fn test_interpret_list_element_assignment() {
    let source = "LIST xs: Integer = [1, 2, 3]; FUN main(): Integer DO xs[0] = 9; RETURN xs[0]; END";
    let value = run_program(source).unwrap();
    assert_eq!(value, integer(9));
}

#[test]
fn test_interpret_list_values_alias_their_cells() {
    // A write through one name is visible through every alias.
    let source = "
        LIST xs: Integer = [1, 2, 3];

        FUN main(): Integer DO
            LET ys = xs;
            xs[0] = 9;
            RETURN ys[0];
        END
    ";
    let value = run_program(source).unwrap();
    assert_eq!(value, integer(9));
}

#[test]
fn test_interpret_index_out_of_bounds() {
    let source = "LIST xs: Integer = [1, 2, 3]; FUN main(): Integer DO RETURN xs[3]; END";
    let error = run_program(source).unwrap_err();
    assert_eq!(error.get_error_name(), "IndexOutOfBounds");
    assert_eq!(error.get_error_kind(), "Index Error");
}

#[test]
fn test_interpret_negative_index() {
    let source = "LIST xs: Integer = [1, 2, 3]; FUN main(): Integer DO RETURN xs[0 - 1]; END";
    let error = run_program(source).unwrap_err();
    assert_eq!(error.get_error_name(), "IndexOutOfBounds");
}

#[test]
fn test_interpret_index_must_be_integer() {
    let source = "LIST xs: Integer = [1, 2, 3]; FUN main(): Integer DO RETURN xs[\"first\"]; END";
    let error = run_program(source).unwrap_err();
    assert_eq!(error.get_error_name(), "TypeMatchError");
}

#[test]
fn test_interpret_indexed_read_requires_list() {
    let source = "VAR x: Integer = 5; FUN main(): Integer DO RETURN x[0]; END";
    let error = run_program(source).unwrap_err();
    assert_eq!(error.get_error_name(), "TypeMatchError");
}

#[test]
fn test_interpret_indexed_write_to_scalar_replaces_value() {
    // An indexed write to a non-list receiver replaces the whole value.
    let source = "VAR x: Integer = 5; FUN main(): Integer DO x[0] = 9; RETURN x; END";
    let value = run_program(source).unwrap();
    assert_eq!(value, integer(9));
}

#[test]
fn test_interpret_undeclared_variable() {
    let error = run_program("FUN main(): Integer DO RETURN missing; END").unwrap_err();
    assert_eq!(error.get_error_name(), "VariableNotDeclared");
    assert_eq!(error.get_error_kind(), "Name Error");
}
