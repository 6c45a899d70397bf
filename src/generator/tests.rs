//! Unit tests for the Java source emitter.
//!
//! Each test drives the front end and the analyzer, then checks the
//! emitted text, either the whole file or layout-critical lines.

use super::generator::generate;
use crate::{
    analyzer::analyzer::analyze, errors::errors::Error, lexer::lexer::tokenize,
    parser::parser::parse,
};

fn generate_program(source: &str) -> Result<String, Error> {
    let tokens = tokenize(source.to_string(), Some("test.fable".to_string())).unwrap();
    let (_, parsed) = parse(tokens, std::rc::Rc::new("test.fable".to_string()));
    let source = parsed.unwrap();

    let (_, error) = analyze(&source);
    assert!(error.is_none());

    generate(&source)
}

#[test]
fn test_generate_hello_world() {
    let source = "FUN main(): Integer DO print(\"Hello, World!\"); RETURN 0; END";
    let expected = [
        "public class Main {",
        "",
        "    public static void main(String[] args) {",
        "        System.exit(new Main().main());",
        "    }",
        "",
        "    int main() {",
        "        System.out.println(\"Hello, World!\");",
        "        return 0;",
        "    }",
        "",
        "}",
    ]
    .join("\n");

    assert_eq!(generate_program(source).unwrap(), expected);
}

#[test]
fn test_generate_globals() {
    let source = "
        VAR x: Integer = 5;
        VAL name: String = \"n\";
        LIST xs: Decimal = [1.0, 2.0];
        VAR y: Boolean;

        FUN main(): Integer DO
            RETURN x;
        END
    ";
    let expected = [
        "public class Main {",
        "",
        "    int x = 5;",
        "    final String name = \"n\";",
        "    double[] xs = {1.0, 2.0};",
        "    boolean y;",
        "",
        "    public static void main(String[] args) {",
        "        System.exit(new Main().main());",
        "    }",
        "",
        "    int main() {",
        "        return x;",
        "    }",
        "",
        "}",
    ]
    .join("\n");

    assert_eq!(generate_program(source).unwrap(), expected);
}

#[test]
fn test_generate_function_parameters() {
    let source = "
        FUN area(width: Decimal, height: Decimal): Decimal DO
            RETURN width * height;
        END

        FUN main(): Integer DO
            RETURN 0;
        END
    ";
    let java = generate_program(source).unwrap();
    assert!(java.contains("    double area(double width, double height) {"));
    assert!(java.contains("        return width * height;"));
}

#[test]
fn test_generate_empty_function_body() {
    let source = "FUN noop() DO END FUN main(): Integer DO RETURN 0; END";
    let java = generate_program(source).unwrap();
    assert!(java.contains("    Void noop() {}"));
}

#[test]
fn test_generate_if_else() {
    let source = "
        FUN main(): Integer DO
            IF TRUE DO
                print(1);
            ELSE
                print(2);
            END
            RETURN 0;
        END
    ";
    let java = generate_program(source).unwrap();
    assert!(java.contains("        if (true) {"));
    assert!(java.contains("            System.out.println(1);"));
    assert!(java.contains("        } else {"));
    assert!(java.contains("            System.out.println(2);"));
}

#[test]
fn test_generate_if_without_else() {
    let source = "
        FUN main(): Integer DO
            IF TRUE DO
                print(1);
            END
            RETURN 0;
        END
    ";
    let java = generate_program(source).unwrap();
    assert!(!java.contains("else"));
}

#[test]
fn test_generate_switch() {
    let source = "
        FUN main(): Integer DO
            LET letter: Character = 'y';
            SWITCH letter
            CASE 'y':
                print(\"yes\");
            DEFAULT
                print(\"no\");
            END
            RETURN 0;
        END
    ";
    let expected = [
        "        switch (letter) {",
        "            case 'y':",
        "                System.out.println(\"yes\");",
        "                break;",
        "            default:",
        "                System.out.println(\"no\");",
        "        }",
    ]
    .join("\n");

    assert!(generate_program(source).unwrap().contains(&expected));
}

#[test]
fn test_generate_while() {
    let source = "
        VAR x: Integer = 0;

        FUN main(): Integer DO
            WHILE x < 5 DO
                x = x + 1;
            END
            RETURN x;
        END
    ";
    let expected = [
        "        while (x < 5) {",
        "            x = x + 1;",
        "        }",
    ]
    .join("\n");

    assert!(generate_program(source).unwrap().contains(&expected));
}

#[test]
fn test_generate_empty_while_body() {
    let source = "FUN main(): Integer DO WHILE FALSE DO END RETURN 0; END";
    let java = generate_program(source).unwrap();
    assert!(java.contains("        while (false) {}"));
}

#[test]
fn test_generate_power_as_math_pow() {
    // Analysis rejects `^` but resolves main's binding before it fails,
    // which is all the emitter needs here.
    let tokens = tokenize(
        "FUN main(): Integer DO RETURN 2 ^ 8; END".to_string(),
        Some("test.fable".to_string()),
    )
    .unwrap();
    let (_, parsed) = parse(tokens, std::rc::Rc::new("test.fable".to_string()));
    let source = parsed.unwrap();

    let (_, error) = analyze(&source);
    assert!(error.is_some());

    let java = generate(&source).unwrap();
    assert!(java.contains("        return Math.pow(2, 8);"));
}

#[test]
fn test_generate_escaped_string() {
    let source = "FUN main(): Integer DO print(\"a\\nb\\\"c\\\"\"); RETURN 0; END";
    let java = generate_program(source).unwrap();
    assert!(java.contains("System.out.println(\"a\\nb\\\"c\\\"\");"));
}

#[test]
fn test_generate_escaped_character() {
    let source = "FUN main(): Integer DO LET tab: Character = '\\t'; RETURN 0; END";
    let java = generate_program(source).unwrap();
    assert!(java.contains("char tab = '\\t';"));
}

#[test]
fn test_generate_list_access_and_element_assignment() {
    let source = "
        LIST xs: Integer = [1, 2, 3];

        FUN main(): Integer DO
            xs[0] = 9;
            RETURN xs[0];
        END
    ";
    let java = generate_program(source).unwrap();
    assert!(java.contains("    int[] xs = {1, 2, 3};"));
    assert!(java.contains("        xs[0] = 9;"));
    assert!(java.contains("        return xs[0];"));
}

#[test]
fn test_generate_user_function_call() {
    let source = "
        FUN helper(): Integer DO
            RETURN 1;
        END

        FUN main(): Integer DO
            RETURN helper();
        END
    ";
    let java = generate_program(source).unwrap();
    assert!(java.contains("    int helper() {"));
    assert!(java.contains("        return helper();"));
}

#[test]
fn test_generate_grouped_logical_expression() {
    let source = "FUN main(): Integer DO IF (1 < 2) && (3 < 4) DO RETURN 1; END RETURN 0; END";
    let java = generate_program(source).unwrap();
    assert!(java.contains("        if ((1 < 2) && (3 < 4)) {"));
}

#[test]
fn test_generate_nil_literal() {
    let source = "FUN main(): Integer DO LET x: Any = NIL; RETURN 0; END";
    let java = generate_program(source).unwrap();
    assert!(java.contains("        Object x = null;"));
}

#[test]
fn test_generate_declaration_without_value() {
    let source = "FUN main(): Integer DO LET x: Integer; RETURN 0; END";
    let java = generate_program(source).unwrap();
    assert!(java.contains("        int x;"));
}

#[test]
fn test_generate_requires_analysis() {
    let tokens = tokenize(
        "FUN main(): Integer DO RETURN 0; END".to_string(),
        Some("test.fable".to_string()),
    )
    .unwrap();
    let (_, parsed) = parse(tokens, std::rc::Rc::new("test.fable".to_string()));
    let source = parsed.unwrap();

    let error = generate(&source).unwrap_err();
    assert_eq!(error.get_error_name(), "InternalError");
    assert_eq!(error.get_error_kind(), "Internal Error");
}
