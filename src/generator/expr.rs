use crate::{
    ast::{
        ast,
        expressions::{BinaryOp, Expr, Literal},
    },
    errors::errors::Error,
};

use super::generator::Generator;

pub fn gen_expression(generator: &mut Generator, expression: &Expr) -> Result<(), Error> {
    match expression {
        Expr::Literal(literal) => {
            gen_literal(generator, &literal.value);
            Ok(())
        }
        Expr::Group(group) => {
            generator.emit("(");
            gen_expression(generator, &group.inner)?;
            generator.emit(")");
            Ok(())
        }
        Expr::Binary(binary) => {
            // `^` has no Java operator; it renders as a Math.pow call.
            if binary.op == BinaryOp::Pow {
                generator.emit("Math.pow(");
                gen_expression(generator, &binary.left)?;
                generator.emit(", ");
                gen_expression(generator, &binary.right)?;
                generator.emit(")");
                return Ok(());
            }

            gen_expression(generator, &binary.left)?;
            generator.emit(&format!(" {} ", binary.op));
            gen_expression(generator, &binary.right)?;
            Ok(())
        }
        Expr::Access(access) => {
            generator.emit(&access.name);

            if let Some(offset) = &access.offset {
                generator.emit("[");
                gen_expression(generator, offset)?;
                generator.emit("]");
            }

            Ok(())
        }
        Expr::Call(call) => {
            let function = ast::resolved(&call.function, "the call's binding", &call.span.start)?;

            generator.emit(&format!("{}(", function.jvm_name));

            for (index, argument) in call.arguments.iter().enumerate() {
                if index > 0 {
                    generator.emit(", ");
                }
                gen_expression(generator, argument)?;
            }

            generator.emit(")");
            Ok(())
        }
        Expr::ListLiteral(list) => {
            generator.emit("{");

            for (index, element) in list.elements.iter().enumerate() {
                if index > 0 {
                    generator.emit(", ");
                }
                gen_expression(generator, element)?;
            }

            generator.emit("}");
            Ok(())
        }
    }
}

fn gen_literal(generator: &mut Generator, literal: &Literal) {
    match literal {
        Literal::Nil => generator.emit("null"),
        Literal::Boolean(value) => generator.emit(&value.to_string()),
        Literal::Integer(value) => generator.emit(&value.to_string()),
        Literal::Decimal(value) => generator.emit(&value.to_string()),
        Literal::Character(value) => generator.emit(&format!("'{}'", escape(*value))),
        Literal::String(value) => {
            let escaped = value.chars().map(escape).collect::<String>();
            generator.emit(&format!("\"{}\"", escaped));
        }
    }
}

/// Escapes one character for a Java source literal. The set mirrors the
/// escapes the lexer understands, so emitted literals lex back to the
/// stored text.
fn escape(ch: char) -> String {
    match ch {
        '\u{0008}' => String::from("\\b"),
        '\n' => String::from("\\n"),
        '\r' => String::from("\\r"),
        '\t' => String::from("\\t"),
        '\'' => String::from("\\'"),
        '"' => String::from("\\\""),
        '\\' => String::from("\\\\"),
        ch => ch.to_string(),
    }
}
