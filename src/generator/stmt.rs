use crate::{
    ast::{
        ast,
        statements::{Case, Stmt},
    },
    errors::errors::Error,
};

use super::{expr::gen_expression, generator::Generator};

pub fn gen_statement(generator: &mut Generator, statement: &Stmt) -> Result<(), Error> {
    match statement {
        Stmt::Expression(stmt) => {
            gen_expression(generator, &stmt.expression)?;
            generator.emit(";");
            Ok(())
        }
        Stmt::Declaration(stmt) => {
            let variable =
                ast::resolved(&stmt.variable, "the declaration's binding", &stmt.span.start)?;

            generator.emit(&format!("{} {}", variable.ty.jvm_name(), variable.jvm_name));

            if let Some(value) = &stmt.value {
                generator.emit(" = ");
                gen_expression(generator, value)?;
            }

            generator.emit(";");
            Ok(())
        }
        Stmt::Assignment(stmt) => {
            gen_expression(generator, &stmt.receiver)?;
            generator.emit(" = ");
            gen_expression(generator, &stmt.value)?;
            generator.emit(";");
            Ok(())
        }
        Stmt::If(stmt) => {
            generator.emit("if (");
            gen_expression(generator, &stmt.condition)?;
            generator.emit(") {");

            generator.indent += 1;
            for statement in &stmt.then_statements {
                generator.newline(generator.indent);
                gen_statement(generator, statement)?;
            }
            generator.indent -= 1;
            generator.newline(generator.indent);
            generator.emit("}");

            if !stmt.else_statements.is_empty() {
                generator.emit(" else {");

                generator.indent += 1;
                for statement in &stmt.else_statements {
                    generator.newline(generator.indent);
                    gen_statement(generator, statement)?;
                }
                generator.indent -= 1;
                generator.newline(generator.indent);
                generator.emit("}");
            }

            Ok(())
        }
        Stmt::Switch(stmt) => {
            generator.emit("switch (");
            gen_expression(generator, &stmt.condition)?;
            generator.emit(") {");

            for case in &stmt.cases {
                gen_case(generator, case)?;
            }

            generator.newline(generator.indent);
            generator.emit("}");
            Ok(())
        }
        Stmt::While(stmt) => {
            generator.emit("while (");
            gen_expression(generator, &stmt.condition)?;
            generator.emit(") {");

            if !stmt.statements.is_empty() {
                generator.indent += 1;
                for statement in &stmt.statements {
                    generator.newline(generator.indent);
                    gen_statement(generator, statement)?;
                }
                generator.indent -= 1;
                generator.newline(generator.indent);
            }

            generator.emit("}");
            Ok(())
        }
        Stmt::Return(stmt) => {
            generator.emit("return ");
            gen_expression(generator, &stmt.value)?;
            generator.emit(";");
            Ok(())
        }
    }
}

/// Renders one arm of a switch. A labelled arm ends with `break;`; the
/// default arm falls through to the closing brace.
fn gen_case(generator: &mut Generator, case: &Case) -> Result<(), Error> {
    generator.indent += 1;
    generator.newline(generator.indent);

    match &case.value {
        Some(value) => {
            generator.emit("case ");
            gen_expression(generator, value)?;
            generator.emit(":");

            generator.indent += 1;
            for statement in &case.statements {
                generator.newline(generator.indent);
                gen_statement(generator, statement)?;
            }
            generator.newline(generator.indent);
            generator.emit("break;");
        }
        None => {
            generator.emit("default:");

            generator.indent += 1;
            for statement in &case.statements {
                generator.newline(generator.indent);
                gen_statement(generator, statement)?;
            }
        }
    }

    generator.indent -= 2;
    Ok(())
}
