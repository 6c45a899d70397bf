use crate::{
    ast::{
        ast::{self, Global, Source},
        expressions::Expr,
    },
    errors::errors::Error,
};

use super::{expr::gen_expression, stmt::gen_statement};

/// The Java source emitter.
///
/// Holds the output buffer and the indentation level while nodes are
/// rendered. Indentation is four spaces per level, written by `newline`
/// as the prefix of the following line.
pub struct Generator {
    pub output: String,
    pub indent: usize,
}

impl Generator {
    pub fn new() -> Generator {
        Generator {
            output: String::new(),
            indent: 0,
        }
    }

    /// Appends text at the current position.
    pub fn emit(&mut self, text: &str) {
        self.output.push_str(text);
    }

    /// Ends the current line and indents the next one by `indent`
    /// levels. A blank line is `newline(0)` followed by the next line's
    /// own call.
    pub fn newline(&mut self, indent: usize) {
        self.output.push('\n');
        for _ in 0..indent {
            self.output.push_str("    ");
        }
    }
}

/// Renders an analyzed program as Java source text.
///
/// The tree's resolution cells must already be filled: emission reads
/// the bindings for declarations and calls off the nodes and fails with
/// an internal error when one is missing.
pub fn generate(source: &Source) -> Result<String, Error> {
    let mut generator = Generator::new();
    gen_source(&mut generator, source)?;

    Ok(generator.output)
}

/// Emits the `Main` class: globals first, then the standard entry point
/// delegating to `main()`, then one method per function.
pub fn gen_source(generator: &mut Generator, source: &Source) -> Result<(), Error> {
    generator.emit("public class Main {");
    generator.newline(0);
    generator.indent += 1;

    if !source.globals.is_empty() {
        for global in &source.globals {
            generator.newline(generator.indent);
            gen_global(generator, global)?;
        }
        generator.newline(0);
    }

    generator.newline(generator.indent);
    generator.emit("public static void main(String[] args) {");
    generator.newline(generator.indent + 1);
    generator.emit("System.exit(new Main().main());");
    generator.newline(generator.indent);
    generator.emit("}");
    generator.newline(0);

    for function in &source.functions {
        generator.newline(generator.indent);
        gen_function(generator, function)?;
        generator.newline(0);
    }

    generator.indent -= 1;
    generator.newline(generator.indent);
    generator.emit("}");

    Ok(())
}

pub fn gen_global(generator: &mut Generator, global: &Global) -> Result<(), Error> {
    let variable = ast::resolved(&global.variable, "the global's binding", &global.span.start)?;

    if !global.mutable {
        generator.emit("final ");
    }

    generator.emit(variable.ty.jvm_name());

    match &global.value {
        Some(value) => {
            // A list global is an array; its declared type names the
            // elements.
            if matches!(value, Expr::ListLiteral(_)) {
                generator.emit(&format!("[] {} = ", variable.jvm_name));
            } else {
                generator.emit(&format!(" {} = ", variable.jvm_name));
            }
            gen_expression(generator, value)?;
        }
        None => generator.emit(&format!(" {}", variable.jvm_name)),
    }

    generator.emit(";");
    Ok(())
}

pub fn gen_function(generator: &mut Generator, function: &ast::Function) -> Result<(), Error> {
    let definition = ast::resolved(
        &function.function,
        "the function's binding",
        &function.span.start,
    )?;

    generator.emit(&format!(
        "{} {}(",
        definition.return_type.jvm_name(),
        definition.jvm_name
    ));

    for (index, (parameter, ty)) in function
        .parameters
        .iter()
        .zip(&definition.parameter_types)
        .enumerate()
    {
        if index > 0 {
            generator.emit(", ");
        }
        generator.emit(&format!("{} {}", ty.jvm_name(), parameter));
    }

    generator.emit(") {");

    if !function.statements.is_empty() {
        generator.indent += 1;
        for statement in &function.statements {
            generator.newline(generator.indent);
            gen_statement(generator, statement)?;
        }
        generator.indent -= 1;
        generator.newline(generator.indent);
    }

    generator.emit("}");
    Ok(())
}
