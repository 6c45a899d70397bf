use std::{env, fs::read_to_string, path::PathBuf, process, rc::Rc};

use fable::{
    analyzer::analyzer::analyze, display_error, environment::environment::Value,
    generator::generator::generate, interpreter::interpreter::interpret, lexer::lexer::tokenize,
    parser::parser::parse,
};
use num_traits::ToPrimitive;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: fable <file.fable> [--emit-java]");
        process::exit(2);
    }

    let emit_java = args.len() == 3;

    if emit_java && args[2] != "--emit-java" {
        eprintln!("Unknown option: {}", args[2]);
        eprintln!("Usage: fable <file.fable> [--emit-java]");
        process::exit(2);
    }

    let file_path: &str = &args[1];
    let file_name = if file_path.contains("/") {
        file_path.split("/").last().unwrap()
    } else {
        file_path
    };

    let path = PathBuf::from(file_path);
    let file_contents = match read_to_string(&path) {
        Ok(contents) => contents,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file_path, error);
            process::exit(2);
        }
    };

    let tokens = tokenize(file_contents, Some(String::from(file_name)));

    if tokens.is_err() {
        display_error(tokens.err().unwrap(), path);
        process::exit(1);
    }

    let parsed = parse(tokens.unwrap(), Rc::new(String::from(file_name)));

    if parsed.1.is_err() {
        display_error(parsed.1.err().unwrap(), path);
        process::exit(1);
    }

    let source = parsed.1.unwrap();

    // Both paths run the analyzer; emission reads the bindings it resolves.
    let analyzed = analyze(&source);

    if analyzed.1.is_some() {
        display_error(analyzed.1.unwrap(), path);
        process::exit(1);
    }

    if emit_java {
        let java = generate(&source);

        if java.is_err() {
            display_error(java.err().unwrap(), path);
            process::exit(1);
        }

        println!("{}", java.unwrap());
        return;
    }

    let interpreted = interpret(&source);

    if interpreted.1.is_err() {
        display_error(interpreted.1.err().unwrap(), path);
        process::exit(1);
    }

    // main's Integer result becomes the process exit status; a value
    // outside i32 range falls back to zero.
    let code = match interpreted.1.unwrap() {
        Value::Integer(value) => value.to_i32().unwrap_or(0),
        _ => 0,
    };

    process::exit(code);
}
