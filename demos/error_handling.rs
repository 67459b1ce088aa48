//! Demonstrate error handling for input the lexer rejects.

fn main() {
    // Unterminated string literal
    match swiftkotlin::transpile("let greeting = \"hello\nprint(greeting)\n") {
        Ok(_) => println!("Transpiled OK (unexpected)"),
        Err(swiftkotlin::Error::Lex(e)) => {
            println!("Lex error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Location: line {}, column {}", e.span.line, e.span.column);
        }
        Err(swiftkotlin::Error::Transform(e)) => {
            println!("Transform error: {e}");
        }
    }

    println!();

    // Unclosed block comment
    match swiftkotlin::transpile("var a: Int { return 1 }\n/* todo\n") {
        Ok(_) => println!("Transpiled OK (unexpected)"),
        Err(swiftkotlin::Error::Lex(e)) => {
            println!("Lex error: {e}");
        }
        Err(swiftkotlin::Error::Transform(e)) => {
            println!("Transform error: {e}");
        }
    }
}
