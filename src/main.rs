use ableitung::parse::parse;
use std::io::{BufRead, Write};

/// Read expressions of the variable 'x' line by line, and print each one
/// together with its formal derivative. Errors are reported and the loop
/// continues with the next input.
fn main() {
    println!("Formal differentiation calculator");
    println!("Enter a function of x using + - * / ** sin() cos(), or 'q' to quit.");
    println!("Example: x**2 + 2*x + 1");
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "q" || line == "quit" {
            break;
        }
        match parse(line) {
            Ok(expr) => {
                println!("f(x) = {expr}");
                match expr.derivative('x') {
                    Ok(deriv) => println!("f'(x) = {deriv}"),
                    Err(error) => println!("Error: {error}"),
                }
            }
            Err(error) => println!("Error: {error}"),
        }
    }
}
