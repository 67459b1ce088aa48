//! Transpile a Swift file, or a built-in sample, and show what each
//! stage rewrote.
//!
//! ```text
//! cargo run --example transpile_file -- Model.swift
//! ```

use swiftkotlin::{Config, transpile_report};

const SAMPLE: &str = "\
class Counter {
    private(set) var count: Int = 0
    var label: UILabel!

    var isEmpty: Bool {
        return count == 0
    }

    func add(by amount: Int) -> Int {
        return self.clamp(value: count + amount)
    }
}
";

fn main() {
    let source = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).expect("read failed"),
        None => SAMPLE.to_string(),
    };

    let config = Config::new().indent_unit("    ");
    let (output, report) = transpile_report(&source, &config).expect("transpile failed");

    println!("{output}");
    println!("Rewrites: {}", report.total_rewrites());
    for stage in report.stages.iter().filter(|s| !s.is_noop()) {
        println!("  {}: {}", stage.stage, stage.rewrites);
    }
}
