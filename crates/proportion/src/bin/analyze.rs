use {
    proportion::{AnalyzerOptions, analyze_body_proportions},
    serde_json::Value,
    std::env,
};

const DEFAULT_PATH: &str = "./generated/0_0_joints.npz";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    base::init_stdout_logger();

    let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_PATH.to_string());
    let report = analyze_body_proportions(&path, &AnalyzerOptions::default());

    println!("Body proportions for {path}:");
    if let Value::Object(fields) = serde_json::to_value(&report)? {
        for (key, value) in fields {
            match value.as_f64() {
                Some(number) if value.is_f64() => println!("{key}: {number:.4}"),
                _ => println!("{key}: {value}"),
            }
        }
    }

    if report.error().is_some() {
        std::process::exit(1);
    }
    Ok(())
}
