use std::path::Path;

use frame_regression::{
    frame::Frame, ModelType, RegressionOptions, RegressionTransform, Transform, TransformContext,
};

const USAGE: &str = "Usage: regress <frames.json> [model=linear|polynomial] [degree=<n>] [count=<n>] [x=<field>] [y=<field>] [options=<options.json>] [summary]";

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> T {
    let Ok(contents) = std::fs::read_to_string(path) else {
        fail(format!("Failed to read file: {}", path.display()));
    };

    serde_json::from_str(&contents)
        .unwrap_or_else(|err| fail(format!("Failed to parse {}: {err}", path.display())))
}

fn parse_int(name: &str, value: &str) -> i64 {
    str::parse::<i64>(value).unwrap_or_else(|_| fail(format!("Invalid {name} value: {value}")))
}

fn main() {
    env_logger::init();

    //
    // First argument is the path to a JSON array of frames.
    let Some(path) = std::env::args().nth(1) else {
        fail(format!("Please provide a path to a JSON file with an array of frames.\n{USAGE}"));
    };
    if path == "help" || path == "--help" || path == "-h" {
        eprintln!("{USAGE}");
        std::process::exit(0);
    }
    let path = Path::new(&path);

    //
    // An options file goes first, so individual arguments can override it.
    let args: Vec<String> = std::env::args().skip(2).collect();
    let mut options = match args.iter().find_map(|arg| arg.strip_prefix("options=")) {
        Some(file) => read_json::<RegressionOptions>(Path::new(file)),
        None => RegressionOptions::default(),
    };

    let mut summary = false;
    for arg in &args {
        if let Some(option) = arg.strip_prefix("model=") {
            options.model_type = match option {
                "linear" => ModelType::Linear,
                "polynomial" => ModelType::Polynomial,
                _ => fail(format!("Invalid model value: {option}")),
            };
        } else if let Some(option) = arg.strip_prefix("degree=") {
            options.degree = parse_int("degree", option);
        } else if let Some(option) = arg.strip_prefix("count=") {
            options.prediction_count = parse_int("count", option);
        } else if let Some(option) = arg.strip_prefix("x=") {
            options.x_field_name = Some(option.to_string());
        } else if let Some(option) = arg.strip_prefix("y=") {
            options.y_field_name = Some(option.to_string());
        } else if arg == "summary" {
            summary = true;
        } else if arg.starts_with("options=") {
            // Already applied
        } else if arg == "help" || arg == "--help" || arg == "-h" {
            eprintln!("{USAGE}");
            std::process::exit(0);
        } else {
            fail(format!("Unknown argument: {arg}\n{USAGE}"));
        }
    }

    let transform = RegressionTransform::new(&options).unwrap_or_else(|err| fail(err));
    let frames: Vec<Frame> = read_json(path);

    if summary {
        let fits = transform.fit_frames(&frames).unwrap_or_else(|err| fail(err));
        for (i, (frame, fit)) in frames.iter().zip(&fits).enumerate() {
            eprintln!("{}: {}", frame.label(i), fit.model);
            eprintln!(
                "  {} points, R²: {:.4}, MSE: {:.4e}",
                fit.properties.data_points, fit.properties.r_squared, fit.properties.mse
            );
        }
    }

    let output = transform
        .apply(&frames, &TransformContext::default())
        .unwrap_or_else(|err| fail(err));

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{json}"),
        Err(err) => fail(format!("Failed to serialize frames: {err}")),
    }
}
