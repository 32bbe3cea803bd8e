//! Using the toml! macro for dynamic value construction.
//!
//! Run with: cargo run --example macro

use serde_tomlet::{to_string, toml, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let bool_val = toml!(true);
    let number = toml!(42);
    let ratio = toml!(0.75);
    let text = toml!("Hello, config!");

    // A bare value prints in its inline form
    println!("Primitives:");
    println!("  bool:   {}", bool_val);
    println!("  number: {}", number);
    println!("  float:  {}", ratio);
    println!("  text:   {}\n", text);

    let numbers = toml!([1, 2, 3, 4, 5]);
    let mixed = toml!([1, "two", true, [3.0]]);

    println!("Arrays:");
    println!("  Numbers: {}", numbers);
    println!("  Mixed:   {}\n", mixed);

    let config = toml!({
        "app": {
            "name": "MyApp",
            "version": "1.0.0"
        },
        "database": {
            "host": "localhost",
            "port": 5432,
            "name": "mydb"
        },
        "features": ["auth", "logging", "metrics"],
        "debug": true
    });

    println!("Nested tables:");
    println!("{}", to_string(&config)?);

    let jobs = vec![
        toml!({"id": 1, "status": "active"}),
        toml!({"id": 2, "status": "pending"}),
        toml!({"id": 3, "status": "completed"}),
    ];

    let summary = toml!({
        "total": 3,
        "jobs": jobs
    });

    println!("Dynamic construction:");
    println!("{}", to_string(&summary)?);

    if let Some(name) = config
        .get("app")
        .and_then(|app| app.get("name"))
        .and_then(Value::as_str)
    {
        println!("Accessing values:");
        println!("  App name: {}", name);
    }
    if let Some(features) = config.get("features").and_then(Value::as_array) {
        println!("  Features: {}", features.len());
    }

    Ok(())
}
