//! Working with Value for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use serde::{Deserialize, Serialize};
use serde_tomlet::{from_value, to_string, to_value, toml, LocalDate, Table, Value};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
    joined: LocalDate,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut config = toml!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging", "metrics"],
        "debug": true
    });

    // Edit the tree in place
    if let Some(table) = config.as_table_mut() {
        table.insert("port".to_string(), Value::Integer(9090));

        let mut limits = Table::new();
        limits.insert("requests".to_string(), Value::Integer(500));
        limits.insert("burst".to_string(), Value::Float(1.5));
        table.insert("limits".to_string(), Value::Table(limits));
    }

    println!("Config:\n{}", to_string(&config)?);

    if let Some(host) = config.get("host").and_then(Value::as_str) {
        println!("Accessing field 'host': {}", host);
    }
    if let Some(port) = config.get("port").and_then(Value::as_integer) {
        println!("Accessing field 'port': {}", port);
    }
    if let Some(features) = config.get("features").and_then(Value::as_array) {
        println!("Accessing field 'features': {} items\n", features.len());
    }

    // Convert an existing struct to a Value; dates keep their kind
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        joined: LocalDate::new(2021, 6, 14)?,
        roles: vec!["admin".to_string(), "developer".to_string()],
    };

    let user_value = to_value(&user)?;
    println!("User as Value:\n{}", user_value);

    println!("Type checks:");
    println!("  is_table:    {}", user_value.is_table());
    println!("  is_array:    {}", user_value.is_array());
    if let Some(joined) = user_value.get("joined") {
        println!("  joined kind: {}\n", joined.type_name());
    }

    let back: User = from_value(user_value)?;
    println!("Back to a struct: {:?}", back);

    Ok(())
}
