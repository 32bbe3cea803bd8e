//! Basic serialization and deserialization of a config struct.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_tomlet::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Config {
    name: String,
    debug: bool,
    server: Server,
    users: Vec<User>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Server {
    host: String,
    port: u16,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    email: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "directory".to_string(),
        debug: false,
        server: Server {
            host: "0.0.0.0".to_string(),
            port: 8080,
        },
        users: vec![
            User {
                id: 42,
                name: "Alice Johnson".to_string(),
                email: "alice@example.com".to_string(),
            },
            User {
                id: 43,
                name: "Bob Smith".to_string(),
                email: "bob@example.com".to_string(),
            },
        ],
    };

    // Nested structs become [sections], vectors of structs become [[arrays]]
    let text = to_string(&config)?;
    println!("Output:\n{}", text);

    let config_back: Config = from_str(&text)?;
    assert_eq!(config, config_back);
    println!("✓ Round-trip successful");

    Ok(())
}
