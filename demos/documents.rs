//! Parsing documents: lookups, regions, comments and diagnostics.
//!
//! Run with: cargo run --example documents

use serde_tomlet::{
    parse, parse_with_options, CommentPolicy, FormatOptions, ParseOptions, PathSegment, Value,
};
use std::error::Error;

const SOURCE: &str = r#"# Deployment settings
title = "edge"

[server]
host = "0.0.0.0"
port = 8080 # public port

[[replica]]
host = "10.0.0.2"

[[replica]]
host = "10.0.0.3"
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let options = ParseOptions::new()
        .with_comments(CommentPolicy::Preserve)
        .with_source_name("deploy.toml");
    let mut doc = parse_with_options(SOURCE, &options)?;

    // Dotted lookups; arrays of tables resolve to their last element
    let port: i64 = doc.get_as("server.port")?;
    println!("server.port = {}", port);
    println!(
        "replica.host = {:?}",
        doc.get("replica.host").and_then(Value::as_str)
    );

    let path = [PathSegment::from("server"), PathSegment::from("port")];
    if let Some(region) = doc.region(&path) {
        println!("server.port is defined at {}:{}", region.line, region.column);
    }
    if let Some(comments) = doc.comments(&path) {
        println!("server.port comment: {:?}\n", comments.trailing);
    }

    if let Some(server) = doc.root_mut().get_mut("server").and_then(Value::as_table_mut) {
        server.insert("port".to_string(), Value::Integer(9090));
    }

    println!("Edited, comments kept:\n{}", doc);
    println!(
        "Edited, comments dropped:\n{}",
        doc.to_string_with_options(&FormatOptions::new().without_comments())
    );

    // Diagnostics carry a line, a column and the offending source line
    match parse("[server]\nport = 80 80\n") {
        Ok(_) => println!("unexpectedly valid"),
        Err(err) => println!("Error:\n{}", err),
    }

    match parse("[a]\nx = 1\n[a]\n") {
        Ok(_) => println!("unexpectedly valid"),
        Err(err) => println!("Error:\n{}", err),
    }

    Ok(())
}
