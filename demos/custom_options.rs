//! Customizing output with FormatOptions.
//!
//! Run with: cargo run --example custom_options

use serde::{Deserialize, Serialize};
use serde_tomlet::{to_string_with_options, FormatOptions};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    name: String,
    ratio: f64,
    mirrors: Vec<String>,
    backends: Vec<Backend>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Backend {
    id: u32,
    weight: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        ratio: 2.0 / 3.0,
        mirrors: (1..=4)
            .map(|i| format!("https://mirror-{}.example.com", i))
            .collect(),
        backends: vec![
            Backend { id: 1, weight: 0.5 },
            Backend { id: 2, weight: 0.25 },
        ],
    };

    println!("Default:");
    println!("{}", serde_tomlet::to_string(&config)?);

    // Narrow width breaks long arrays one element per line
    println!("Width 40:");
    let narrow = FormatOptions::new().with_width(40);
    println!("{}", to_string_with_options(&config, &narrow)?);

    // Fixed float precision
    println!("Two decimal places:");
    let fixed = FormatOptions::new().with_float_precision(2);
    println!("{}", to_string_with_options(&config, &fixed)?);

    // Everything on key lines, no [[sections]]
    println!("Forced inline:");
    let inline = FormatOptions::new().with_force_inline(true).with_width(200);
    println!("{}", to_string_with_options(&config, &inline)?);

    Ok(())
}
