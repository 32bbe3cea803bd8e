//! The `toml!` value-literal macro and crate-internal logging shims.

/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Objects become tables, lists become arrays, and any other expression is
/// converted with `Value::from`.
///
/// ```rust
/// use serde_tomlet::{toml, Value};
///
/// let server = toml!({
///     "host": "localhost",
///     "ports": [8080, 8081],
///     "tls": { "enabled": false }
/// });
/// assert_eq!(server.get("host").and_then(Value::as_str), Some("localhost"));
/// ```
#[macro_export]
macro_rules! toml {
    (true) => {
        $crate::Value::Boolean(true)
    };

    (false) => {
        $crate::Value::Boolean(false)
    };

    ([]) => {
        $crate::Value::Array($crate::Array::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array($crate::Array::from(vec![$($crate::toml!($elem)),*]))
    };

    ({}) => {
        $crate::Value::Table($crate::Table::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($key.to_string(), $crate::toml!($value));
        )*
        $crate::Value::Table(table)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}

// Logging compiles to nothing unless the `logging` feature is on. The
// disabled form still type-checks its arguments.

#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if false {
            let _ = format_args!($($arg)*);
        }
    };
}

#[cfg(feature = "logging")]
macro_rules! log_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        if false {
            let _ = format_args!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Array, Table, Value};

    #[test]
    fn test_toml_macro_primitives() {
        assert_eq!(toml!(true), Value::Boolean(true));
        assert_eq!(toml!(false), Value::Boolean(false));
        assert_eq!(toml!(42), Value::Integer(42));
        assert_eq!(toml!(3.5), Value::Float(3.5));
        assert_eq!(toml!("hello"), Value::from("hello"));
    }

    #[test]
    fn test_toml_macro_arrays() {
        assert_eq!(toml!([]), Value::Array(Array::new()));

        let arr = toml!([1, "two", [3]]);
        match arr {
            Value::Array(items) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[0], Value::Integer(1));
                assert_eq!(items[1].as_str(), Some("two"));
                assert!(items[2].is_array());
            }
            _ => panic!("Expected array"),
        }
    }

    #[test]
    fn test_toml_macro_tables() {
        assert_eq!(toml!({}), Value::Table(Table::new()));

        let table = toml!({
            "name": "Alice",
            "age": 30
        });

        match table {
            Value::Table(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map.get("name").and_then(Value::as_str), Some("Alice"));
                assert_eq!(map.get("age"), Some(&Value::Integer(30)));
            }
            _ => panic!("Expected table"),
        }
    }
}
