//! Component configuration payloads.
//!
//! A [`Config`] is an opaque string-keyed JSON object. Descriptors carry a
//! default one, elements may carry a serialised per-instance override, and the
//! executor hands the [`merge`]d result to the mounted unit.

use pipe_trait::Pipe ;
use thiserror::Error ;

/// String-keyed configuration passed to a mountable unit.
pub type Config = serde_json::Map<String, serde_json::Value>;

/// Errors produced while parsing a per-instance configuration attribute.
#[derive( Error, Debug )]
pub enum ConfigError {
	/// The attribute is not valid JSON.
	#[error( "Malformed JSON: {0}" )] Malformed( #[from] serde_json::Error ),
	/// The attribute is valid JSON but not an object.
	#[error( "Expected a JSON object, found {0}" )] NotAnObject( &'static str ),
}

/// Strictly parses a serialised per-instance configuration.
///
/// Only a JSON object is accepted. Whitespace-only input counts as absent and
/// yields an empty configuration.
///
/// # Errors
/// Returns [`ConfigError`] if `raw` is not a JSON object.
pub fn parse( raw: &str ) -> Result<Config, ConfigError> {
	if raw.trim().is_empty() { return Ok( Config::new() ) }
	raw.pipe( serde_json::from_str::<serde_json::Value> )?
		.pipe(| value | match value {
			serde_json::Value::Object( map ) => Ok( map ),
			other => Err( ConfigError::NotAnObject( json_kind( &other ))),
		})
}

/// Merges `instance` over `defaults`, key by key.
///
/// The merge is **shallow**: a key present in `instance` replaces the default
/// value wholesale, including when both values are objects. Nested objects are
/// never merged recursively.
///
/// ```
/// use mount_orchestrator::config::{ merge, Config };
/// use serde_json::json ;
///
/// let defaults = json!({ "a": 1, "nested": { "x": 1, "y": 2 }}).as_object().cloned().unwrap();
/// let instance = json!({ "nested": { "x": 9 }}).as_object().cloned().unwrap();
///
/// let merged: Config = merge( &defaults, &instance );
/// assert_eq!( serde_json::Value::Object( merged ), json!({ "a": 1, "nested": { "x": 9 }}));
/// ```
pub fn merge( defaults: &Config, instance: &Config ) -> Config {
	let mut merged = defaults.clone();
	instance.iter().for_each(|( key, value )| { merged.insert( key.clone(), value.clone() ); });
	merged
}

fn json_kind( value: &serde_json::Value ) -> &'static str {
	match value {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool( _ ) => "a boolean",
		serde_json::Value::Number( _ ) => "a number",
		serde_json::Value::String( _ ) => "a string",
		serde_json::Value::Array( _ ) => "an array",
		serde_json::Value::Object( _ ) => "an object",
	}
}
