//! Orchestrator settings.
//!
//! Marker attribute names shared with the server-side templates, the runtime
//! [`Environment`] and the production forwarding threshold.

use crate::reporter::Severity ;



/// Environment variable consulted by [`Environment::from_env`].
pub const ENVIRONMENT_VAR: &str = "MOUNT_ORCHESTRATOR_ENV" ;

/// Reports kept by a [`Reporter`]( crate::Reporter ) unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 256 ;

/// Decides how verbose the [`Reporter`]( crate::Reporter ) is.
#[derive( Copy, Clone, Eq, PartialEq, Hash, Debug )]
pub enum Environment {
	/// Every report is logged with its full context and error chain.
	Development,
	/// Detail is suppressed; serious reports go to the external sink.
	Production,
}

impl Environment {

	/// Reads [`ENVIRONMENT_VAR`], falling back to the build profile.
	///
	/// Accepts `development`/`dev` and `production`/`prod`, case-insensitively.
	pub fn from_env() -> Self {
		std::env::var( ENVIRONMENT_VAR ).ok()
			.and_then(| value | Self::parse( &value ))
			.unwrap_or_else( Self::from_build )
	}

	/// `Development` for debug builds, `Production` otherwise.
	pub fn from_build() -> Self {
		match cfg!( debug_assertions ) {
			true => Self::Development,
			false => Self::Production,
		}
	}

	pub fn parse( value: &str ) -> Option<Self> {
		match value.trim().to_ascii_lowercase().as_str() {
			"development" | "dev" => Some( Self::Development ),
			"production" | "prod" => Some( Self::Production ),
			_ => None,
		}
	}

}

impl std::fmt::Display for Environment {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result {
		match self {
			Self::Development => write!( f, "development" ),
			Self::Production => write!( f, "production" ),
		}
	}
}

/// Settings shared by the scanner, scheduler and reporter.
///
/// ```
/// use mount_orchestrator::{ Environment, Settings, Severity };
///
/// let settings = Settings::default()
/// 	.with_key_attribute( "data-vue" )
/// 	.with_environment( Environment::Production )
/// 	.with_forward_threshold( Severity::Critical );
///
/// assert_eq!( settings.key_attribute(), "data-vue" );
/// assert_eq!( settings.config_attribute(), "data-component-config" );
/// ```
#[derive( Debug, Clone )]
pub struct Settings {
	key_attribute: String,
	config_attribute: String,
	claim_attribute: String,
	environment: Environment,
	forward_threshold: Severity,
	history_limit: usize,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			key_attribute: "data-component".to_string(),
			config_attribute: "data-component-config".to_string(),
			claim_attribute: "data-component-claimed".to_string(),
			environment: Environment::from_env(),
			forward_threshold: Severity::High,
			history_limit: DEFAULT_HISTORY_LIMIT,
		}
	}
}

impl Settings {

	/// Attribute whose value names the component to mount.
	pub fn with_key_attribute( mut self, name: impl Into<String> ) -> Self {
		self.key_attribute = name.into();
		self
	}

	/// Attribute holding the JSON per-instance configuration.
	pub fn with_config_attribute( mut self, name: impl Into<String> ) -> Self {
		self.config_attribute = name.into();
		self
	}

	/// Attribute written on every element a scan has taken ownership of.
	pub fn with_claim_attribute( mut self, name: impl Into<String> ) -> Self {
		self.claim_attribute = name.into();
		self
	}

	pub fn with_environment( mut self, environment: Environment ) -> Self {
		self.environment = environment ;
		self
	}

	/// Lowest severity forwarded to the external sink in production.
	pub fn with_forward_threshold( mut self, severity: Severity ) -> Self {
		self.forward_threshold = severity ;
		self
	}

	/// Number of most recent reports [`Reporter::reports`]( crate::Reporter::reports )
	/// keeps. Zero keeps none.
	pub fn with_history_limit( mut self, limit: usize ) -> Self {
		self.history_limit = limit ;
		self
	}

	#[inline] pub fn key_attribute( &self ) -> &str { &self.key_attribute }
	#[inline] pub fn config_attribute( &self ) -> &str { &self.config_attribute }
	#[inline] pub fn claim_attribute( &self ) -> &str { &self.claim_attribute }
	#[inline] pub fn environment( &self ) -> Environment { self.environment }
	#[inline] pub fn forward_threshold( &self ) -> Severity { self.forward_threshold }
	#[inline] pub fn history_limit( &self ) -> usize { self.history_limit }

}
