//! Component registry.
//!
//! The [`Registry`] is the static, declarative list of every component kind the
//! page knows how to mount. It is built once, validated once, and never mutated
//! afterwards; [`Registry::install`] makes one instance available process-wide.

use std::collections::HashMap ;
use std::panic::AssertUnwindSafe ;
use std::sync::Arc ;
use once_cell::sync::OnceCell ;
use thiserror::Error ;

use crate::config::Config ;
use crate::executor::panic_message ;



static GLOBAL: OnceCell<Registry> = OnceCell::new();

/// Errors raised while building or installing a [`Registry`].
///
/// These are programmer errors and the only failures treated as fatal to an
/// initialisation pass.
#[derive( Error, Debug, Clone, PartialEq, Eq )]
pub enum RegistryError {
	/// Two descriptors share the same key.
	#[error( "Duplicate component key: {0}" )] DuplicateKey( String ),
	/// [`Registry::install`] was called more than once.
	#[error( "A global registry is already installed" )] AlreadyInstalled,
}

/// When a discovered mount point gets activated.
#[derive( Copy, Clone, Eq, PartialEq, Hash, Debug, Default )]
pub enum Activation {
	/// Mount as soon as the mount point is scheduled, in document order.
	#[default] Immediate,
	/// Mount the first time the target element becomes visible.
	Deferred,
	/// Gated by the descriptor's predicate, then mounted on first visibility.
	Conditional,
}

impl std::fmt::Display for Activation {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result { write!( f, "{:?}", self )}
}

type Predicate = Arc<dyn Fn() -> bool + Send + Sync>;

/// Static description of one mountable component kind.
///
/// Built with [`ComponentDescriptor::new`] and the `with_*` methods:
///
/// ```
/// use mount_orchestrator::{ Activation, ComponentDescriptor };
///
/// let descriptor = ComponentDescriptor::new( "gallery" )
/// 	.with_activation( Activation::Deferred )
/// 	.with_default_config( serde_json::json!({ "autoplay": false }))
/// 	.required();
///
/// assert_eq!( descriptor.key(), "gallery" );
/// assert!( descriptor.is_required() );
/// assert_eq!( descriptor.default_config()[ "autoplay" ], false );
/// ```
#[derive( Clone )]
pub struct ComponentDescriptor {
	key: String,
	activation: Activation,
	predicate: Option<Predicate>,
	default_config: Config,
	required: bool,
}

impl std::fmt::Debug for ComponentDescriptor {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "ComponentDescriptor" )
			.field( "key", &self.key )
			.field( "activation", &self.activation )
			.field( "predicate", &self.predicate.as_ref().map(| _ | "<closure>" ))
			.field( "default_config", &self.default_config )
			.field( "required", &self.required )
			.finish()
	}
}

impl ComponentDescriptor {

	/// Creates an immediate, optional descriptor with an empty default configuration.
	pub fn new( key: impl Into<String> ) -> Self {
		Self {
			key: key.into(),
			activation: Activation::default(),
			predicate: None,
			default_config: Config::new(),
			required: false,
		}
	}

	pub fn with_activation( mut self, activation: Activation ) -> Self {
		self.activation = activation ;
		self
	}

	/// Sets a predicate consulted once per discovered mount point before
	/// activation is scheduled. A `false` result skips the mount point silently.
	pub fn with_predicate( mut self, predicate: impl Fn() -> bool + Send + Sync + 'static ) -> Self {
		self.predicate = Some( Arc::new( predicate ));
		self
	}

	/// Sets the configuration handed to every instance unless overridden.
	///
	/// Anything other than a JSON object is treated as an empty configuration.
	pub fn with_default_config( mut self, config: serde_json::Value ) -> Self {
		self.default_config = match config {
			serde_json::Value::Object( map ) => map,
			_ => Config::new(),
		};
		self
	}

	/// Marks the component as expected on every page; a scan that finds no
	/// element for it produces a warning.
	pub fn required( mut self ) -> Self {
		self.required = true ;
		self
	}

	#[inline] pub fn key( &self ) -> &str { &self.key }
	#[inline] pub fn activation( &self ) -> Activation { self.activation }
	#[inline] pub fn default_config( &self ) -> &Config { &self.default_config }
	#[inline] pub fn is_required( &self ) -> bool { self.required }

	/// Evaluates the predicate. Descriptors without one are always eligible.
	///
	/// # Errors
	/// Returns the panic message if the predicate panicked.
	pub fn is_eligible( &self ) -> Result<bool, String> {
		let Some( predicate ) = &self.predicate else { return Ok( true ) };
		std::panic::catch_unwind( AssertUnwindSafe(|| predicate() ))
			.map_err(| payload | panic_message( payload.as_ref() ))
	}

}

struct RegistryInner {
	descriptors: Vec<ComponentDescriptor>,
	index: HashMap<String, usize>,
}

/// Immutable collection of [`ComponentDescriptor`]s with unique keys.
///
/// Cloning is cheap; clones share the same descriptors.
///
/// ```
/// use mount_orchestrator::{ ComponentDescriptor, Registry, RegistryError };
///
/// let err = Registry::new([
/// 	ComponentDescriptor::new( "menu" ),
/// 	ComponentDescriptor::new( "menu" ),
/// ]).unwrap_err();
/// assert_eq!( err, RegistryError::DuplicateKey( "menu".to_string() ));
/// ```
#[derive( Clone )]
pub struct Registry( Arc<RegistryInner> );

impl std::fmt::Debug for Registry {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_list().entries( self.0.descriptors.iter() ).finish()
	}
}

impl Registry {

	/// Builds a registry, rejecting duplicate keys instead of letting the last
	/// entry win.
	///
	/// # Errors
	/// Returns [`RegistryError::DuplicateKey`] for the first repeated key.
	pub fn new( descriptors: impl IntoIterator<Item = ComponentDescriptor> ) -> Result<Self, RegistryError> {

		let descriptors = descriptors.into_iter().collect::<Vec<_>>();
		let mut index = HashMap::with_capacity( descriptors.len() );

		for ( position, descriptor ) in descriptors.iter().enumerate() {
			if index.insert( descriptor.key.clone(), position ).is_some() {
				return Err( RegistryError::DuplicateKey( descriptor.key.clone() ));
			}
		}

		tracing::debug!( components = descriptors.len(), "component registry built" );
		Ok( Self( Arc::new( RegistryInner { descriptors, index })))

	}

	/// Validates `descriptors` and installs them as the process-wide registry.
	///
	/// # Errors
	/// Returns [`RegistryError::DuplicateKey`] if validation fails, or
	/// [`RegistryError::AlreadyInstalled`] if a registry was installed earlier.
	pub fn install( descriptors: impl IntoIterator<Item = ComponentDescriptor> ) -> Result<&'static Self, RegistryError> {
		let registry = Self::new( descriptors )?;
		GLOBAL.set( registry ).map_err(| _ | RegistryError::AlreadyInstalled )?;
		GLOBAL.get().ok_or( RegistryError::AlreadyInstalled )
	}

	/// The registry installed with [`Registry::install`], if any.
	pub fn global() -> Option<&'static Self> { GLOBAL.get() }

	pub fn get( &self, key: &str ) -> Option<&ComponentDescriptor> {
		self.0.index.get( key ).map(| &position | &self.0.descriptors[ position ])
	}

	/// Descriptors in registration order.
	pub fn iter( &self ) -> impl Iterator<Item = &ComponentDescriptor> { self.0.descriptors.iter() }

	/// Descriptors marked [`required`]( ComponentDescriptor::required ).
	pub fn required( &self ) -> impl Iterator<Item = &ComponentDescriptor> {
		self.iter().filter(| descriptor | descriptor.required )
	}

	#[inline] pub fn len( &self ) -> usize { self.0.descriptors.len() }
	#[inline] pub fn is_empty( &self ) -> bool { self.0.descriptors.is_empty() }

}
