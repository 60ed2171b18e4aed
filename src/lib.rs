//! Discovers interactive components in server-rendered markup, decides when each
//! one should be activated, and mounts it with its configuration, making sure a
//! single broken component never takes the rest of the page down with it.
//!
//! # Core Concepts
//!
//! - [`Registry`]: The static list of [`ComponentDescriptor`]s. Each descriptor
//! 	names a component key, its [`Activation`] mode, an optional eligibility
//! 	predicate, a default configuration, and whether the page must contain it.
//! 	Duplicate keys are rejected when the registry is built.
//!
//! - [`Page`]: Read/write access to element attributes in the live document. The
//! 	markup contract is one attribute naming the component key and an optional
//! 	attribute holding a JSON configuration object (see [`Settings`]).
//!
//! - [`scan`]: Walks the page once and yields [`MountPoint`]s, claiming each
//! 	element so that scanning an overlapping subtree later finds nothing new.
//!
//! - [`scheduler`]: Turns each mount point into a decision: skip it, mount it
//! 	now, or mount it the first time its element becomes visible according to
//! 	a [`VisibilityObserver`].
//!
//! - [`execute`]: Asks the [`LoaderAdapter`] for a [`MountableUnit`], merges
//! 	configuration ([`config::merge`], shallow) and mounts it. Rejections and
//! 	panics become a failed [`MountResult`].
//!
//! - [`Reporter`]: Captures every warning and failure with a [`Severity`] and a
//! 	[`ReportContext`]. Verbose in development, quiet and forwarding to an
//! 	[`ExternalSink`] in production.
//!
//! - [`Orchestrator`]: Wires everything together behind
//! 	[`initialize_all_mounts`]( Orchestrator::initialize_all_mounts ) and
//! 	[`diagnostics`]( Orchestrator::diagnostics ).
//!
//! # Execution Model
//!
//! Everything runs on one cooperative event loop. Futures are not `Send`; the
//! orchestrator is given a [`LocalSpawn`]( futures::task::LocalSpawn ) to run
//! deferred mounts and error-sink deliveries on. Immediate components are
//! dispatched in document order but may finish in any order. Deferred
//! components activate in whatever order they become visible.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell ;
//! use std::collections::HashMap ;
//! use futures::executor::LocalPool ;
//! use futures::future::{ FutureExt, LocalBoxFuture };
//! use mount_orchestrator::{
//! 	ComponentDescriptor, Config, Environment, IntersectionCallback, LoadError,
//! 	LoaderAdapter, MountError, MountableUnit, ObservationId, Orchestrator, Page,
//! 	Registry, Settings, VisibilityObserver,
//! };
//!
//! // A page of numbered elements with attributes.
//! #[derive( Default )]
//! struct Document { attributes: RefCell<Vec<HashMap<String, String>>> }
//!
//! impl Page for Document {
//! 	type Element = usize ;
//! 	fn elements_with_attribute( &self, _root: Option<&usize>, attribute: &str ) -> Vec<usize> {
//! 		self.attributes.borrow().iter().enumerate()
//! 			.filter(|( _, attributes )| attributes.contains_key( attribute ))
//! 			.map(|( element, _ )| element )
//! 			.collect()
//! 	}
//! 	fn attribute( &self, element: &usize, name: &str ) -> Option<String> {
//! 		self.attributes.borrow()[ *element ].get( name ).cloned()
//! 	}
//! 	fn set_attribute( &self, element: &usize, name: &str, value: &str ) {
//! 		self.attributes.borrow_mut()[ *element ].insert( name.into(), value.into() );
//! 	}
//! }
//!
//! // Nothing on this page is ever deferred.
//! struct NeverVisible ;
//! impl VisibilityObserver<usize> for NeverVisible {
//! 	fn observe( &self, _: &usize, _: IntersectionCallback ) -> ObservationId { ObservationId( 0 ) }
//! 	fn unobserve( &self, _: ObservationId ) {}
//! }
//!
//! struct Greeting ;
//! impl MountableUnit<usize> for Greeting {
//! 	fn mount( &mut self, _: &usize, config: &Config ) -> Result<(), MountError> {
//! 		assert_eq!( config[ "greeting" ], "hello" );
//! 		Ok(())
//! 	}
//! }
//!
//! struct Loader ;
//! impl LoaderAdapter<usize> for Loader {
//! 	fn load<'a>( &'a self, key: &'a str ) -> LocalBoxFuture<'a, Result<Box<dyn MountableUnit<usize>>, LoadError>> {
//! 		async move { match key {
//! 			"greeting" => Ok( Box::new( Greeting ) as Box<dyn MountableUnit<usize>> ),
//! 			_ => Err( LoadError::Unavailable { key: key.into(), reason: "no such chunk".into() }),
//! 		}}.boxed_local()
//! 	}
//! }
//!
//! let document = Document::default();
//! document.attributes.borrow_mut().push( HashMap::from([
//! 	( "data-component".to_string(), "greeting".to_string() ),
//! ]));
//!
//! let registry = Registry::new([
//! 	ComponentDescriptor::new( "greeting" )
//! 		.with_default_config( serde_json::json!({ "greeting": "hello" })),
//! ])?;
//!
//! let mut pool = LocalPool::new();
//! let orchestrator = Orchestrator::builder( registry, document, Loader, NeverVisible, pool.spawner() )
//! 	.with_settings( Settings::default().with_environment( Environment::Production ))
//! 	.build();
//!
//! let summary = pool.run_until( orchestrator.initialize_all_mounts( None ));
//! assert_eq!( summary.mounted, 1 );
//! assert!( orchestrator.diagnostics().results[ 0 ].is_success() );
//! # Ok::<(), mount_orchestrator::RegistryError>(())
//! ```

pub mod config ;
mod diagnostics ;
mod executor ;
mod loader ;
mod mount_point ;
mod orchestrator ;
mod page ;
mod registry ;
mod reporter ;
mod scanner ;
pub mod scheduler ;
mod settings ;

pub use config::{ Config, ConfigError };
pub use diagnostics::{ Diagnostics, MountResult, MountSummary, Outcome, Pending, SkipReason, Skipped };
pub use executor::{ execute, Execution, MountFailure, MountedUnit };
pub use loader::{ LoadError, LoaderAdapter, MountError, MountableUnit };
pub use mount_point::{ MountPoint, MountState };
pub use orchestrator::{ Orchestrator, OrchestratorBuilder };
pub use page::{ IntersectionCallback, ObservationId, Page, VisibilityObserver };
pub use registry::{ Activation, ComponentDescriptor, Registry, RegistryError };
pub use reporter::{ Action, ExternalSink, Report, ReportContext, Reporter, Severity, SinkError };
pub use scanner::{ scan, Scan };
pub use scheduler::{ Decision, ResolutionError };
pub use settings::{ Environment, Settings, DEFAULT_HISTORY_LIMIT, ENVIRONMENT_VAR };
