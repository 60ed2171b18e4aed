//! Loading and mounting contracts supplied by the build layer.
//!
//! A [`LoaderAdapter`] turns a component key into a [`MountableUnit`]. How that
//! happens (dynamic import, a lookup table, a network fetch) is entirely up to
//! the adapter; the orchestrator only awaits it and handles rejection.

use futures::future::LocalBoxFuture ;
use thiserror::Error ;

use crate::config::Config ;



/// Errors a [`LoaderAdapter`] may reject with.
#[derive( Error, Debug, Clone, PartialEq, Eq )]
pub enum LoadError {
	/// The unit could not be produced (missing chunk, network error, ...).
	#[error( "Component {key} unavailable: {reason}" )]
	Unavailable { key: String, reason: String },
	/// The adapter gave up waiting for the unit.
	#[error( "Timed out loading component {0}" )] TimedOut( String ),
	/// The adapter panicked while loading.
	#[error( "Loader panicked: {0}" )] Panicked( String ),
}

/// Errors raised while attaching a unit to its element.
#[derive( Error, Debug, Clone, PartialEq, Eq )]
pub enum MountError {
	/// The unit refused to mount.
	#[error( "Mount rejected: {0}" )] Rejected( String ),
	/// The unit panicked during construction or initial render.
	#[error( "Mount panicked: {0}" )] Panicked( String ),
}

/// Anything that can attach itself to an element given a configuration.
pub trait MountableUnit<E> {
	/// Attaches to `element` with the merged configuration.
	///
	/// # Errors
	/// Returns [`MountError`] if the unit cannot render into `element`.
	fn mount( &mut self, element: &E, config: &Config ) -> Result<(), MountError> ;

	/// Releases whatever [`mount`]( Self::mount ) acquired. Optional.
	fn unmount( &mut self, _element: &E ) {}
}

/// Resolves component keys to mountable units.
///
/// Futures are not required to be `Send`; loading runs on the page's single
/// event loop.
pub trait LoaderAdapter<E> {
	fn load<'a>( &'a self, key: &'a str ) -> LocalBoxFuture<'a, Result<Box<dyn MountableUnit<E>>, LoadError>> ;
}

