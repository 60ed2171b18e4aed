//! Loading and mounting a single mount point.
//!
//! [`execute`] is the failure boundary of the orchestrator: a rejected load, a
//! refused mount or a panic anywhere inside the loader or the unit ends as a
//! failed [`MountResult`], never as an error or unwind escaping to the caller.

use std::any::Any ;
use std::panic::AssertUnwindSafe ;
use futures::FutureExt ;
use thiserror::Error ;

use crate::config ;
use crate::diagnostics::MountResult ;
use crate::loader::{ LoadError, LoaderAdapter, MountError, MountableUnit };
use crate::mount_point::{ MountPoint, MountState };
use crate::registry::ComponentDescriptor ;
use crate::reporter::{ Action, ReportContext, Reporter, Severity };



/// Why a mount point ended up [`Failed`]( MountState::Failed ).
#[derive( Error, Debug, Clone, PartialEq, Eq )]
pub enum MountFailure {
	#[error( transparent )] Load( #[from] LoadError ),
	#[error( transparent )] Mount( #[from] MountError ),
	/// The mount point was already activated or settled.
	#[error( "Mount point cannot be activated from state {0}" )] NotActivatable( MountState ),
	/// The deferred mount could not be handed to the event loop.
	#[error( "Deferred mount could not be scheduled: {0}" )] NotScheduled( String ),
}

/// A unit attached to its element, kept for teardown.
pub struct MountedUnit<E: 'static> {
	key: String,
	element: E,
	unit: Box<dyn MountableUnit<E>>,
}

impl<E: std::fmt::Debug + 'static> std::fmt::Debug for MountedUnit<E> {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "MountedUnit" )
			.field( "key", &self.key )
			.field( "element", &self.element )
			.finish_non_exhaustive()
	}
}

impl<E: 'static> MountedUnit<E> {

	#[inline] pub fn key( &self ) -> &str { &self.key }
	#[inline] pub fn element( &self ) -> &E { &self.element }

	/// Best-effort release. A panicking `unmount` is reported at [`Severity::Low`]
	/// and swallowed. Returns whether the unit unmounted cleanly.
	pub fn unmount( mut self, reporter: &Reporter ) -> bool {
		let Self { key, element, unit } = &mut self ;
		match std::panic::catch_unwind( AssertUnwindSafe(|| unit.unmount( element ))) {
			Ok(()) => {
				tracing::debug!( component = %key, "component unmounted" );
				true
			},
			Err( payload ) => {
				reporter.report(
					&MountError::Panicked( panic_message( payload.as_ref() )),
					ReportContext::for_component( key.as_str(), Action::Unmount ),
					Severity::Low,
				);
				false
			},
		}
	}

}

/// Result of [`execute`]: the outcome record and, on success, the live unit.
pub struct Execution<E: 'static> {
	pub result: MountResult<E>,
	pub mounted: Option<MountedUnit<E>>,
}

/// Loads the unit for `mount_point`, merges configuration and mounts it.
///
/// The mount point is moved to [`MountState::Mounting`] first; a mount point
/// that cannot make that transition is not loaded at all. Failures are
/// reported at [`Severity::High`] for required descriptors and
/// [`Severity::Medium`] otherwise.
pub async fn execute<E: Clone + 'static>(
	mount_point: &mut MountPoint<E>,
	descriptor: &ComponentDescriptor,
	loader: &dyn LoaderAdapter<E>,
	reporter: &Reporter,
) -> Execution<E> {

	if mount_point.state() != MountState::Mounting && !mount_point.advance( MountState::Mounting ) {
		let failure = MountFailure::NotActivatable( mount_point.state() );
		return Execution { result: MountResult::failed( mount_point, failure ), mounted: None };
	}

	let severity = match descriptor.is_required() {
		true => Severity::High,
		false => Severity::Medium,
	};

	let mut unit = match load( loader, mount_point.key() ).await {
		Ok( unit ) => unit,
		Err( err ) => {
			reporter.report( &err, ReportContext::for_component( mount_point.key(), Action::Load ), severity );
			mount_point.advance( MountState::Failed );
			return Execution { result: MountResult::failed( mount_point, err.into() ), mounted: None };
		},
	};

	let merged = config::merge( descriptor.default_config(), mount_point.instance_config() );
	let element = mount_point.element().clone();
	let mounted = std::panic::catch_unwind( AssertUnwindSafe(|| unit.mount( &element, &merged )))
		.unwrap_or_else(| payload | Err( MountError::Panicked( panic_message( payload.as_ref() ))));

	match mounted {
		Ok(()) => {
			mount_point.advance( MountState::Mounted );
			tracing::debug!( component = %mount_point.key(), "component mounted" );
			Execution {
				result: MountResult::mounted( mount_point, merged ),
				mounted: Some( MountedUnit { key: mount_point.key().to_string(), element, unit }),
			}
		},
		Err( err ) => {
			reporter.report( &err, ReportContext::for_component( mount_point.key(), Action::Mount ), severity );
			mount_point.advance( MountState::Failed );
			Execution { result: MountResult::failed( mount_point, err.into() ), mounted: None }
		},
	}

}

async fn load<E: 'static>( loader: &dyn LoaderAdapter<E>, key: &str ) -> Result<Box<dyn MountableUnit<E>>, LoadError> {
	let pending = std::panic::catch_unwind( AssertUnwindSafe(|| loader.load( key )))
		.map_err(| payload | LoadError::Panicked( panic_message( payload.as_ref() )))?;
	AssertUnwindSafe( pending ).catch_unwind().await
		.unwrap_or_else(| payload | Err( LoadError::Panicked( panic_message( payload.as_ref() ))))
}

pub(crate) fn panic_message( payload: &( dyn Any + Send )) -> String {
	payload.downcast_ref::<&str>().map(| message | ( *message ).to_string() )
		.or_else(|| payload.downcast_ref::<String>().cloned() )
		.unwrap_or_else(|| "unknown panic".to_string() )
}

