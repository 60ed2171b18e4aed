//! Activation decisions.
//!
//! [`decide`] resolves a freshly discovered mount point against the registry
//! and moves it to `Skipped`, `Mounting` or `Pending`. [`observe_once`] turns a
//! repeating visibility observer into a one-shot trigger: whatever the observer
//! does afterwards, the activation callback runs at most once.

use std::cell::RefCell ;
use std::rc::{ Rc, Weak };
use thiserror::Error ;

use crate::diagnostics::SkipReason ;
use crate::mount_point::{ MountPoint, MountState };
use crate::page::{ ObservationId, VisibilityObserver };
use crate::registry::{ Activation, ComponentDescriptor, Registry };
use crate::reporter::{ Action, ReportContext, Reporter, Severity };



/// Problems resolving discovered markup against the registry.
#[derive( Error, Debug, Clone, PartialEq, Eq )]
pub enum ResolutionError {
	/// An element names a component that is not registered.
	#[error( "No component registered under key {0:?}" )] UnknownKey( String ),
	/// A required component has no element on the scanned page.
	#[error( "Required component {0:?} was not found on the page" )] RequiredAbsent( String ),
	/// The descriptor's predicate panicked.
	#[error( "Predicate of component {key:?} panicked: {message}" )]
	PredicatePanicked { key: String, message: String },
}

/// What to do with a discovered mount point.
#[derive( Debug, Clone, Copy )]
pub enum Decision<'r> {
	/// Never activate. The mount point is now `Skipped`.
	Skip( SkipReason ),
	/// Execute right away. The mount point is now `Mounting`.
	MountNow( &'r ComponentDescriptor ),
	/// Execute on first visibility. The mount point is now `Pending`.
	AwaitVisibility( &'r ComponentDescriptor ),
}

/// Resolves `mount_point` and advances its state to match the decision.
///
/// Unknown keys are reported at [`Severity::Low`]; a rejecting predicate is
/// routine and reported nowhere. A panicking predicate skips the mount point
/// and is reported at [`Severity::High`] for required descriptors and
/// [`Severity::Medium`] otherwise.
pub fn decide<'r, E>( mount_point: &mut MountPoint<E>, registry: &'r Registry, reporter: &Reporter ) -> Decision<'r> {

	let Some( descriptor ) = registry.get( mount_point.key() ) else {
		reporter.report(
			&ResolutionError::UnknownKey( mount_point.key().to_string() ),
			ReportContext::for_component( mount_point.key(), Action::Resolve ),
			Severity::Low,
		);
		mount_point.advance( MountState::Skipped );
		return Decision::Skip( SkipReason::UnknownKey );
	};

	match descriptor.is_eligible() {
		Ok( true ) => {},
		Ok( false ) => {
			tracing::debug!( component = %descriptor.key(), "predicate rejected mount point" );
			mount_point.advance( MountState::Skipped );
			return Decision::Skip( SkipReason::PredicateRejected );
		},
		Err( message ) => {
			reporter.report(
				&ResolutionError::PredicatePanicked { key: descriptor.key().to_string(), message },
				ReportContext::for_component( descriptor.key(), Action::Resolve ),
				match descriptor.is_required() { true => Severity::High, false => Severity::Medium },
			);
			mount_point.advance( MountState::Skipped );
			return Decision::Skip( SkipReason::PredicatePanicked );
		},
	}

	match descriptor.activation() {
		Activation::Immediate => {
			mount_point.advance( MountState::Mounting );
			Decision::MountNow( descriptor )
		},
		Activation::Deferred | Activation::Conditional => {
			mount_point.advance( MountState::Pending );
			Decision::AwaitVisibility( descriptor )
		},
	}

}

struct OnceGuard {
	id: Option<ObservationId>,
	on_visible: Option<Box<dyn FnOnce()>>,
}

/// Registers a single observation of `element` that calls `on_visible` the
/// first time the intersection ratio is above zero, then unobserves.
///
/// Further notifications, including ones delivered before the observer has
/// processed the unobserve, are ignored.
pub fn observe_once<E: 'static>(
	observer: &Rc<dyn VisibilityObserver<E>>,
	element: &E,
	on_visible: impl FnOnce() + 'static,
) -> ObservationId {

	let guard = Rc::new( RefCell::new( OnceGuard { id: None, on_visible: Some( Box::new( on_visible )) }));
	let weak_observer: Weak<dyn VisibilityObserver<E>> = Rc::downgrade( observer );
	let callback_guard = Rc::clone( &guard );

	let id = observer.observe( element, Box::new( move | ratio | {
		if ratio <= 0.0 { return }
		let ( id, on_visible ) = {
			let mut guard = callback_guard.borrow_mut();
			( guard.id, guard.on_visible.take() )
		};
		let Some( on_visible ) = on_visible else { return };
		if let ( Some( id ), Some( observer )) = ( id, weak_observer.upgrade() ) { observer.unobserve( id ) }
		on_visible();
	}));

	// Fired synchronously inside `observe`, before the id was known.
	let already_fired = {
		let mut guard = guard.borrow_mut();
		guard.id = Some( id );
		guard.on_visible.is_none()
	};
	if already_fired { observer.unobserve( id ) }

	id

}
