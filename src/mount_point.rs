//! Mount points and their lifecycle.
//!
//! A [`MountPoint`] pairs one element with the component key it names and its
//! parsed per-instance configuration. Its [`MountState`] only moves forward.

use crate::config::Config ;



/// Lifecycle of a [`MountPoint`].
///
/// Transitions only move forward:
///
/// ```text
/// Discovered ─┬─> Pending ──> Mounting ─┬─> Mounted
///             ├─> Mounting              └─> Failed
///             └─> Skipped
/// ```
#[derive( Copy, Clone, Eq, PartialEq, Hash, Debug )]
pub enum MountState {
	Discovered,
	/// Deferred, waiting for the element to become visible.
	Pending,
	Mounting,
	Mounted,
	Failed,
	Skipped,
}

impl MountState {

	pub fn can_transition_to( self, next: MountState ) -> bool {
		matches!(( self, next ),
			( Self::Discovered, Self::Pending )
			| ( Self::Discovered, Self::Mounting )
			| ( Self::Discovered, Self::Skipped )
			| ( Self::Pending, Self::Mounting )
			| ( Self::Mounting, Self::Mounted )
			| ( Self::Mounting, Self::Failed )
		)
	}

	/// `Mounted`, `Failed` and `Skipped` are final.
	pub fn is_terminal( self ) -> bool {
		matches!( self, Self::Mounted | Self::Failed | Self::Skipped )
	}

}

impl std::fmt::Display for MountState {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result { write!( f, "{:?}", self )}
}

/// One element on the page where a component instance may be activated.
///
/// Produced by [`scan`]( crate::scan ) or built directly with [`MountPoint::new`]
/// to drive the scheduler without a real page.
#[derive( Debug, Clone )]
pub struct MountPoint<E> {
	element: E,
	key: String,
	instance_config: Config,
	state: MountState,
}

impl<E> MountPoint<E> {

	pub fn new( element: E, key: impl Into<String>, instance_config: Config ) -> Self {
		Self { element, key: key.into(), instance_config, state: MountState::Discovered }
	}

	#[inline] pub fn element( &self ) -> &E { &self.element }
	#[inline] pub fn key( &self ) -> &str { &self.key }
	#[inline] pub fn instance_config( &self ) -> &Config { &self.instance_config }
	#[inline] pub fn state( &self ) -> MountState { self.state }

	/// Moves to `next` if the transition is allowed. Returns whether it was.
	pub fn advance( &mut self, next: MountState ) -> bool {
		let allowed = self.state.can_transition_to( next );
		match allowed {
			true => {
				tracing::trace!( component = %self.key, from = %self.state, to = %next, "mount point transition" );
				self.state = next ;
			},
			false => tracing::debug!( component = %self.key, from = %self.state, to = %next, "rejected mount point transition" ),
		}
		allowed
	}

}
