//! Read-only records of what the orchestrator did.

use itertools::Itertools ;

use crate::config::Config ;
use crate::executor::MountFailure ;
use crate::mount_point::MountPoint ;



#[derive( Copy, Clone, Eq, PartialEq, Hash, Debug )]
pub enum Outcome {
	Success,
	Failure,
}

/// Outcome of one executed mount point.
#[derive( Debug, Clone, PartialEq )]
pub struct MountResult<E> {
	key: String,
	element: E,
	outcome: Outcome,
	config: Option<Config>,
	error: Option<MountFailure>,
}

impl<E: Clone> MountResult<E> {

	pub(crate) fn mounted( mount_point: &MountPoint<E>, config: Config ) -> Self {
		Self {
			key: mount_point.key().to_string(),
			element: mount_point.element().clone(),
			outcome: Outcome::Success,
			config: Some( config ),
			error: None,
		}
	}

	pub(crate) fn failed( mount_point: &MountPoint<E>, error: MountFailure ) -> Self {
		Self {
			key: mount_point.key().to_string(),
			element: mount_point.element().clone(),
			outcome: Outcome::Failure,
			config: None,
			error: Some( error ),
		}
	}

}

impl<E> MountResult<E> {
	#[inline] pub fn key( &self ) -> &str { &self.key }
	#[inline] pub fn element( &self ) -> &E { &self.element }
	#[inline] pub fn outcome( &self ) -> Outcome { self.outcome }
	#[inline] pub fn is_success( &self ) -> bool { self.outcome == Outcome::Success }
	/// The merged configuration the unit was mounted with. Present only on success.
	#[inline] pub fn config( &self ) -> Option<&Config> { self.config.as_ref() }
	/// Present only on failure.
	#[inline] pub fn error( &self ) -> Option<&MountFailure> { self.error.as_ref() }
}

/// Why a mount point was never activated.
#[derive( Copy, Clone, Eq, PartialEq, Hash, Debug )]
pub enum SkipReason {
	/// No descriptor is registered under the element's key.
	UnknownKey,
	/// The descriptor's predicate returned `false`.
	PredicateRejected,
	/// The descriptor's predicate panicked.
	PredicatePanicked,
}

/// A mount point that never reached the executor.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct Skipped<E> {
	pub key: String,
	pub element: E,
	pub reason: SkipReason,
}

/// A deferred mount point still waiting for visibility.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct Pending<E> {
	pub key: String,
	pub element: E,
}

/// Counts of mount points by final (or current) state.
#[derive( Copy, Clone, Eq, PartialEq, Hash, Debug, Default )]
pub struct MountSummary {
	pub mounted: usize,
	pub failed: usize,
	pub skipped: usize,
	pub pending: usize,
}

/// Snapshot returned by [`Orchestrator::diagnostics`]( crate::Orchestrator::diagnostics ).
#[derive( Debug, Clone )]
pub struct Diagnostics<E> {
	pub results: Vec<MountResult<E>>,
	pub pending: Vec<Pending<E>>,
	pub skipped: Vec<Skipped<E>>,
}

impl<E> Default for Diagnostics<E> {
	fn default() -> Self {
		Self { results: Vec::new(), pending: Vec::new(), skipped: Vec::new() }
	}
}

impl<E> Diagnostics<E> {

	pub fn summary( &self ) -> MountSummary {
		let mounted = self.results.iter().filter(| result | result.is_success() ).count();
		MountSummary {
			mounted,
			failed: self.results.len() - mounted,
			skipped: self.skipped.len(),
			pending: self.pending.len(),
		}
	}

	/// Results for one component key, in completion order.
	pub fn results_for<'a>( &'a self, key: &'a str ) -> impl Iterator<Item = &'a MountResult<E>> + 'a {
		self.results.iter().filter( move | result | result.key == key )
	}

	/// Result counts per component key, ordered by key.
	pub fn outcomes_by_key( &self ) -> Vec<( &str, MountSummary )> {
		self.results.iter()
			.into_group_map_by(| result | result.key.as_str() )
			.into_iter()
			.map(|( key, results )| ( key, MountSummary {
				mounted: results.iter().filter(| result | result.is_success() ).count(),
				failed: results.iter().filter(| result | !result.is_success() ).count(),
				..MountSummary::default()
			}))
			.sorted_by_key(|( key, _ )| *key )
			.collect()
	}

}
