//! The page-level entry point.
//!
//! An [`Orchestrator`] owns every collaborator (registry, page, loader,
//! visibility observer, event-loop spawner, reporter) and wires them into the
//! scan → schedule → execute pipeline.

use std::cell::RefCell ;
use std::rc::{ Rc, Weak };
use futures::FutureExt ;
use futures::future::{ join_all, LocalBoxFuture };
use futures::task::{ LocalSpawn, LocalSpawnExt };

use crate::diagnostics::{ Diagnostics, MountResult, MountSummary, Outcome, Pending, Skipped };
use crate::executor::{ execute, Execution, MountFailure, MountedUnit };
use crate::loader::LoaderAdapter ;
use crate::mount_point::MountPoint ;
use crate::page::{ Page, VisibilityObserver };
use crate::registry::{ ComponentDescriptor, Registry };
use crate::reporter::{ Action, ReportContext, Reporter, Severity };
use crate::scanner::scan ;
use crate::scheduler::{ decide, observe_once, Decision, ResolutionError };
use crate::settings::Settings ;



struct State<E: 'static> {
	diagnostics: Diagnostics<E>,
	mounted: Vec<MountedUnit<E>>,
}

struct Inner<P: Page> {
	registry: Registry,
	page: P,
	loader: Box<dyn LoaderAdapter<P::Element>>,
	observer: Rc<dyn VisibilityObserver<P::Element>>,
	spawner: Box<dyn LocalSpawn>,
	reporter: Reporter,
	settings: Settings,
	state: RefCell<State<P::Element>>,
}

/// Where a deferred mount point's first visibility notification landed.
enum Trigger<E> {
	/// `observe` has not returned yet.
	Registering,
	/// Visible while registering; mounted with the current batch.
	Fired( MountPoint<E>, ComponentDescriptor ),
	/// Later notifications spawn the mount on the event loop.
	Armed,
}

enum Scheduled {
	Skipped,
	Pending,
	Mounting( LocalBoxFuture<'static, Outcome> ),
}

/// Configures and creates an [`Orchestrator`].
#[must_use = "call .build() to create an Orchestrator"]
pub struct OrchestratorBuilder<P: Page> {
	registry: Registry,
	page: P,
	loader: Box<dyn LoaderAdapter<P::Element>>,
	observer: Rc<dyn VisibilityObserver<P::Element>>,
	spawner: Box<dyn LocalSpawn>,
	settings: Option<Settings>,
	reporter: Option<Reporter>,
}

impl<P: Page + 'static> OrchestratorBuilder<P> {

	/// Overrides the default [`Settings`].
	pub fn with_settings( mut self, settings: Settings ) -> Self {
		self.settings = Some( settings );
		self
	}

	/// Uses `reporter` instead of one built from the settings.
	pub fn with_reporter( mut self, reporter: Reporter ) -> Self {
		self.reporter = Some( reporter );
		self
	}

	pub fn build( self ) -> Orchestrator<P> {
		let settings = self.settings.unwrap_or_default();
		let reporter = self.reporter.unwrap_or_else(|| Reporter::new( &settings ));
		Orchestrator( Rc::new( Inner {
			registry: self.registry,
			page: self.page,
			loader: self.loader,
			observer: self.observer,
			spawner: self.spawner,
			reporter,
			settings,
			state: RefCell::new( State { diagnostics: Diagnostics::default(), mounted: Vec::new() }),
		}))
	}

}

/// Discovers, schedules and mounts the components of one page.
///
/// A cheap handle; clones drive the same page. All work happens on a single
/// event loop: immediate mounts run inside the future returned by
/// [`initialize_all_mounts`]( Self::initialize_all_mounts ), deferred mounts
/// are spawned onto the supplied [`LocalSpawn`] when their element first
/// becomes visible.
pub struct Orchestrator<P: Page>( Rc<Inner<P>> );

impl<P: Page> Clone for Orchestrator<P> {
	fn clone( &self ) -> Self { Self( Rc::clone( &self.0 )) }
}

impl<P: Page + 'static> Orchestrator<P> {

	pub fn builder(
		registry: Registry,
		page: P,
		loader: impl LoaderAdapter<P::Element> + 'static,
		observer: impl VisibilityObserver<P::Element> + 'static,
		spawner: impl LocalSpawn + 'static,
	) -> OrchestratorBuilder<P> {
		OrchestratorBuilder {
			registry,
			page,
			loader: Box::new( loader ),
			observer: Rc::new( observer ),
			spawner: Box::new( spawner ),
			settings: None,
			reporter: None,
		}
	}

	#[inline] pub fn registry( &self ) -> &Registry { &self.0.registry }
	#[inline] pub fn page( &self ) -> &P { &self.0.page }
	#[inline] pub fn reporter( &self ) -> &Reporter { &self.0.reporter }
	#[inline] pub fn settings( &self ) -> &Settings { &self.0.settings }

	/// Scans `root` (the whole document when `None`), schedules every newly
	/// discovered mount point, and resolves once all immediate mounts have
	/// settled.
	///
	/// Scanning and scheduling happen before this returns, so elements are
	/// claimed and deferred observations registered even if the future is
	/// dropped. Immediate mounts only make progress while the future is polled.
	/// May be called again for injected subtrees; already claimed elements are
	/// skipped and `required` components are checked again for each call.
	pub fn initialize_all_mounts( &self, root: Option<&P::Element> ) -> LocalBoxFuture<'static, MountSummary> {
		let inner = &self.0 ;
		let mount_points = scan( &inner.page, root, &inner.settings, &inner.reporter ).collect::<Vec<_>>();
		tracing::debug!( discovered = mount_points.len(), "component scan complete" );
		self.report_absent_required( &mount_points );
		self.schedule_all( mount_points )
	}

	/// Schedules mount points that were discovered elsewhere.
	///
	/// Immediate mount points are dispatched in iteration order, together with
	/// deferred ones the observer reports visible while they are registered.
	/// The returned future resolves once all of them have settled, with counts
	/// for this batch only.
	pub fn schedule_all( &self, mount_points: impl IntoIterator<Item = MountPoint<P::Element>> ) -> LocalBoxFuture<'static, MountSummary> {

		let mut summary = MountSummary::default();
		let mut immediate = Vec::new();

		for mount_point in mount_points {
			match self.schedule( mount_point ) {
				Scheduled::Skipped => summary.skipped += 1,
				Scheduled::Pending => summary.pending += 1,
				Scheduled::Mounting( execution ) => immediate.push( execution ),
			}
		}

		async move {
			for outcome in join_all( immediate ).await {
				match outcome {
					Outcome::Success => summary.mounted += 1,
					Outcome::Failure => summary.failed += 1,
				}
			}
			summary
		}.boxed_local()

	}

	/// Snapshot of every result, pending and skipped mount point so far.
	pub fn diagnostics( &self ) -> Diagnostics<P::Element> {
		self.0.state.borrow().diagnostics.clone()
	}

	/// Unmounts every mounted unit, most recent first. Failures are reported
	/// and skipped. Returns how many units unmounted cleanly.
	pub fn unmount_all( &self ) -> usize {
		let mounted = std::mem::take( &mut self.0.state.borrow_mut().mounted );
		mounted.into_iter().rev()
			.map(| unit | unit.unmount( &self.0.reporter ))
			.filter(| clean | *clean )
			.count()
	}

	fn schedule( &self, mut mount_point: MountPoint<P::Element> ) -> Scheduled {
		let inner = &self.0 ;
		match decide( &mut mount_point, &inner.registry, &inner.reporter ) {
			Decision::Skip( reason ) => {
				let skipped = Skipped { key: mount_point.key().to_string(), element: mount_point.element().clone(), reason };
				inner.state.borrow_mut().diagnostics.skipped.push( skipped );
				Scheduled::Skipped
			},
			Decision::MountNow( descriptor ) => {
				Scheduled::Mounting( self.clone().run( mount_point, descriptor.clone() ).boxed_local() )
			},
			Decision::AwaitVisibility( descriptor ) => {
				let descriptor = descriptor.clone();
				let element = mount_point.element().clone();
				inner.state.borrow_mut().diagnostics.pending.push( Pending { key: mount_point.key().to_string(), element: element.clone() });

				let trigger = Rc::new( RefCell::new( Trigger::Registering ));
				let callback_trigger = Rc::clone( &trigger );
				let weak: Weak<Inner<P>> = Rc::downgrade( inner );
				observe_once( &inner.observer, &element, move || {
					let registering = matches!( *callback_trigger.borrow(), Trigger::Registering );
					match registering {
						true => *callback_trigger.borrow_mut() = Trigger::Fired( mount_point, descriptor ),
						false => if let Some( inner ) = weak.upgrade() { Orchestrator( inner ).activate( mount_point, descriptor ) },
					}
				});

				let fired = std::mem::replace( &mut *trigger.borrow_mut(), Trigger::Armed );
				match fired {
					Trigger::Fired( mount_point, descriptor ) => {
						inner.state.borrow_mut().diagnostics.pending.retain(| pending | pending.element != element );
						Scheduled::Mounting( self.clone().run( mount_point, descriptor ).boxed_local() )
					},
					Trigger::Registering | Trigger::Armed => Scheduled::Pending,
				}
			},
		}
	}

	fn activate( &self, mount_point: MountPoint<P::Element>, descriptor: ComponentDescriptor ) {
		let inner = &self.0 ;
		inner.state.borrow_mut().diagnostics.pending.retain(| pending | &pending.element != mount_point.element() );
		let unscheduled = mount_point.clone();
		let task = self.clone().run( mount_point, descriptor ).map(| _ | ());
		if let Err( err ) = inner.spawner.spawn_local( task ) {
			inner.reporter.report( &err, ReportContext::for_component( unscheduled.key(), Action::Spawn ), Severity::High );
			let result = MountResult::failed( &unscheduled, MountFailure::NotScheduled( err.to_string() ));
			inner.state.borrow_mut().diagnostics.results.push( result );
		}
	}

	async fn run( self, mut mount_point: MountPoint<P::Element>, descriptor: ComponentDescriptor ) -> Outcome {
		let inner = &self.0 ;
		let Execution { result, mounted } = execute( &mut mount_point, &descriptor, inner.loader.as_ref(), &inner.reporter ).await ;
		let outcome = result.outcome();
		let mut state = inner.state.borrow_mut();
		state.diagnostics.results.push( result );
		state.mounted.extend( mounted );
		outcome
	}

	fn report_absent_required( &self, mount_points: &[MountPoint<P::Element>] ) {
		let inner = &self.0 ;
		inner.registry.required()
			.filter(| descriptor | !mount_points.iter().any(| mount_point | mount_point.key() == descriptor.key() ))
			.for_each(| descriptor | inner.reporter.report(
				&ResolutionError::RequiredAbsent( descriptor.key().to_string() ),
				ReportContext::for_component( descriptor.key(), Action::Discover ),
				Severity::Medium,
			));
	}

}
