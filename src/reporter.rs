//! Centralised failure and warning capture.
//!
//! Every recoverable problem in a mount point's pipeline ends up in
//! [`Reporter::report`]. What happens next depends on the [`Environment`]:
//! development logs everything verbosely, production stays quiet and forwards
//! serious reports to an [`ExternalSink`] without ever waiting on it.

use std::cell::{ Cell, RefCell };
use std::collections::VecDeque ;
use std::panic::AssertUnwindSafe ;
use std::rc::Rc ;
use futures::FutureExt ;
use futures::future::LocalBoxFuture ;
use futures::task::{ LocalSpawn, LocalSpawnExt };
use serde::Serialize ;
use thiserror::Error ;

use crate::config::Config ;
use crate::settings::{ Environment, Settings };



/// How serious a report is. Ordered from least to most severe.
#[derive( Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize )]
#[serde( rename_all = "lowercase" )]
pub enum Severity {
	Low,
	Medium,
	High,
	Critical,
}

impl std::fmt::Display for Severity {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result {
		match self {
			Self::Low => write!( f, "LOW" ),
			Self::Medium => write!( f, "MEDIUM" ),
			Self::High => write!( f, "HIGH" ),
			Self::Critical => write!( f, "CRITICAL" ),
		}
	}
}

/// The pipeline stage a report originates from.
#[derive( Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize )]
#[serde( rename_all = "kebab-case" )]
pub enum Action {
	/// Scanning the page for a component that should be present.
	Discover,
	/// Parsing a per-instance configuration attribute.
	ParseConfig,
	/// Resolving a component key against the registry.
	Resolve,
	/// Awaiting the loader adapter.
	Load,
	/// Attaching the loaded unit to its element.
	Mount,
	/// Releasing a mounted unit.
	Unmount,
	/// Handing deferred work to the event loop.
	Spawn,
}

impl std::fmt::Display for Action {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result {
		f.write_str( match self {
			Self::Discover => "discover",
			Self::ParseConfig => "parse-config",
			Self::Resolve => "resolve",
			Self::Load => "load",
			Self::Mount => "mount",
			Self::Unmount => "unmount",
			Self::Spawn => "spawn",
		})
	}
}

/// Where a report came from: component key, action and free-form metadata.
#[derive( Clone, Debug, PartialEq, Serialize )]
pub struct ReportContext {
	component: Option<String>,
	action: Action,
	metadata: Config,
}

impl ReportContext {

	pub fn new( action: Action ) -> Self {
		Self { component: None, action, metadata: Config::new() }
	}

	pub fn for_component( key: impl Into<String>, action: Action ) -> Self {
		Self { component: Some( key.into() ), action, metadata: Config::new() }
	}

	pub fn with_metadata( mut self, key: impl Into<String>, value: impl Into<serde_json::Value> ) -> Self {
		self.metadata.insert( key.into(), value.into() );
		self
	}

	#[inline] pub fn component( &self ) -> Option<&str> { self.component.as_deref() }
	#[inline] pub fn action( &self ) -> Action { self.action }
	#[inline] pub fn metadata( &self ) -> &Config { &self.metadata }

}

/// One captured report.
#[derive( Clone, Debug, PartialEq, Serialize )]
pub struct Report {
	message: String,
	causes: Vec<String>,
	context: ReportContext,
	severity: Severity,
}

impl Report {
	#[inline] pub fn message( &self ) -> &str { &self.message }
	/// Messages of the error's `source()` chain, outermost first.
	#[inline] pub fn causes( &self ) -> &[String] { &self.causes }
	#[inline] pub fn context( &self ) -> &ReportContext { &self.context }
	#[inline] pub fn severity( &self ) -> Severity { self.severity }
}

/// Failure of an [`ExternalSink`]. Never surfaced to callers of [`Reporter::report`].
#[derive( Error, Debug, Clone, PartialEq, Eq )]
pub enum SinkError {
	#[error( "Sink unavailable: {0}" )] Unavailable( String ),
	#[error( "Sink panicked" )] Panicked,
}

/// Remote error tracking endpoint.
///
/// The returned future is spawned and never awaited by the reporter.
pub trait ExternalSink {
	fn send( &self, report: Report ) -> LocalBoxFuture<'static, Result<(), SinkError>> ;
}

/// Synchronous, non-blocking report capture.
///
/// Cloning is cheap; clones share history and sink state.
#[derive( Clone )]
pub struct Reporter {
	environment: Environment,
	forward_threshold: Severity,
	sink: Option<Rc<dyn ExternalSink>>,
	spawner: Option<Rc<dyn LocalSpawn>>,
	history: Rc<RefCell<VecDeque<Report>>>,
	history_limit: usize,
	sink_failure_logged: Rc<Cell<bool>>,
}

impl std::fmt::Debug for Reporter {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "Reporter" )
			.field( "environment", &self.environment )
			.field( "forward_threshold", &self.forward_threshold )
			.field( "sink", &self.sink.as_ref().map(| _ | "<sink>" ))
			.field( "reports", &self.history.borrow().len() )
			.finish_non_exhaustive()
	}
}

impl Reporter {

	pub fn new( settings: &Settings ) -> Self {
		Self {
			environment: settings.environment(),
			forward_threshold: settings.forward_threshold(),
			sink: None,
			spawner: None,
			history: Rc::new( RefCell::new( VecDeque::new() )),
			history_limit: settings.history_limit(),
			sink_failure_logged: Rc::new( Cell::new( false )),
		}
	}

	/// Forwards production reports at or above the threshold to `sink`, running
	/// each delivery on `spawner`.
	pub fn with_sink( mut self, sink: impl ExternalSink + 'static, spawner: impl LocalSpawn + 'static ) -> Self {
		self.sink = Some( Rc::new( sink ));
		self.spawner = Some( Rc::new( spawner ));
		self
	}

	#[inline] pub fn environment( &self ) -> Environment { self.environment }

	/// The most recent reports, oldest first, up to
	/// [`Settings::history_limit`].
	pub fn reports( &self ) -> Vec<Report> { self.history.borrow().iter().cloned().collect() }

	/// Captures `error`. Returns immediately; never panics on sink failure.
	pub fn report( &self, error: &( dyn std::error::Error + 'static ), context: ReportContext, severity: Severity ) {

		let causes = std::iter::successors( error.source(), | cause | cause.source() )
			.map( ToString::to_string )
			.collect();
		let report = Report { message: error.to_string(), causes, context, severity };

		match self.environment {
			Environment::Development => log_verbose( &report ),
			Environment::Production => tracing::debug!(
				severity = %report.severity,
				action = %report.context.action,
				"component report suppressed",
			),
		}

		if self.environment == Environment::Production && severity >= self.forward_threshold {
			self.forward( report.clone() );
		}

		self.record( report );

	}

	fn record( &self, report: Report ) {
		if self.history_limit == 0 { return }
		let mut history = self.history.borrow_mut();
		if history.len() == self.history_limit { history.pop_front(); }
		history.push_back( report );
	}

	fn forward( &self, report: Report ) {

		let ( Some( sink ), Some( spawner )) = ( &self.sink, &self.spawner ) else { return };

		let delivery = match std::panic::catch_unwind( AssertUnwindSafe(|| sink.send( report ))) {
			Ok( delivery ) => delivery,
			Err( _ ) => return self.sink_failed( &SinkError::Panicked ),
		};

		let logged = Rc::clone( &self.sink_failure_logged );
		let task = async move {
			let outcome = AssertUnwindSafe( delivery ).catch_unwind().await
				.unwrap_or( Err( SinkError::Panicked ));
			if let Err( err ) = outcome { log_sink_failure_once( &logged, &err ) }
		};

		if let Err( err ) = spawner.spawn_local( task ) {
			self.sink_failed( &SinkError::Unavailable( err.to_string() ));
		}

	}

	fn sink_failed( &self, err: &SinkError ) { log_sink_failure_once( &self.sink_failure_logged, err ) }

}

fn log_sink_failure_once( logged: &Cell<bool>, err: &SinkError ) {
	if !logged.replace( true ) {
		tracing::warn!( error = %err, "error sink failed; further sink failures are ignored" );
	}
}

fn log_verbose( report: &Report ) {
	let component = report.context.component.as_deref().unwrap_or( "-" );
	let action = report.context.action ;
	let metadata = serde_json::Value::Object( report.context.metadata.clone() );
	let causes = &report.causes ;
	match report.severity {
		Severity::Low => tracing::info!( component, %action, %metadata, ?causes, severity = %report.severity, "{}", report.message ),
		Severity::Medium => tracing::warn!( component, %action, %metadata, ?causes, severity = %report.severity, "{}", report.message ),
		Severity::High | Severity::Critical => tracing::error!( component, %action, %metadata, ?causes, severity = %report.severity, "{}", report.message ),
	}
}
