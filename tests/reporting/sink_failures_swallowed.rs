use futures::executor::LocalPool ;
use mount_orchestrator::{ Action, Environment, LoadError, ReportContext, Settings, Severity };
use crate::fakes::{ RecordingSink, SinkMode };

fn report_twice( mode: SinkMode ) -> RecordingSink {

	let mut pool = LocalPool::new();
	let sink = RecordingSink::new( mode );
	let reporter = sink.reporter( &Settings::default().with_environment( Environment::Production ), &pool );
	let err = LoadError::TimedOut( "checkout".to_string() );

	reporter.report( &err, ReportContext::for_component( "checkout", Action::Load ), Severity::High );
	reporter.report( &err, ReportContext::for_component( "checkout", Action::Load ), Severity::Critical );
	pool.run_until_stalled();

	assert_eq!( reporter.reports().len(), 2 );
	sink

}

#[test]
fn reporting_rejecting_sink_is_swallowed() {
	let sink = report_twice( SinkMode::Reject );
	assert_eq!( sink.attempts(), 2 );
	assert!( sink.delivered().is_empty() );
}

#[test]
fn reporting_panicking_sink_is_swallowed() {
	let sink = report_twice( SinkMode::Panic );
	assert_eq!( sink.attempts(), 2 );
	assert!( sink.delivered().is_empty() );
}

#[test]
fn reporting_without_sink_only_records() {
	let reporter = mount_orchestrator::Reporter::new( &Settings::default().with_environment( Environment::Production ));
	reporter.report( &LoadError::TimedOut( "search".to_string() ), ReportContext::new( Action::Load ), Severity::Critical );
	assert_eq!( reporter.reports().len(), 1 );
}
