use futures::executor::LocalPool ;
use mount_orchestrator::{ Action, ComponentDescriptor, Severity };
use crate::fakes::{ orchestrator, registry, FakeLoader, FakeObserver, FakePage };

#[test]
fn error_handling_required_absent_reported_once_per_scan() {

	let mut pool = LocalPool::new();
	let page = FakePage::new();
	page.component( "header" );
	let loader = FakeLoader::new();
	let observer = FakeObserver::new();
	let orchestrator = orchestrator(
		registry([
			ComponentDescriptor::new( "header" ).required(),
			ComponentDescriptor::new( "cookie-banner" ).required(),
			ComponentDescriptor::new( "optional-widget" ),
		]),
		&page, &loader, &observer, &pool,
	);

	pool.run_until( orchestrator.initialize_all_mounts( None ));
	assert_reports!( orchestrator.reporter(), [ Action::Discover => Severity::Medium ]);
	assert_eq!( orchestrator.reporter().reports()[ 0 ].context().component(), Some( "cookie-banner" ));

	// Every call is its own reporting scope.
	pool.run_until( orchestrator.initialize_all_mounts( None ));
	assert_reports!( orchestrator.reporter(), [
		Action::Discover => Severity::Medium,
		Action::Discover => Severity::Medium,
		Action::Discover => Severity::Medium,
	]);

}

#[test]
fn error_handling_required_present_not_reported() {

	let mut pool = LocalPool::new();
	let page = FakePage::new();
	page.component( "header" );
	let loader = FakeLoader::new();
	let observer = FakeObserver::new();
	let orchestrator = orchestrator(
		registry([ ComponentDescriptor::new( "header" ).required().with_predicate(|| false ) ]),
		&page, &loader, &observer, &pool,
	);

	pool.run_until( orchestrator.initialize_all_mounts( None ));
	assert_no_reports!( orchestrator.reporter() );

}
