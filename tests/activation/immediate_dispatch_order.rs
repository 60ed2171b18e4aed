use futures::executor::LocalPool ;
use mount_orchestrator::ComponentDescriptor ;
use crate::fakes::{ orchestrator, registry, Behaviour, FakeLoader, FakeObserver, FakePage };

#[test]
fn activation_immediate_dispatch_follows_document_order() {

	let mut pool = LocalPool::new();
	let page = FakePage::new();
	let slow = page.component( "slow" );
	let fast = page.component( "fast" );
	let middle = page.component( "middle" );
	let loader = FakeLoader::new()
		.with( "slow", Behaviour::SlowMount( 5 ))
		.with( "middle", Behaviour::SlowMount( 1 ));
	let observer = FakeObserver::new();
	let orchestrator = orchestrator(
		registry([
			ComponentDescriptor::new( "fast" ),
			ComponentDescriptor::new( "middle" ),
			ComponentDescriptor::new( "slow" ),
		]),
		&page, &loader, &observer, &pool,
	);

	let summary = pool.run_until( orchestrator.initialize_all_mounts( None ));
	assert_eq!( summary.mounted, 3 );

	// Dispatch follows the document, not the registry.
	assert_eq!( loader.loads(), vec![ "slow", "fast", "middle" ]);

	// Completion does not have to.
	let completed = loader.mounts().into_iter().map(| record | record.element ).collect::<Vec<_>>();
	assert_eq!( completed, vec![ fast, middle, slow ]);

}
