use futures::executor::LocalPool ;
use mount_orchestrator::{ Action, Activation, ComponentDescriptor, MountError, MountFailure, Severity };
use crate::fakes::{ orchestrator, registry, Behaviour, FakeLoader, FakeObserver, FakePage };

#[test]
fn error_handling_mount_failure_isolated() {

	let mut pool = LocalPool::new();
	let page = FakePage::new();
	let refusing = page.component( "map" );
	let healthy = page.component( "gallery" );
	let panicking = page.component( "player" );
	let loader = FakeLoader::new()
		.with( "map", Behaviour::RejectMount )
		.with( "player", Behaviour::PanicMount );
	let observer = FakeObserver::new();
	let orchestrator = orchestrator(
		registry([
			ComponentDescriptor::new( "map" ),
			ComponentDescriptor::new( "gallery" ),
			ComponentDescriptor::new( "player" ).required(),
		]),
		&page, &loader, &observer, &pool,
	);

	let summary = pool.run_until( orchestrator.initialize_all_mounts( None ));
	assert_eq!(( summary.mounted, summary.failed ), ( 1, 2 ));
	assert_eq!( loader.mounts_of( healthy ), 1 );
	assert_eq!( loader.mounts_of( refusing ), 0 );
	assert_eq!( loader.mounts_of( panicking ), 0 );

	let diagnostics = orchestrator.diagnostics();
	let player = diagnostics.results_for( "player" ).next().expect( "player result recorded" );
	assert!( matches!( player.error(), Some( MountFailure::Mount( MountError::Panicked( message ))) if message.contains( "render of player exploded" )));
	let map = diagnostics.results_for( "map" ).next().expect( "map result recorded" );
	assert!( matches!( map.error(), Some( MountFailure::Mount( MountError::Rejected( _ )))));
	assert!( map.config().is_none() );

	assert_reports!( orchestrator.reporter(), [
		Action::Mount => Severity::Medium,
		Action::Mount => Severity::High,
	]);

}

#[test]
fn error_handling_deferred_failure_isolated() {

	let mut pool = LocalPool::new();
	let page = FakePage::new();
	let broken = page.component( "reviews" );
	let fine = page.component( "related" );
	let loader = FakeLoader::new().with( "reviews", Behaviour::PanicMount );
	let observer = FakeObserver::new();
	let orchestrator = orchestrator(
		registry([
			ComponentDescriptor::new( "reviews" ).with_activation( Activation::Deferred ),
			ComponentDescriptor::new( "related" ).with_activation( Activation::Deferred ),
		]),
		&page, &loader, &observer, &pool,
	);

	pool.run_until( orchestrator.initialize_all_mounts( None ));
	observer.show( broken );
	observer.show( fine );
	pool.run_until_stalled();

	assert_eq!( loader.mounts_of( fine ), 1 );
	let summary = orchestrator.diagnostics().summary();
	assert_eq!(( summary.mounted, summary.failed, summary.pending ), ( 1, 1, 0 ));

}
