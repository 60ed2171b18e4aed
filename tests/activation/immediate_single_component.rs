use futures::executor::LocalPool ;
use serde_json::json ;
use mount_orchestrator::{ ComponentDescriptor, Outcome };
use crate::fakes::{ orchestrator, registry, FakeLoader, FakeObserver, FakePage };

#[test]
fn activation_immediate_single_component() {

	let mut pool = LocalPool::new();
	let page = FakePage::new();
	let element = page.component( "A" );
	let loader = FakeLoader::new();
	let observer = FakeObserver::new();
	let orchestrator = orchestrator(
		registry([ ComponentDescriptor::new( "A" ).with_default_config( json!({ "x": 1 })) ]),
		&page, &loader, &observer, &pool,
	);

	let summary = pool.run_until( orchestrator.initialize_all_mounts( None ));
	assert_eq!(( summary.mounted, summary.failed, summary.pending, summary.skipped ), ( 1, 0, 0, 0 ));

	let diagnostics = orchestrator.diagnostics();
	assert_eq!( diagnostics.results.len(), 1 );
	let result = &diagnostics.results[ 0 ];
	assert_eq!( result.key(), "A" );
	assert_eq!( *result.element(), element );
	assert_eq!( result.outcome(), Outcome::Success );
	assert!( result.error().is_none() );

	let mounts = loader.mounts();
	assert_eq!( mounts.len(), 1 );
	assert_eq!( serde_json::Value::Object( mounts[ 0 ].config.clone() ), json!({ "x": 1 }));
	assert_eq!( observer.observe_calls(), 0 );
	assert_no_reports!( orchestrator.reporter() );

}
