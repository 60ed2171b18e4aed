use futures::executor::LocalPool ;
use serde_json::json ;
use mount_orchestrator::{ Action, ComponentDescriptor, Severity };
use crate::fakes::{ orchestrator, registry, FakeLoader, FakeObserver, FakePage, CONFIG_ATTRIBUTE };

#[test]
fn error_handling_malformed_config_uses_defaults() {

	let mut pool = LocalPool::new();
	let page = FakePage::new();
	let element = page.component_with_config( "faq", "{not json" );
	let loader = FakeLoader::new();
	let observer = FakeObserver::new();
	let orchestrator = orchestrator(
		registry([ ComponentDescriptor::new( "faq" ).with_default_config( json!({ "open": false })) ]),
		&page, &loader, &observer, &pool,
	);

	let summary = pool.run_until( orchestrator.initialize_all_mounts( None ));
	assert_eq!( summary.mounted, 1 );
	assert_eq!( loader.mounts_of( element ), 1 );
	assert_eq!( serde_json::Value::Object( loader.mounts()[ 0 ].config.clone() ), json!({ "open": false }));

	assert_reports!( orchestrator.reporter(), [ Action::ParseConfig => Severity::Low ]);
	let report = &orchestrator.reporter().reports()[ 0 ];
	assert_eq!( report.context().component(), Some( "faq" ));
	assert_eq!( report.context().metadata()[ "attribute" ], CONFIG_ATTRIBUTE );
	assert_eq!( report.context().metadata()[ "value" ], "{not json" );

}

#[test]
fn error_handling_non_object_config_uses_defaults() {

	let mut pool = LocalPool::new();
	let page = FakePage::new();
	page.component_with_config( "faq", "[1, 2, 3]" );
	page.component_with_config( "faq", "   " );
	let loader = FakeLoader::new();
	let observer = FakeObserver::new();
	let orchestrator = orchestrator(
		registry([ ComponentDescriptor::new( "faq" ).with_default_config( json!({ "open": true })) ]),
		&page, &loader, &observer, &pool,
	);

	let summary = pool.run_until( orchestrator.initialize_all_mounts( None ));
	assert_eq!( summary.mounted, 2 );
	assert!( loader.mounts().iter().all(| record | record.config[ "open" ] == true ));

	// Blank attributes count as absent.
	assert_reports!( orchestrator.reporter(), [ Action::ParseConfig => Severity::Low ]);
	assert!( orchestrator.reporter().reports()[ 0 ].message().contains( "an array" ));

}
