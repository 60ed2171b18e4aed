use mount_orchestrator::{ ComponentDescriptor, Registry, RegistryError };

// The only test in this binary touching the process-wide registry.
#[test]
fn registry_global_install_once() {

	assert!( Registry::global().is_none() );

	let invalid = Registry::install([ ComponentDescriptor::new( "nav" ), ComponentDescriptor::new( "nav" ) ]);
	assert_eq!( invalid.unwrap_err(), RegistryError::DuplicateKey( "nav".to_string() ));
	assert!( Registry::global().is_none() );

	let installed = Registry::install([ ComponentDescriptor::new( "nav" ), ComponentDescriptor::new( "footer" ) ])
		.expect( "First install failed" );
	assert_eq!( installed.len(), 2 );
	assert!( Registry::global().is_some_and(| global | global.get( "footer" ).is_some() ));

	let again = Registry::install([ ComponentDescriptor::new( "other" ) ]);
	assert_eq!( again.unwrap_err(), RegistryError::AlreadyInstalled );
	assert!( Registry::global().is_some_and(| global | global.get( "other" ).is_none() ));

}
