use mount_orchestrator::{ Activation, ComponentDescriptor, Registry, RegistryError };
use crate::fakes::FakePage ;

#[test]
fn registry_duplicate_keys_rejected() {

	let page = FakePage::new();
	page.component( "carousel" );

	let result = Registry::new([
		ComponentDescriptor::new( "carousel" ),
		ComponentDescriptor::new( "search" ),
		ComponentDescriptor::new( "carousel" ).with_activation( Activation::Deferred ),
	]);

	assert_eq!( result.unwrap_err(), RegistryError::DuplicateKey( "carousel".to_string() ));

	// Nothing was scanned or claimed.
	assert!( !page.is_claimed( 0 ));

}

#[test]
fn registry_lookup_by_key() {

	let registry = Registry::new([
		ComponentDescriptor::new( "carousel" ).required(),
		ComponentDescriptor::new( "search" ).with_activation( Activation::Conditional ),
		ComponentDescriptor::new( "footer" ),
	]).expect( "Registry failed to build" );

	assert_eq!( registry.len(), 3 );
	assert!( !registry.is_empty() );
	assert_eq!( registry.get( "search" ).map( ComponentDescriptor::activation ), Some( Activation::Conditional ));
	assert!( registry.get( "Search" ).is_none() );
	assert_eq!( registry.iter().map( ComponentDescriptor::key ).collect::<Vec<_>>(), vec![ "carousel", "search", "footer" ]);
	assert_eq!( registry.required().map( ComponentDescriptor::key ).collect::<Vec<_>>(), vec![ "carousel" ]);

}

#[test]
fn registry_empty_is_valid() {
	let registry = Registry::new( std::iter::empty() ).expect( "Registry failed to build" );
	assert!( registry.is_empty() );
}
