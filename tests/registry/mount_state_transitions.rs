use mount_orchestrator::{ Config, MountPoint, MountState };

const STATES: [MountState; 6] = [
	MountState::Discovered,
	MountState::Pending,
	MountState::Mounting,
	MountState::Mounted,
	MountState::Failed,
	MountState::Skipped,
];

#[test]
fn registry_mount_state_transitions() {

	let allowed = STATES.iter()
		.flat_map(| &from | STATES.iter().map( move | &to | ( from, to )))
		.filter(|( from, to )| from.can_transition_to( *to ))
		.collect::<Vec<_>>();

	assert_eq!( allowed, vec![
		( MountState::Discovered, MountState::Pending ),
		( MountState::Discovered, MountState::Mounting ),
		( MountState::Discovered, MountState::Skipped ),
		( MountState::Pending, MountState::Mounting ),
		( MountState::Mounting, MountState::Mounted ),
		( MountState::Mounting, MountState::Failed ),
	]);

	// Terminal states go nowhere.
	STATES.iter().filter(| state | state.is_terminal() )
		.for_each(| &state | assert!( STATES.iter().all(| &next | !state.can_transition_to( next ))));

}

#[test]
fn registry_mount_point_advances_forward_only() {

	let mut mount_point = MountPoint::new( 7_usize, "gallery", Config::new() );
	assert_eq!( mount_point.state(), MountState::Discovered );

	assert!( mount_point.advance( MountState::Pending ));
	assert!( !mount_point.advance( MountState::Discovered ));
	assert!( !mount_point.advance( MountState::Mounted ));
	assert_eq!( mount_point.state(), MountState::Pending );

	assert!( mount_point.advance( MountState::Mounting ));
	assert!( mount_point.advance( MountState::Mounted ));
	assert!( !mount_point.advance( MountState::Mounting ));
	assert_eq!( mount_point.state(), MountState::Mounted );

}
