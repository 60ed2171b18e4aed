//! Discovery of mount points in the live page.
//!
//! [`scan`] queries the page once for elements carrying the key attribute and
//! returns a lazy [`Scan`] over them. Each element is claimed (the claim
//! attribute is written) as it is yielded, so a later scan over an overlapping
//! subtree skips it. Malformed per-instance configuration never stops a mount
//! point from being produced; it is reported and replaced with an empty one.

use crate::config::{ self, Config };
use crate::mount_point::MountPoint ;
use crate::page::Page ;
use crate::reporter::{ Action, ReportContext, Reporter, Severity };
use crate::settings::Settings ;



/// Scans `root` (or the whole document) for unclaimed component elements.
pub fn scan<'a, P: Page>(
	page: &'a P,
	root: Option<&P::Element>,
	settings: &'a Settings,
	reporter: &'a Reporter,
) -> Scan<'a, P> {
	let candidates = page.elements_with_attribute( root, settings.key_attribute() );
	tracing::debug!( candidates = candidates.len(), "scanning for component elements" );
	Scan { page, settings, reporter, candidates: candidates.into_iter() }
}

/// Lazy sequence of [`MountPoint`]s produced by [`scan`].
pub struct Scan<'a, P: Page> {
	page: &'a P,
	settings: &'a Settings,
	reporter: &'a Reporter,
	candidates: std::vec::IntoIter<P::Element>,
}

impl<P: Page> Scan<'_, P> {

	fn is_claimed( &self, element: &P::Element ) -> bool {
		self.page.attribute( element, self.settings.claim_attribute() ).is_some()
	}

	fn instance_config( &self, element: &P::Element, key: &str ) -> Config {
		let Some( raw ) = self.page.attribute( element, self.settings.config_attribute() ) else {
			return Config::new()
		};
		config::parse( &raw ).unwrap_or_else(| err | {
			self.reporter.report(
				&err,
				ReportContext::for_component( key, Action::ParseConfig )
					.with_metadata( "attribute", self.settings.config_attribute() )
					.with_metadata( "value", raw ),
				Severity::Low,
			);
			Config::new()
		})
	}

}

impl<P: Page> Iterator for Scan<'_, P> {
	type Item = MountPoint<P::Element>;

	fn next( &mut self ) -> Option<Self::Item> {
		loop {
			let element = self.candidates.next()?;
			if self.is_claimed( &element ) { continue }
			let Some( key ) = self.page.attribute( &element, self.settings.key_attribute() ) else { continue };
			let key = key.trim().to_string();

			self.page.set_attribute( &element, self.settings.claim_attribute(), "" );
			let instance_config = self.instance_config( &element, &key );
			return Some( MountPoint::new( element, key, instance_config ));
		}
	}

	fn size_hint( &self ) -> ( usize, Option<usize> ) { ( 0, Some( self.candidates.len() )) }
}
