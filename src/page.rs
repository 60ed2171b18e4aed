//! Capabilities the orchestrator needs from the host page.
//!
//! The orchestrator never walks a real DOM itself. A [`Page`] answers attribute
//! queries over live elements, and a [`VisibilityObserver`] reports when an
//! element intersects the viewport. Browser bindings implement these over
//! `querySelectorAll` and `IntersectionObserver`; tests implement them in memory.

/// Access to the live page markup.
///
/// `Element` is a cheap handle to a live node. Two handles compare equal when
/// they refer to the same node.
pub trait Page {
	/// Handle to a live element.
	type Element: Clone + Eq + std::hash::Hash + std::fmt::Debug + 'static ;

	/// Every element under `root` (or the whole document when `None`) that
	/// carries `attribute`, in document order. `root` itself is included when it
	/// carries the attribute.
	fn elements_with_attribute( &self, root: Option<&Self::Element>, attribute: &str ) -> Vec<Self::Element> ;

	/// Value of `name` on `element`, if present.
	fn attribute( &self, element: &Self::Element, name: &str ) -> Option<String> ;

	/// Sets `name` on `element`.
	fn set_attribute( &self, element: &Self::Element, name: &str, value: &str );
}

/// Identifies one registration with a [`VisibilityObserver`].
#[derive( Copy, Clone, Eq, PartialEq, Hash, Debug )]
pub struct ObservationId( pub u64 );

/// Callback invoked with the element's current intersection ratio.
pub type IntersectionCallback = Box<dyn FnMut( f64 )>;

/// Viewport intersection notifications.
///
/// Implementations may invoke a registered callback any number of times, from
/// inside or outside `observe`, until the registration is removed with
/// [`unobserve`]( Self::unobserve ). Calling `unobserve` from within the
/// callback itself must be supported.
pub trait VisibilityObserver<E> {
	fn observe( &self, element: &E, callback: IntersectionCallback ) -> ObservationId ;
	fn unobserve( &self, id: ObservationId );
}
