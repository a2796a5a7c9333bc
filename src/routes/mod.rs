/// Router Module Index
///
/// Splits routing into the ungated JSON API and the page routes generated
/// from the route table. Access control for pages is attached per route as a
/// layer, so a page cannot be registered without its gate.

/// Health check and the session/navigation API. No role required.
pub mod public;

/// One route per route-table entry, each wrapped in the authorization gate.
pub mod pages;
