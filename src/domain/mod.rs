// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// One submodule per aggregate. The order module carries the workflow engine,
// the status controller, and the timeline projection; catalog, cart, and
// review are its collaborators.
//
// ============================================================================

pub mod cart;
pub mod catalog;
pub mod order;
pub mod review;
