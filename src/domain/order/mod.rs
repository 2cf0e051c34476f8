// ============================================================================
// Order Domain
// ============================================================================
//
// All Order-specific code:
// - Value objects (OrderStatus, Address, MoneyBreakdown, ...)
// - Persistent model (Order, OrderItem, TrackingEntry)
// - Errors (OrderError)
// - Workflow engine (placement)
// - Status controller (staff updates, customer cancel/refund)
// - Timeline projection (read-only)
//
// ============================================================================

pub mod errors;
pub mod model;
pub mod status;
pub mod timeline;
pub mod value_objects;
pub mod workflow;

pub use errors::OrderError;
pub use model::{Order, OrderItem, TrackingEntry};
pub use status::{OrderStatusController, StatusUpdate};
pub use value_objects::{Address, CustomBouquet, MoneyBreakdown, OrderStatus, PaymentStatus, Role};
pub use workflow::{OrderWorkflowEngine, PlaceOrderRequest, PlacedOrder, RequestedItem};
