pub mod requisition;

pub use requisition::{ItemStatus, MovementKind, RequisitionStatus, Shift};
