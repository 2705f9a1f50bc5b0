// Workflow services
pub mod requisition_items;
pub mod requisition_status;
pub mod requisitions;

// Auxiliary recording (best-effort)
pub mod history;
pub mod stock_movements;
