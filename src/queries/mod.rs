pub mod requisition_queries;
