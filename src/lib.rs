pub mod cust_errors;
pub mod graph;
pub mod parse;
pub mod validate;
pub mod interrupter;
pub mod indset_instance;
pub mod branch_reduce;
