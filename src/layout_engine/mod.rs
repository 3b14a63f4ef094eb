pub mod master_stack;

pub use master_stack::compute;
