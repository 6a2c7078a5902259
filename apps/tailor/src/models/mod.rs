pub mod lenient;
pub mod raw;
pub mod view;
