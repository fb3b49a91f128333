pub mod fields;
pub mod rows;
pub mod sections;
pub mod session;
pub mod submit;
