pub mod connectome;
pub mod layout;
pub mod util;
