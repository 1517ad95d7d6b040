pub mod identity;
pub mod messaging;
pub mod personas;
