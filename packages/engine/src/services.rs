pub mod dispatcher;
pub mod lobby;
pub mod phase_service;
pub mod resolution;
pub mod selection;
pub mod timer;
