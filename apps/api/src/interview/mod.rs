// Mock interview drill: question bank types, session state machine, timer,
// and the HTTP handlers that drive them.

pub mod handlers;
pub mod models;
pub mod session;
pub mod timer;
