// Dashboard shell: section navigation, the upload → job → analysis wizard,
// and the upload gate in front of it.

pub mod controller;
pub mod handlers;
pub mod job_input;
pub mod upload;
