// Career assistant chat: keyword router plus the transcript it writes into.

pub mod handlers;
pub mod router;
pub mod transcript;
