// Draft expansion: validates the editor's draft, forwards it to the
// generation service (superseding stale requests per session) and formats
// the reply for display.

pub mod handlers;
pub mod session;
