//! Port adapters: live (real system), recording and replaying (cassettes).

pub mod live;
pub mod recording;
pub mod replaying;
