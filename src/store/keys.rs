pub const USER_PROFILES: &str = "userProfiles";
pub const JOBS: &str = "jobs_store_v1";
pub const USERS: &str = "users";
