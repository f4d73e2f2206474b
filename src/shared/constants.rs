/// Default page size for the tool listing
pub const DEFAULT_PAGE_SIZE: i64 = 12;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Role tag given to seeded admin accounts
pub const ROLE_ADMIN: &str = "admin";
