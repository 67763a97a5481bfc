pub const ADMIN_EMAIL: &str = "admin@scoop.test";
pub const ADMIN_NAME: &str = "Admin";
pub const PASSWORD: &str = "correct-horse-battery";
