pub mod require_role;
