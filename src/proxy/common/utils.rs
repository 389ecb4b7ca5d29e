// Utility functions

/// Fresh identifier for resources the gateway creates on the caller's behalf
pub fn mint_resource_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
