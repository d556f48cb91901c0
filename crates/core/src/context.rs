use uuid::Uuid;

/// Per-request state handed explicitly to every admin operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Identity of the authenticated admin.
    pub admin: String,
    pub request_id: Uuid,
}

impl RequestContext {
    pub fn new(admin: impl Into<String>) -> Self {
        Self {
            admin: admin.into(),
            request_id: Uuid::new_v4(),
        }
    }
}
