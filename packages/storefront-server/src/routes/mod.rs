pub(crate) mod auth;
pub(crate) mod orders;
pub(crate) mod products;

use serde::Serialize;

/// Envelope for delete endpoints; failures are flattened into `false`.
#[derive(Debug, Serialize)]
pub(crate) struct DeleteResponse {
    pub deleted: bool,
}
