//! Device identity sent with user-scoped mutations.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The push-notification device token plus the user UUID the backend assigned
/// to this installation on `createUser`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
  pub device_token: String,
  pub user_uuid:    Uuid,
}
