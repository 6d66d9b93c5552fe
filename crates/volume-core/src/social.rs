//! Social links attached to a publication.
//!
//! The backend identifies a platform by a short key (`"insta"`, `"facebook"`,
//! ...). Display names and icon identifiers come from a static table that is
//! never modified at runtime.

use serde::{Deserialize, Serialize};

/// A (platform key, URL) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
  pub platform: String,
  pub url:      String,
}

impl Social {
  pub fn display_name(&self) -> Option<&'static str> { display_name(&self.platform) }

  pub fn icon(&self) -> Option<&'static str> { icon(&self.platform) }
}

/// One row of the platform lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
  pub key:          &'static str,
  pub display_name: &'static str,
  pub icon:         &'static str,
}

/// Every platform key the backend is known to send.
pub const PLATFORMS: &[Platform] = &[
  Platform { key: "insta",    display_name: "Instagram", icon: "instagram" },
  Platform { key: "facebook", display_name: "Facebook",  icon: "facebook" },
  Platform { key: "linkedin", display_name: "LinkedIn",  icon: "linkedin" },
  Platform { key: "twitter",  display_name: "Twitter",   icon: "twitter" },
  Platform { key: "youtube",  display_name: "YouTube",   icon: "youtube" },
  Platform { key: "medium",   display_name: "Medium",    icon: "medium" },
  Platform { key: "tiktok",   display_name: "TikTok",    icon: "tiktok" },
  Platform { key: "github",   display_name: "GitHub",    icon: "github" },
];

pub fn platform(key: &str) -> Option<&'static Platform> {
  PLATFORMS.iter().find(|p| p.key == key)
}

/// Display name for a platform key; `None` for unknown keys.
pub fn display_name(key: &str) -> Option<&'static str> {
  platform(key).map(|p| p.display_name)
}

/// Icon identifier for a platform key; `None` for unknown keys.
pub fn icon(key: &str) -> Option<&'static str> { platform(key).map(|p| p.icon) }
