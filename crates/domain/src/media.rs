use serde::{Deserialize, Serialize};

/// A stored media asset: public URL plus the provider-assigned id used for
/// later removal.
///
/// `public_id` is `None` only for the seeded default avatar, which lives
/// outside the media store and must never be deleted from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub url: String,
    #[serde(rename = "publicId")]
    pub public_id: Option<String>,
}

impl MediaAsset {
    pub fn new(url: impl Into<String>, public_id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            public_id: Some(public_id.into()),
        }
    }

    /// Placeholder avatar assigned to fresh accounts.
    pub fn default_avatar() -> Self {
        Self {
            url: "https://cdn.pixabay.com/photo/2015/10/05/22/37/blank-profile-picture-973460__340.png"
                .to_string(),
            public_id: None,
        }
    }
}
