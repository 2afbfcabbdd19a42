use serde::Deserialize;

use super::types::Event;

/// Partial update payload for an event.
///
/// Every field is optional. Present fields overwrite the stored value,
/// absent ones leave it untouched. Identifier and band associations are
/// never part of a patch; unknown payload fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub img_url: Option<String>,
    #[serde(default)]
    pub nb_stars: Option<i32>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl EventPatch {
    /// Applies the present fields to a stored event.
    pub fn apply_to(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = Some(title);
        }
        if let Some(img_url) = self.img_url {
            event.img_url = Some(img_url);
        }
        if let Some(nb_stars) = self.nb_stars {
            event.nb_stars = Some(nb_stars);
        }
        if let Some(comment) = self.comment {
            event.comment = Some(comment);
        }
    }

    /// Returns true when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.img_url.is_none()
            && self.nb_stars.is_none()
            && self.comment.is_none()
    }
}
