use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Shared, insertion-ordered member collection of a band.
///
/// Elements may be absent when an association was only partially loaded.
pub type Members = Arc<Vec<Option<Member>>>;

/// A person playing in one or more bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    pub name: Option<String>,
}

impl Member {
    /// Creates a new named member.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }
}

/// A musical group with its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    pub id: i64,
    pub name: Option<String>,
    pub members: Option<Members>,
}

impl Band {
    /// Creates a new named band without a member collection.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            members: None,
        }
    }

    /// Sets the member collection.
    pub fn with_members(mut self, members: impl IntoIterator<Item = Member>) -> Self {
        self.members = Some(Arc::new(members.into_iter().map(Some).collect()));
        self
    }

    /// Members of the band, empty when the collection is absent.
    pub fn members(&self) -> &[Option<Member>] {
        self.members.as_deref().map(Vec::as_slice).unwrap_or_default()
    }
}

/// A festival or show with its line-up of bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: Option<String>,
    pub img_url: Option<String>,
    pub nb_stars: Option<i32>,
    pub comment: Option<String>,
    pub bands: Option<Vec<Option<Band>>>,
}

impl Event {
    /// Creates a new titled event with no other fields set.
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: Some(title.into()),
            img_url: None,
            nb_stars: None,
            comment: None,
            bands: None,
        }
    }

    /// Sets the image reference.
    pub fn with_img_url(mut self, img_url: impl Into<String>) -> Self {
        self.img_url = Some(img_url.into());
        self
    }

    /// Sets the star rating.
    pub fn with_nb_stars(mut self, nb_stars: i32) -> Self {
        self.nb_stars = Some(nb_stars);
        self
    }

    /// Sets the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the band collection.
    pub fn with_bands(mut self, bands: impl IntoIterator<Item = Band>) -> Self {
        self.bands = Some(bands.into_iter().map(Some).collect());
        self
    }

    /// Bands of the event, empty when the collection is absent.
    pub fn bands(&self) -> &[Option<Band>] {
        self.bands.as_deref().unwrap_or_default()
    }
}
