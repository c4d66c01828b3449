use std::fmt;

use serde::{Deserialize, Serialize};

use super::DurableQueue;

/// Declares a wire-string category enum. Values outside the known set are
/// kept verbatim in `Other` so a stored entry re-encodes unchanged.
macro_rules! category_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )*
            /// A category this build does not know, as it was written.
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )*
                    Self::Other(raw) => raw.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                let known = match raw.as_str() {
                    $( $wire => Some(Self::$variant), )*
                    _ => None,
                };
                known.unwrap_or_else(|| Self::Other(raw))
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

category_enum! {
    /// Category of a plot photograph.
    pub enum ImageType {
        /// Tree health / damage evidence.
        Health => "health",
        /// Overview of the plot layout.
        Plot => "plot",
        /// Single tree, stem or DBH tag.
        Tree => "tree",
        /// Canopy cover, taken upwards.
        Canopy => "canopy",
        /// Ground vegetation and seedlings.
        Understory => "understory",
        /// Soil profile or litter.
        Soil => "soil",
    }
}

category_enum! {
    /// Gallery section an image is filed under once uploaded.
    pub enum GalleryCategory {
        Plot => "plot",
        Activity => "activity",
        Landscape => "landscape",
        Wildlife => "wildlife",
    }
}

/// A compressed image waiting to be uploaded for a plot.
///
/// `base64_data` is a self-describing data URI such as
/// `data:image/jpeg;base64,...` and is stored exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingImageUpload {
    pub plot_code: String,

    #[serde(rename = "type")]
    pub image_type: ImageType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery_category: Option<GalleryCategory>,

    pub base64_data: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl PendingImageUpload {
    pub fn new(
        plot_code: impl Into<String>,
        image_type: ImageType,
        base64_data: impl Into<String>,
    ) -> Self {
        Self {
            plot_code: plot_code.into(),
            image_type,
            gallery_category: None,
            base64_data: base64_data.into(),
            description: None,
            uploader: None,
            date: None,
        }
    }

    pub fn with_gallery_category(mut self, category: GalleryCategory) -> Self {
        self.gallery_category = Some(category);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_uploader(mut self, uploader: impl Into<String>) -> Self {
        self.uploader = Some(uploader.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Media type declared by the data URI, e.g. `image/jpeg`.
    pub fn mime_type(&self) -> Option<&str> {
        let rest = self.base64_data.strip_prefix("data:")?;
        let (header, _) = rest.split_once(',')?;
        let mime = header.split(';').next()?;
        (!mime.is_empty()).then_some(mime)
    }

    /// Encoded size of the image content in bytes, excluding the URI header.
    pub fn encoded_len(&self) -> usize {
        self.base64_data
            .split_once(',')
            .map(|(_, body)| body.len())
            .unwrap_or(self.base64_data.len())
    }
}

/// Queue of pending image uploads.
pub type ImageUploadQueue = DurableQueue<PendingImageUpload>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::EntryId;
    use crate::queue::QueueEntry;
    use serde_json::json;

    #[test]
    fn serializes_with_camel_case_and_omits_absent_fields() {
        let upload = PendingImageUpload::new("MC-012", ImageType::Health, "data:image/jpeg;base64,Zm9v")
            .with_uploader("ranger-3");
        let entry = QueueEntry::new(EntryId::from("i1"), 7, upload);

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "i1",
                "timestamp": 7,
                "plotCode": "MC-012",
                "type": "health",
                "base64Data": "data:image/jpeg;base64,Zm9v",
                "uploader": "ranger-3"
            })
        );
    }

    #[test]
    fn unknown_categories_keep_their_wire_value() {
        let raw = r#"{"id":"i1","timestamp":1,"plotCode":"P","type":"drone_mosaic","galleryCategory":"aerial","base64Data":"data:,"}"#;
        let entry: QueueEntry<PendingImageUpload> = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.payload.image_type, ImageType::Other("drone_mosaic".to_string()));
        assert_eq!(
            entry.payload.gallery_category,
            Some(GalleryCategory::Other("aerial".to_string()))
        );

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], json!("drone_mosaic"));
        assert_eq!(value["galleryCategory"], json!("aerial"));
    }

    #[test]
    fn known_categories_use_snake_case_names() {
        assert_eq!(ImageType::from("understory".to_string()), ImageType::Understory);
        assert_eq!(String::from(GalleryCategory::Wildlife), "wildlife");
        assert_eq!(ImageType::Canopy.to_string(), "canopy");
    }

    #[test]
    fn reads_mime_type_from_data_uri() {
        let upload = PendingImageUpload::new("P", ImageType::Canopy, "data:image/webp;base64,AAAA");
        assert_eq!(upload.mime_type(), Some("image/webp"));
        assert_eq!(upload.encoded_len(), 4);

        let raw = PendingImageUpload::new("P", ImageType::Canopy, "AAAA");
        assert_eq!(raw.mime_type(), None);
        assert_eq!(raw.encoded_len(), 4);
    }
}
