use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MediaFolder {
    RestaurantImages,
    MenuItemImages,
    CheckinPhotos,
    FoodRecords,
}

impl MediaFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaFolder::RestaurantImages => "restaurant_images",
            MediaFolder::MenuItemImages => "menu_item_images",
            MediaFolder::CheckinPhotos => "checkin_photos",
            MediaFolder::FoodRecords => "food_records",
        }
    }
}

impl fmt::Display for MediaFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaFolder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "restaurant_images" => Ok(MediaFolder::RestaurantImages),
            "menu_item_images" => Ok(MediaFolder::MenuItemImages),
            "checkin_photos" => Ok(MediaFolder::CheckinPhotos),
            "food_records" => Ok(MediaFolder::FoodRecords),
            other => Err(CoreError::Invalid(format!("unknown media folder: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StoredMedia {
    pub url: String,
}

/// Lower-cased extension of an accepted image file name.
pub fn image_extension(file_name: &str) -> Result<String, CoreError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .ok_or_else(|| CoreError::UnsupportedFileType(file_name.to_string()))?;

    if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(extension)
    } else {
        Err(CoreError::UnsupportedFileType(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_are_checked_case_insensitively() {
        assert_eq!(image_extension("ramen.JPG").unwrap(), "jpg");
        assert_eq!(image_extension("a.b.webp").unwrap(), "webp");
        assert_eq!(
            image_extension("menu.pdf"),
            Err(CoreError::UnsupportedFileType("pdf".to_string()))
        );
        assert!(image_extension("noext").is_err());
    }

    #[test]
    fn folders_round_trip_through_their_path_names() {
        for folder in [
            MediaFolder::RestaurantImages,
            MediaFolder::MenuItemImages,
            MediaFolder::CheckinPhotos,
            MediaFolder::FoodRecords,
        ] {
            assert_eq!(folder.as_str().parse::<MediaFolder>().unwrap(), folder);
        }
        assert!("avatars".parse::<MediaFolder>().is_err());
    }
}
