use crate::{
    core::geo::{LatLng, NamedLatLng},
    i18n::{Language, TextKey, Translator},
};

/// What the detail card shows for a selected place
#[derive(Debug, Clone, PartialEq)]
pub struct PoiDetail {
    pub name: String,
    pub category: String,
    pub address: Option<String>,
    pub position: LatLng,
}

impl PoiDetail {
    /// Builds the card for `location`; `category` is used when the place has no type
    pub fn new(location: &NamedLatLng, category: Option<&str>, translator: &Translator) -> Self {
        let category = match (&location.kind, category) {
            (Some(kind), _) => translator.type_label(kind),
            (None, Some(category)) => category.to_string(),
            (None, None) => translator.text(TextKey::PointOfInterest).to_string(),
        };

        Self {
            name: location.name.clone(),
            category,
            address: location
                .address
                .as_deref()
                .map(|address| localized_address(address, translator.language())),
            position: location.position,
        }
    }

    /// Six-decimal coordinates line
    pub fn coordinates_line(&self) -> String {
        format!("{:.6}, {:.6}", self.position.lat, self.position.lng)
    }
}

/// Picks the part of a `"zh | en | ar"` address for `language`.
///
/// Single-part addresses come back whole; a language whose part is missing gets
/// the last one.
pub fn localized_address(address: &str, language: Language) -> String {
    let parts: Vec<&str> = address.split('|').map(str::trim).collect();
    if parts.len() <= 1 {
        return address.to_string();
    }
    let index = match language {
        Language::Zh => 0,
        Language::En | Language::Ms | Language::Pt | Language::Es => 1,
        Language::Ar => 2,
    };
    parts[index.min(parts.len() - 1)].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "北京市东城区 | Dongcheng, Beijing | بكين";

    #[test]
    fn test_address_by_language() {
        assert_eq!(localized_address(ADDRESS, Language::Zh), "北京市东城区");
        assert_eq!(localized_address(ADDRESS, Language::Pt), "Dongcheng, Beijing");
        assert_eq!(localized_address(ADDRESS, Language::Ar), "بكين");

        // Two parts: Arabic clamps to the last one
        assert_eq!(localized_address("甲 | A", Language::Ar), "A");
        assert_eq!(localized_address("Plain street 1", Language::Ar), "Plain street 1");
    }

    #[test]
    fn test_category_fallbacks() {
        let en = Translator::new(Language::En);
        let place = NamedLatLng::new("X", LatLng::new(1.0, 2.0));

        let typed = place.clone().with_kind("hotel");
        assert_eq!(PoiDetail::new(&typed, Some("ignored"), &en).category, "Hotel");
        assert_eq!(PoiDetail::new(&place, Some("Museum"), &en).category, "Museum");
        assert_eq!(PoiDetail::new(&place, None, &en).category, "Point of Interest");
    }

    #[test]
    fn test_detail_fields() {
        let zh = Translator::new(Language::Zh);
        let place = NamedLatLng::new("天安门", LatLng::new(39.9042, 116.4074))
            .with_kind("landmark")
            .with_address(ADDRESS);
        let detail = PoiDetail::new(&place, None, &zh);

        assert_eq!(detail.category, "地标");
        assert_eq!(detail.address.as_deref(), Some("北京市东城区"));
        assert_eq!(detail.coordinates_line(), "39.904200, 116.407400");
    }
}
