//! Static location table and substring search
//!
//! There is no geocoder behind this: queries are matched against a fixed,
//! multilingual list of places.

use crate::{
    core::{
        constants::SUGGESTION_LIMIT,
        geo::{LatLng, NamedLatLng},
    },
    data::formats::parse_coordinates,
    i18n::Language,
    Result,
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One entry of the location table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Chinese name, also the fallback for every language
    pub name: String,
    pub name_en: String,
    pub name_ar: String,
    #[serde(default)]
    pub name_ms: Option<String>,
    #[serde(default)]
    pub name_pt: Option<String>,
    #[serde(default)]
    pub name_es: Option<String>,
    /// Type key: `city`, `landmark`, `airport`, `restaurant`, `hotel`, `bank`, ...
    #[serde(rename = "type")]
    pub kind: String,
    pub lat: f64,
    pub lng: f64,
    /// `"zh | en | ar"` address parts
    #[serde(default)]
    pub address: Option<String>,
    /// Listed in the quick city picker
    #[serde(default)]
    pub preset: bool,
}

impl LocationRecord {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// Display name in `language`; Malay, Portuguese and Spanish fall back to English
    pub fn name_for(&self, language: Language) -> &str {
        match language {
            Language::Zh => &self.name,
            Language::En => &self.name_en,
            Language::Ar => &self.name_ar,
            Language::Ms => self.name_ms.as_deref().unwrap_or(&self.name_en),
            Language::Pt => self.name_pt.as_deref().unwrap_or(&self.name_en),
            Language::Es => self.name_es.as_deref().unwrap_or(&self.name_en),
        }
    }

    /// Localized name plus type and address, ready to select or route to
    pub fn to_named(&self, language: Language) -> NamedLatLng {
        let mut named =
            NamedLatLng::new(self.name_for(language), self.position()).with_kind(&self.kind);
        if let Some(address) = &self.address {
            named = named.with_address(address);
        }
        named
    }

    fn matches(&self, needle_lower: &str, needle: &str, scope: SearchScope) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.name_en.to_lowercase().contains(needle_lower)
            || self.name_ar.contains(needle)
            || (scope == SearchScope::PlacesAndTypes
                && self.kind.to_lowercase().contains(needle_lower))
    }

    fn has_name(&self, needle_lower: &str) -> bool {
        [
            Some(self.name.as_str()),
            Some(self.name_en.as_str()),
            Some(self.name_ar.as_str()),
            self.name_ms.as_deref(),
            self.name_pt.as_deref(),
            self.name_es.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|name| name.to_lowercase() == needle_lower)
    }
}

/// Which fields a query is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Names only (route inputs)
    Places,
    /// Names and the type key (main search box, category shortcuts)
    PlacesAndTypes,
}

/// A searchable list of locations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationDatabase {
    records: Vec<LocationRecord>,
}

static BUILTIN: Lazy<LocationDatabase> = Lazy::new(|| LocationDatabase::new(builtin_records()));

impl LocationDatabase {
    pub fn new(records: Vec<LocationRecord>) -> Self {
        Self { records }
    }

    /// The bundled table
    pub fn builtin() -> &'static LocationDatabase {
        &BUILTIN
    }

    /// Loads a replacement table from a JSON array of records
    pub fn from_json(text: &str) -> Result<Self> {
        let records: Vec<LocationRecord> = serde_json::from_str(text)?;
        for record in &records {
            LatLng::try_new(record.lat, record.lng)?;
        }
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    /// Entries for the quick city picker
    pub fn presets(&self) -> impl Iterator<Item = &LocationRecord> {
        self.records.iter().filter(|r| r.preset)
    }

    /// Case-insensitive substring search, at most [`SUGGESTION_LIMIT`] results.
    ///
    /// A blank query yields nothing; so does a query that matches nothing.
    pub fn search(&self, query: &str, scope: SearchScope) -> Vec<&LocationRecord> {
        let needle = query.trim();
        if needle.is_empty() {
            return Vec::new();
        }
        let needle_lower = needle.to_lowercase();

        self.records
            .iter()
            .filter(|record| record.matches(&needle_lower, needle, scope))
            .take(SUGGESTION_LIMIT)
            .collect()
    }

    /// Resolves free text from a route input.
    ///
    /// Text shaped like `lat,lng` is used as-is (named after the text itself); anything
    /// else is looked up by exact name first, then by the first substring match.
    pub fn resolve(&self, text: &str, language: Language) -> Option<NamedLatLng> {
        let trimmed = text.trim();
        match parse_coordinates(trimmed) {
            Ok(Some(position)) => return Some(NamedLatLng::new(trimmed, position)),
            Ok(None) => {}
            Err(e) => {
                log::debug!("ignoring route input {:?}: {}", trimmed, e);
                return None;
            }
        }

        let needle_lower = trimmed.to_lowercase();
        if needle_lower.is_empty() {
            return None;
        }
        self.records
            .iter()
            .find(|record| record.has_name(&needle_lower))
            .or_else(|| {
                self.search(trimmed, SearchScope::Places)
                    .into_iter()
                    .next()
            })
            .map(|record| record.to_named(language))
    }
}

#[allow(clippy::too_many_arguments)]
fn record(
    kind: &str,
    names: [&str; 3],
    other: [Option<&str>; 3],
    lat: f64,
    lng: f64,
    address: Option<&str>,
    preset: bool,
) -> LocationRecord {
    let [ms, pt, es] = other;
    LocationRecord {
        name: names[0].to_string(),
        name_en: names[1].to_string(),
        name_ar: names[2].to_string(),
        name_ms: ms.map(str::to_string),
        name_pt: pt.map(str::to_string),
        name_es: es.map(str::to_string),
        kind: kind.to_string(),
        lat,
        lng,
        address: address.map(str::to_string),
        preset,
    }
}

#[rustfmt::skip]
fn builtin_records() -> Vec<LocationRecord> {
    vec![
        record("city", ["北京", "Beijing", "بكين"], [Some("Beijing"), Some("Pequim"), Some("Pekín")], 39.9042, 116.4074, None, true),
        record("city", ["曼谷", "Bangkok", "بانكوك"], [Some("Bangkok"), Some("Bangcoc"), Some("Bangkok")], 13.7563, 100.5018, None, true),
        record("city", ["迪拜", "Dubai", "دبي"], [Some("Dubai"), Some("Dubai"), Some("Dubái")], 25.2048, 55.2708, None, true),
        record("city", ["吉隆坡", "Kuala Lumpur", "كوالالمبور"], [Some("Kuala Lumpur"), Some("Kuala Lumpur"), Some("Kuala Lumpur")], 3.139, 101.6869, None, true),
        record("city", ["圣保罗", "São Paulo", "ساو باولو"], [Some("São Paulo"), Some("São Paulo"), Some("São Paulo")], -23.5505, -46.6333, None, true),
        record("city", ["墨西哥城", "Mexico City", "مكسيكو سيتي"], [Some("Mexico City"), Some("Cidade do México"), Some("Ciudad de México")], 19.4326, -99.1332, None, true),
        record("city", ["新加坡", "Singapore", "سنغافورة"], [Some("Singapura"), Some("Singapura"), Some("Singapur")], 1.3521, 103.8198, None, true),
        record("city", ["上海", "Shanghai", "شنغهاي"], [None, Some("Xangai"), Some("Shanghái")], 31.2304, 121.4737, None, false),
        record("landmark", ["天安门", "Tiananmen Square", "ساحة تيانانمن"], [None, Some("Praça da Paz Celestial"), Some("Plaza de Tiananmén")], 39.9042, 116.4074, Some("北京市东城区长安街 | Chang'an Avenue, Dongcheng, Beijing | شارع تشانغ آن، بكين"), false),
        record("landmark", ["鸟巢", "Bird's Nest", "عش الطائر"], [None, Some("Ninho de Pássaro"), Some("Nido de Pájaro")], 39.9928, 116.3972, Some("北京市朝阳区国家体育场南路1号 | 1 National Stadium South Rd, Chaoyang, Beijing | 1 طريق الاستاد الوطني الجنوبي، بكين"), false),
        record("landmark", ["故宫", "Forbidden City", "المدينة المحرمة"], [Some("Kota Larangan"), Some("Cidade Proibida"), Some("Ciudad Prohibida")], 39.9163, 116.3972, Some("北京市东城区景山前街4号 | 4 Jingshan Front St, Dongcheng, Beijing | 4 شارع جينغشان، بكين"), false),
        record("landmark", ["八达岭长城", "Great Wall at Badaling", "سور الصين العظيم في بادالينغ"], [Some("Tembok Besar Badaling"), Some("Grande Muralha em Badaling"), Some("Gran Muralla en Badaling")], 40.3588, 116.0200, None, false),
        record("landmark", ["外滩", "The Bund", "البوند"], [None, None, None], 31.2400, 121.4900, Some("上海市黄浦区中山东一路 | Zhongshan East 1st Rd, Huangpu, Shanghai | طريق تشونغشان الشرقي، شنغهاي"), false),
        record("landmark", ["哈利法塔", "Burj Khalifa", "برج خليفة"], [None, None, None], 25.1972, 55.2744, Some("迪拜穆罕默德·本·拉希德大道1号 | 1 Sheikh Mohammed bin Rashid Blvd, Dubai | 1 شارع الشيخ محمد بن راشد، دبي"), false),
        record("landmark", ["双子塔", "Petronas Towers", "برجا بتروناس"], [Some("Menara Berkembar Petronas"), Some("Torres Petronas"), Some("Torres Petronas")], 3.1579, 101.7116, None, false),
        record("landmark", ["滨海湾金沙", "Marina Bay Sands", "مارينا باي ساندز"], [None, None, None], 1.2834, 103.8607, None, false),
        record("airport", ["北京首都国际机场", "Beijing Capital International Airport", "مطار بكين العاصمة الدولي"], [Some("Lapangan Terbang Antarabangsa Ibu Kota Beijing"), Some("Aeroporto Internacional da Capital de Pequim"), Some("Aeropuerto Internacional de Pekín-Capital")], 40.0799, 116.6031, None, false),
        record("airport", ["素万那普机场", "Suvarnabhumi Airport", "مطار سوفارنابومي"], [Some("Lapangan Terbang Suvarnabhumi"), Some("Aeroporto de Suvarnabhumi"), Some("Aeropuerto de Suvarnabhumi")], 13.6900, 100.7501, None, false),
        record("airport", ["迪拜国际机场", "Dubai International Airport", "مطار دبي الدولي"], [Some("Lapangan Terbang Antarabangsa Dubai"), Some("Aeroporto Internacional de Dubai"), Some("Aeropuerto Internacional de Dubái")], 25.2532, 55.3657, None, false),
        record("restaurant", ["全聚德前门店", "Quanjude Qianmen", "مطعم تشيوانجيوده"], [None, None, None], 39.8991, 116.3977, Some("北京市东城区前门大街30号 | 30 Qianmen St, Dongcheng, Beijing | 30 شارع تشيانمن، بكين"), false),
        record("hotel", ["北京王府半岛酒店", "The Peninsula Beijing", "فندق بينينسولا بكين"], [None, None, None], 39.9139, 116.4113, Some("北京市东城区王府井金鱼胡同8号 | 8 Goldfish Lane, Wangfujing, Beijing | 8 زقاق السمكة الذهبية، بكين"), false),
        record("bank", ["中国银行总行", "Bank of China Head Office", "بنك الصين - المقر الرئيسي"], [None, Some("Banco da China"), Some("Banco de China")], 39.9130, 116.3620, Some("北京市西城区复兴门内大街1号 | 1 Fuxingmen Inner St, Xicheng, Beijing | 1 شارع فوشينغمن، بكين"), false),
    ]
}
