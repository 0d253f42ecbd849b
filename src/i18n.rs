//! Localized UI strings
//!
//! One lookup table maps `(key, language)` to text. Components resolve strings
//! through a [`Translator`] for the active language instead of branching on the
//! language themselves.

use fxhash::FxHashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    En,
    Ar,
    Ms,
    Pt,
    Es,
}

/// Writing direction of a language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::Zh,
        Language::En,
        Language::Ar,
        Language::Ms,
        Language::Pt,
        Language::Es,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
            Language::Ar => "ar",
            Language::Ms => "ms",
            Language::Pt => "pt",
            Language::Es => "es",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Name of the language in the language itself, for the picker
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::Zh => "中文",
            Language::En => "English",
            Language::Ar => "العربية",
            Language::Ms => "Bahasa Melayu",
            Language::Pt => "Português",
            Language::Es => "Español",
        }
    }

    pub fn direction(&self) -> TextDirection {
        match self {
            Language::Ar => TextDirection::Rtl,
            _ => TextDirection::Ltr,
        }
    }

    fn column(&self) -> usize {
        Self::ALL
            .iter()
            .position(|lang| lang == self)
            .unwrap_or_default()
    }
}

/// Keys of the UI string table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    SearchPlaceholder,
    RecentSearches,
    GetDirections,
    RoutePlanning,
    StartPoint,
    EndPoint,
    RouteDetails,
    Route,
    PlanRoute,
    Distance,
    SetAsStart,
    SetAsEnd,
    Start,
    End,
    DrivingMode,
    TruckMode,
    Mode,
    TurnLeft,
    TurnRight,
    GoStraight,
    Along,
    Arrive,
    GoHere,
    SearchNearby,
    PointOfInterest,
    SearchNearbyTemplate,
    SwapStartEnd,
    SelectCity,
    ClearRoute,
    View3D,
    View2D,
    MapStyle,
    StandardMap,
    SatelliteMap,
    TerrainMap,
    EstimatedTime,
    Hours,
    Minutes,
    Waypoint,
    AddWaypoint,
    RemoveWaypoint,
    QuickSearch,
    ClearAll,
    RouteOptions,
    FastestRoute,
    ShortestRoute,
    EcoRoute,
    Recommended,
    CollapsePanel,
    ExpandPanel,}

type Row = (TextKey, [&'static str; 6]);

// Columns follow `Language::ALL`: zh, en, ar, ms, pt, es
const ROWS: &[Row] = &[
    (TextKey::SearchPlaceholder, ["搜索地点", "Search places", "البحث عن الأماكن", "Cari lokasi", "Pesquisar locais", "Buscar lugares"]),
    (TextKey::RecentSearches, ["最近搜索", "Recent searches", "عمليات البحث الأخيرة", "Carian terkini", "Pesquisas recentes", "Búsquedas recientes"]),
    (TextKey::GetDirections, ["路线规划", "Get Directions", "الحصول على الاتجاهات", "Dapatkan Arah", "Obter Direções", "Obtener Direcciones"]),
    (TextKey::RoutePlanning, ["路线规划", "Route Planning", "تخطيط المسار", "Perancangan Laluan", "Planejamento de Rota", "Planificación de Ruta"]),
    (TextKey::StartPoint, ["起点", "Start point", "نقطة البداية", "Titik permulaan", "Ponto de partida", "Punto de inicio"]),
    (TextKey::EndPoint, ["终点", "End point", "نقطة النهاية", "Titik akhir", "Ponto de chegada", "Ponto final"]),
    (TextKey::RouteDetails, ["路线详情", "Route Details", "تفاصيل المسار", "Butiran Laluan", "Detalhes da Rota", "Detalles de la Ruta"]),
    (TextKey::Route, ["路线", "Route", "المسار", "Laluan", "Rota", "Ruta"]),
    (TextKey::PlanRoute, ["规划路线", "Plan Route", "تخطيط المسار", "Rancang Laluan", "Planejar Rota", "Planificar Ruta"]),
    (TextKey::Distance, ["距离", "Distance", "المسافة", "Jarak", "Distância", "Distancia"]),
    (TextKey::SetAsStart, ["选择为起点", "Set as start point", "تعيين كنقطة بداية", "Tetapkan sebagai titik permulaan", "Definir como ponto de partida", "Establecer como punto de inicio"]),
    (TextKey::SetAsEnd, ["选择为终点", "Set as end point", "تعيين كنقطة نهاية", "Tetapkan sebagai titik akhir", "Definir como ponto de chegada", "Establecer como punto de final"]),
    (TextKey::Start, ["起", "Start", "بداية", "Mula", "Início", "Inicio"]),
    (TextKey::End, ["终", "End", "نهاية", "Tamat", "Fim", "Fin"]),
    (TextKey::DrivingMode, ["驾车模式", "Driving Mode", "وضع القيادة", "Mod Memandu", "Modo de Condução", "Modo de Conducción"]),
    (TextKey::TruckMode, ["货车模式", "Truck Mode", "وضع الشاحنة", "Modo Lori", "Modo Caminhão", "Modo Camión"]),
    (TextKey::Mode, ["模式", "Mode", "وضع", "Mod", "Modo", "Modo"]),
    (TextKey::TurnLeft, ["左转", "Turn left", "انعطف يسارًا", "Belok kiri", "Vire à esquerda", "Gire a la izquierda"]),
    (TextKey::TurnRight, ["右转", "Turn right", "انعطف يمينًا", "Belok kanan", "Vire à direita", "Gire a la derecha"]),
    (TextKey::GoStraight, ["直行", "Go straight", "استمر بشكل مستقيم", "Terus ke hadapan", "Siga em frente", "Continúe recto"]),
    (TextKey::Along, ["沿", "Along", "على طول", "Sepanjang", "Ao longo de", "A lo largo de"]),
    (TextKey::Arrive, ["到达", "Arrive at", "الوصول إلى", "Tiba di", "Chegar a", "Llegar a"]),
    (TextKey::GoHere, ["去这里", "Go here", "اذهب إلى هنا", "Pergi ke sini", "Ir para aqui", "Ir aquí"]),
    (TextKey::SearchNearby, ["搜附近", "Search nearby", "البحث في الجوار", "Cari berdekatan", "Buscar próximo", "Buscar cerca"]),
    (TextKey::PointOfInterest, ["兴趣点", "Point of Interest", "نقطة اهتمام", "Tempat Menarik", "Ponto de Interesse", "Punto de Interés"]),
    (TextKey::SearchNearbyTemplate, ["在{location}附近搜索", "Search near {location}", "البحث بالقرب من {location}", "Cari berhampiran {location}", "Buscar perto de {location}", "Buscar cerca de {location}"]),
    (TextKey::SwapStartEnd, ["交换起终点", "Swap start/end", "تبديل البداية/النهاية", "Tukar permulaan/akhir", "Trocar início/fim", "Intercambiar inicio/fin"]),
    (TextKey::SelectCity, ["选择城市", "Select City", "اختر المدينة", "Pilih Bandar", "Selecionar Cidade", "Seleccionar Ciudad"]),
    (TextKey::ClearRoute, ["清除路线", "Clear Route", "مسح المسار", "Kosongkan Laluan", "Limpar Rota", "Limpiar Rota"]),
    (TextKey::View3D, ["3D视角", "3D View", "عرض ثلاثي الأبعاد", "Paparan 3D", "Visualização 3D", "Vista 3D"]),
    (TextKey::View2D, ["2D视角", "2D View", "عرض ثنائي الأبعاد", "Paparan 2D", "Visualização 2D", "Vista 2D"]),
    (TextKey::MapStyle, ["地图样式", "Map Style", "نمط الخريطة", "Gaya Peta", "Estilo do Mapa", "Estilo de Mapa"]),
    (TextKey::StandardMap, ["标准地图", "Standard", "قياسي", "Standard", "Padrão", "Estándar"]),
    (TextKey::SatelliteMap, ["卫星地图", "Satellite", "الأقمار الصناعية", "Satelit", "Satélite", "Satélite"]),
    (TextKey::TerrainMap, ["地形地图", "Terrain", "التضاريس", "Rupa Bumi", "Terreno", "Terreno"]),
    (TextKey::EstimatedTime, ["预计时间", "Estimated Time", "الوقت المقدر", "Masa Anggaran", "Tempo Estimado", "Tiempo Estimado"]),
    (TextKey::Hours, ["小时", "h", "ساعة", "jam", "h", "h"]),
    (TextKey::Minutes, ["分钟", "min", "دقيقة", "minit", "min", "min"]),
    (TextKey::Waypoint, ["途经点", "Waypoint", "نقطة مرور", "Titik Singgah", "Ponto de Passagem", "Punto de Paso"]),
    (TextKey::AddWaypoint, ["添加途经点", "Add waypoint", "إضافة نقطة مرور", "Tambah titik singgah", "Adicionar ponto de passagem", "Añadir punto de paso"]),
    (TextKey::RemoveWaypoint, ["删除途经点", "Remove waypoint", "حذف نقطة مرور", "Buang titik singgah", "Remover ponto de passagem", "Eliminar punto de paso"]),
    (TextKey::QuickSearch, ["快捷搜索", "Quick Search", "بحث سريع", "Carian Pantas", "Busca Rápida", "Búsqueda Rápida"]),
    (TextKey::ClearAll, ["清空", "Clear All", "مسح الكل", "Kosongkan Semua", "Limpar Tudo", "Limpiar Todo"]),
    (TextKey::RouteOptions, ["路线选择", "Route Options", "خيارات المسار", "Pilihan Laluan", "Opções de Rota", "Opciones de Ruta"]),
    (TextKey::FastestRoute, ["最快路线", "Fastest Route", "المسار الأسرع", "Laluan Terpantas", "Rota Mais Rápida", "Ruta Más Rápida"]),
    (TextKey::ShortestRoute, ["距离最短", "Shortest Distance", "أقصر مسافة", "Jarak Terpendek", "Distância Mais Curta", "Distancia Más Corta"]),
    (TextKey::EcoRoute, ["环保路线", "Eco-Friendly", "صديق للبيئة", "Mesra Alam", "Ecológica", "Ecológica"]),
    (TextKey::Recommended, ["推荐", "Recommended", "موصى به", "Disyorkan", "Recomendado", "Recomendado"]),
    (TextKey::CollapsePanel, ["收起面板", "Collapse panel", "طي اللوحة", "Tutup panel", "Recolher painel", "Contraer panel"]),
    (TextKey::ExpandPanel, ["展开面板", "Expand panel", "توسيع اللوحة", "Kembangkan panel", "Expandir painel", "Expandir panel"]),];

// Location type labels, same column order
const TYPE_LABELS: &[(&str, [&str; 6])] = &[
    ("city", ["城市", "City", "مدينة", "Bandar", "Cidade", "Ciudad"]),
    ("landmark", ["地标", "Landmark", "معلم", "Mercu Tanda", "Marco", "Punto de Interés"]),
    ("airport", ["机场", "Airport", "مطار", "Lapangan Terbang", "Aeroporto", "Aeropuerto"]),
    ("restaurant", ["餐厅", "Restaurant", "مطعم", "Restoran", "Restaurante", "Restaurante"]),
    ("hotel", ["酒店", "Hotel", "فندق", "Hotel", "Hotel", "Hotel"]),
    ("bank", ["银行", "Bank", "بنك", "Bank", "Banco", "Banco"]),
    ("shopping", ["购物", "Shopping", "تسوق", "Membeli-belah", "Compras", "Compras"]),
    ("park", ["公园", "Park", "حديقة", "Taman", "Parque", "Parque"]),
];

static TABLE: Lazy<FxHashMap<(TextKey, Language), &'static str>> = Lazy::new(|| {
    let mut table = FxHashMap::default();
    for (key, texts) in ROWS {
        for (language, text) in Language::ALL.iter().zip(texts.iter()) {
            table.insert((*key, *language), *text);
        }
    }
    table
});

/// Resolves UI strings for one language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn direction(&self) -> TextDirection {
        self.language.direction()
    }

    /// Looks up `key`, falling back to English when a row is missing a language
    pub fn text(&self, key: TextKey) -> &'static str {
        TABLE
            .get(&(key, self.language))
            .or_else(|| TABLE.get(&(key, Language::En)))
            .copied()
            .unwrap_or_default()
    }

    /// `"Search near {location}"` with the anchor's name filled in
    pub fn search_nearby(&self, location: &str) -> String {
        self.text(TextKey::SearchNearbyTemplate)
            .replace("{location}", location)
    }

    /// Localized label for a location type key; unknown keys come back unchanged
    pub fn type_label(&self, kind: &str) -> String {
        TYPE_LABELS
            .iter()
            .find(|(key, _)| *key == kind)
            .map(|(_, labels)| labels[self.language.column()].to_string())
            .unwrap_or_else(|| kind.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_every_language() {
        for (key, texts) in ROWS {
            for (language, text) in Language::ALL.iter().zip(texts.iter()) {
                assert!(!text.is_empty(), "{:?}/{:?} is empty", key, language);
            }
        }
        assert_eq!(TABLE.len(), ROWS.len() * Language::ALL.len());
    }

    #[test]
    fn test_lookup_per_language() {
        assert_eq!(Translator::new(Language::Zh).text(TextKey::Start), "起");
        assert_eq!(Translator::new(Language::En).text(TextKey::ClearRoute), "Clear Route");
        assert_eq!(Translator::new(Language::Es).text(TextKey::Minutes), "min");
        assert_eq!(Translator::default().language(), Language::Zh);
    }

    #[test]
    fn test_direction() {
        assert_eq!(Translator::new(Language::Ar).direction(), TextDirection::Rtl);
        assert_eq!(Translator::new(Language::Pt).direction(), TextDirection::Ltr);
    }

    #[test]
    fn test_search_nearby_template() {
        let en = Translator::new(Language::En);
        assert_eq!(en.search_nearby("Bund"), "Search near Bund");
        let zh = Translator::new(Language::Zh);
        assert_eq!(zh.search_nearby("外滩"), "在外滩附近搜索");
    }

    #[test]
    fn test_type_labels() {
        let ms = Translator::new(Language::Ms);
        assert_eq!(ms.type_label("airport"), "Lapangan Terbang");
        assert_eq!(ms.type_label("spaceport"), "spaceport");
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("AR"), Some(Language::Ar));
        assert_eq!(Language::from_code("fr"), None);
        for language in Language::ALL {
            assert_eq!(Language::from_code(language.code()), Some(language));
        }
    }
}
