use serde::Serialize;

/// A selectable province and the coordinates used for its forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Province {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

const fn province(name: &'static str, latitude: f64, longitude: f64) -> Province {
    Province { name, latitude, longitude }
}

// Order is the dropdown order.
static PROVINCES: [Province; 10] = [
    province("Santo Domingo", 18.4861, -69.9312),
    province("Santiago", 19.4517, -70.6970),
    province("La Vega", 19.2220, -70.5280),
    province("San Cristóbal", 18.4160, -70.1090),
    province("Puerto Plata", 19.7934, -70.6884),
    province("La Romana", 18.4300, -68.9700),
    province("San Pedro de Macorís", 18.4500, -69.3000),
    province("Barahona", 18.2085, -71.1008),
    province("Bonao", 18.9395, -70.4095),
    province("Higüey", 18.6167, -68.7000),
];

/// All provinces in catalog order.
pub fn provinces() -> &'static [Province] {
    &PROVINCES
}

pub fn names() -> impl Iterator<Item = &'static str> {
    PROVINCES.iter().map(|p| p.name)
}

/// Exact, case-sensitive lookup by province name.
pub fn lookup(name: &str) -> Option<&'static Province> {
    PROVINCES.iter().find(|p| p.name == name)
}
