//! Backend endpoint catalogue and URL builder.
//!
//! Built URLs double as cache keys, so the same logical request must always
//! produce the same string.

pub const POKEMON: &str = "/pokemon";
pub const POKEMON_BY_NAME: &str = "/pokemon/:name";
pub const POKEMON_SPECIES: &str = "/pokemon/:name/species";
pub const POKEMON_EVOLUTION: &str = "/pokemon/:name/evolution";
pub const TYPES: &str = "/types";
pub const TYPE_INFO: &str = "/type/:name";
pub const SEARCH_BY_TYPE: &str = "/search/type/:type";
pub const GENERATIONS: &str = "/generations";
pub const GENERATION_INFO: &str = "/generation/:id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `endpoint` to the base URL, substituting `:param` placeholders.
    pub fn build(&self, endpoint: &str, params: &[(&str, &str)]) -> String {
        let path = params.iter().fold(endpoint.to_string(), |path, (key, value)| {
            path.replace(&format!(":{}", key), value)
        });
        format!("{}{}", self.base_url, path)
    }

    pub fn pokemon(&self, name: &str) -> String {
        self.build(POKEMON_BY_NAME, &[("name", name.to_lowercase().as_str())])
    }

    pub fn pokemon_list(&self, limit: u32, offset: u32) -> String {
        format!(
            "{}?limit={}&offset={}",
            self.build(POKEMON, &[]),
            limit,
            offset
        )
    }

    pub fn species(&self, name: &str) -> String {
        self.build(POKEMON_SPECIES, &[("name", name.to_lowercase().as_str())])
    }

    pub fn evolution(&self, name: &str) -> String {
        self.build(POKEMON_EVOLUTION, &[("name", name.to_lowercase().as_str())])
    }

    pub fn by_type(&self, type_name: &str, limit: u32) -> String {
        format!(
            "{}?limit={}",
            self.build(SEARCH_BY_TYPE, &[("type", type_name.to_lowercase().as_str())]),
            limit
        )
    }

    pub fn types(&self) -> String {
        self.build(TYPES, &[])
    }

    pub fn type_info(&self, name: &str) -> String {
        self.build(TYPE_INFO, &[("name", name.to_lowercase().as_str())])
    }

    pub fn generations(&self) -> String {
        self.build(GENERATIONS, &[])
    }

    pub fn generation(&self, id: u32) -> String {
        self.build(GENERATION_INFO, &[("id", id.to_string().as_str())])
    }
}
