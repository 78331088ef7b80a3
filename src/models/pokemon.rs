//! Pokemon API payloads.

use serde::{Deserialize, Serialize};

/// Full record returned by `/pokemon/:name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonData {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub base_experience: Option<u32>,
    pub types: Vec<String>,
    pub abilities: Vec<Ability>,
    pub stats: Vec<Stat>,
    pub sprites: Sprites,
    #[serde(default)]
    pub moves: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub is_hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub base_stat: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprites {
    pub front_default: String,
    #[serde(default)]
    pub front_shiny: Option<String>,
    #[serde(default)]
    pub back_default: Option<String>,
    #[serde(default)]
    pub back_shiny: Option<String>,
    #[serde(default)]
    pub official_artwork: Option<String>,
}

/// Summary row of the `/pokemon` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonListItem {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub sprite: String,
    #[serde(default)]
    pub official_artwork: Option<String>,
}

/// One page of the `/pokemon` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonPage {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<PokemonListItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pokemon_deserialize_with_optional_fields_missing() {
        let json = r#"{
            "id": 25,
            "name": "pikachu",
            "height": 4,
            "weight": 60,
            "types": ["electric"],
            "abilities": [{"name": "static", "is_hidden": false}],
            "stats": [{"name": "speed", "base_stat": 90}],
            "sprites": {"front_default": "https://img/25.png"}
        }"#;
        let pokemon: PokemonData = serde_json::from_str(json).unwrap();

        assert_eq!(pokemon.name, "pikachu");
        assert!(pokemon.base_experience.is_none());
        assert!(pokemon.moves.is_none());
        assert!(pokemon.sprites.front_shiny.is_none());
    }

    #[test]
    fn test_pokemon_rejects_wrong_shape() {
        let json = r#"{"id": "twenty-five", "name": "pikachu"}"#;
        assert!(serde_json::from_str::<PokemonData>(json).is_err());
    }

    #[test]
    fn test_page_deserialize() {
        let json = r#"{
            "count": 1302,
            "next": "http://localhost:3000/pokemon?limit=1&offset=1",
            "previous": null,
            "results": [{"id": 1, "name": "bulbasaur", "types": ["grass", "poison"], "sprite": "s"}]
        }"#;
        let page: PokemonPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, 1302);
        assert!(page.previous.is_none());
        assert_eq!(page.results[0].types.len(), 2);
    }
}
