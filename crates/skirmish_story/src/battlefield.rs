use serde::{Deserialize, Serialize};
use skirmish_engine::BattleRng;

/// Scene dressing for the report. The engine never looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battlefield {
    pub location: String,
    pub weather: String,
    pub terrain: String,
}

impl Battlefield {
    pub fn new(
        location: impl Into<String>,
        weather: impl Into<String>,
        terrain: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            weather: weather.into(),
            terrain: terrain.into(),
        }
    }
}

const PRESETS: [(&str, &str, &str); 5] = [
    (
        "an ancient jungle temple",
        "a misty midnight downpour",
        "dense jungle with crumbling ruins",
    ),
    (
        "the fiery pits of Mustafar",
        "volcanic ash rain and searing heat",
        "rocky slopes and flowing lava",
    ),
    (
        "a snowy tundra on Hoth",
        "blizzard conditions with biting cold",
        "open snowfields and scattered ice caverns",
    ),
    (
        "a windswept desert plain on Tatooine",
        "a swirling sandstorm under a scorching sun",
        "open desert with occasional rocky outcroppings",
    ),
    (
        "a rain-soaked urban battlefield",
        "thunderstorms and flickering street lights",
        "tight alleyways and ruined buildings",
    ),
];

pub fn presets() -> Vec<Battlefield> {
    PRESETS
        .iter()
        .map(|&(location, weather, terrain)| Battlefield::new(location, weather, terrain))
        .collect()
}

/// Chooses a preset with the battle's own random source.
pub fn pick_preset(rng: &mut BattleRng) -> Battlefield {
    let (location, weather, terrain) = rng.choose(&PRESETS).copied().unwrap_or(PRESETS[0]);
    Battlefield::new(location, weather, terrain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_come_from_presets() {
        let all = presets();
        let mut rng = BattleRng::new(12);
        for _ in 0..20 {
            assert!(all.contains(&pick_preset(&mut rng)));
        }
    }

    #[test]
    fn pick_is_seeded() {
        let a = pick_preset(&mut BattleRng::new(5));
        let b = pick_preset(&mut BattleRng::new(5));
        assert_eq!(a, b);
    }
}
