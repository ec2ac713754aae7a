//! Built-in boards.
//!
//! `classic` is the 42-territory world map; `polytech` is a 17-territory
//! campus map grouped into four buildings. Region bonuses are left to the
//! default (half the territory count, rounded up).

use std::collections::BTreeMap;

use super::world::{BoardSpec, RegionSpec};
use crate::error::ConfigError;

/// Names of the built-in boards.
pub const BOARD_NAMES: [&str; 2] = ["classic", "polytech"];

/// Returns a built-in board by name.
pub fn by_name(name: &str) -> Result<BoardSpec, ConfigError> {
    match name {
        "classic" => Ok(classic()),
        "polytech" => Ok(polytech()),
        other => Err(ConfigError::UnknownBoard(other.to_string())),
    }
}

/// Builds a `BoardSpec` from static region and neighbour tables.
pub fn from_tables(
    name: &str,
    regions: &[(&str, Option<u32>, &[&str])],
    adjacency: &[(&str, &[&str])],
) -> BoardSpec {
    BoardSpec {
        name: name.to_string(),
        regions: regions
            .iter()
            .map(|&(name, bonus, territories)| RegionSpec {
                name: name.to_string(),
                bonus,
                territories: territories.iter().map(|t| t.to_string()).collect(),
            })
            .collect(),
        adjacency: adjacency
            .iter()
            .map(|&(t, ns)| (t.to_string(), ns.iter().map(|n| n.to_string()).collect()))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// The classic 42-territory world board.
pub fn classic() -> BoardSpec {
    from_tables(
        "classic",
        &[
            (
                "North America",
                None,
                &[
                    "Alaska", "Alberta", "Central America", "Eastern United States", "Greenland",
                    "Northwest Territory", "Ontario", "Quebec", "Western United States",
                ],
            ),
            ("South America", None, &["Argentina", "Brazil", "Peru", "Venezuela"]),
            (
                "Europe",
                None,
                &[
                    "Great Britain", "Iceland", "Northern Europe", "Scandinavia",
                    "Southern Europe", "Ukraine", "Western Europe",
                ],
            ),
            (
                "Africa",
                None,
                &["Congo", "East Africa", "Egypt", "Madagascar", "North Africa", "South Africa"],
            ),
            (
                "Asia",
                None,
                &[
                    "Afghanistan", "China", "India", "Irkutsk", "Japan", "Kamchatka",
                    "Middle East", "Mongolia", "Siam", "Siberia", "Ural", "Yakutsk",
                ],
            ),
            (
                "Australia",
                None,
                &["Eastern Australia", "Indonesia", "New Guinea", "Western Australia"],
            ),
        ],
        &[
            ("Afghanistan", &["Ukraine", "Ural", "China", "India", "Middle East"]),
            ("Alaska", &["Northwest Territory", "Alberta", "Kamchatka"]),
            ("Alberta", &["Alaska", "Northwest Territory", "Ontario", "Western United States"]),
            ("Argentina", &["Brazil", "Peru"]),
            ("Brazil", &["Venezuela", "Argentina", "Peru", "North Africa"]),
            ("Central America", &["Western United States", "Eastern United States", "Venezuela"]),
            ("China", &["Afghanistan", "Ural", "Siberia", "Mongolia", "India", "Siam"]),
            ("Congo", &["North Africa", "East Africa", "South Africa"]),
            (
                "East Africa",
                &["Egypt", "Congo", "South Africa", "North Africa", "Madagascar", "Middle East"],
            ),
            ("Eastern Australia", &["New Guinea", "Western Australia"]),
            (
                "Eastern United States",
                &["Ontario", "Quebec", "Western United States", "Central America"],
            ),
            ("Egypt", &["Southern Europe", "North Africa", "East Africa", "Middle East"]),
            ("Great Britain", &["Iceland", "Western Europe", "Northern Europe", "Scandinavia"]),
            ("Greenland", &["Northwest Territory", "Ontario", "Quebec", "Iceland"]),
            ("Iceland", &["Greenland", "Great Britain", "Scandinavia"]),
            ("India", &["Afghanistan", "China", "Siam", "Middle East"]),
            ("Indonesia", &["Siam", "New Guinea", "Western Australia"]),
            ("Irkutsk", &["Siberia", "Yakutsk", "Kamchatka", "Mongolia"]),
            ("Japan", &["Kamchatka", "Mongolia"]),
            ("Kamchatka", &["Yakutsk", "Irkutsk", "Mongolia", "Japan", "Alaska"]),
            ("Madagascar", &["East Africa", "South Africa"]),
            (
                "Middle East",
                &["Ukraine", "Afghanistan", "India", "East Africa", "Egypt", "Southern Europe"],
            ),
            ("Mongolia", &["Siberia", "Irkutsk", "Kamchatka", "Japan", "China"]),
            ("New Guinea", &["Indonesia", "Eastern Australia", "Western Australia"]),
            (
                "North Africa",
                &["Brazil", "Western Europe", "Southern Europe", "Egypt", "East Africa", "Congo"],
            ),
            (
                "Northern Europe",
                &["Great Britain", "Ukraine", "Scandinavia", "Western Europe", "Southern Europe"],
            ),
            ("Northwest Territory", &["Alaska", "Alberta", "Ontario", "Greenland"]),
            (
                "Ontario",
                &[
                    "Northwest Territory", "Alberta", "Western United States",
                    "Eastern United States", "Quebec", "Greenland",
                ],
            ),
            ("Peru", &["Venezuela", "Brazil", "Argentina"]),
            ("Quebec", &["Ontario", "Eastern United States", "Greenland"]),
            ("Scandinavia", &["Iceland", "Ukraine", "Northern Europe", "Great Britain"]),
            ("Siam", &["India", "China", "Indonesia"]),
            ("Siberia", &["Ural", "China", "Mongolia", "Irkutsk", "Yakutsk"]),
            ("South Africa", &["Congo", "East Africa", "Madagascar"]),
            (
                "Southern Europe",
                &[
                    "Western Europe", "Northern Europe", "Ukraine", "Egypt", "North Africa",
                    "Middle East",
                ],
            ),
            (
                "Ukraine",
                &[
                    "Ural", "Afghanistan", "Middle East", "Southern Europe", "Northern Europe",
                    "Scandinavia",
                ],
            ),
            ("Ural", &["Ukraine", "Afghanistan", "China", "Siberia"]),
            ("Venezuela", &["Central America", "Brazil", "Peru"]),
            ("Western Australia", &["Indonesia", "New Guinea", "Eastern Australia"]),
            (
                "Western Europe",
                &["Great Britain", "Northern Europe", "Southern Europe", "North Africa"],
            ),
            (
                "Western United States",
                &["Alberta", "Ontario", "Eastern United States", "Central America"],
            ),
            ("Yakutsk", &["Siberia", "Irkutsk", "Kamchatka"]),
        ],
    )
}

/// The 17-territory campus board.
pub fn polytech() -> BoardSpec {
    const SI: &str = "Service informatique";
    const LSH: &str = "Langues et sciences humaines";
    const PEIP: &str = "Peip";
    const BUREAUX: &str = "Bureaux";
    const HALL: &str = "Hall d'entrée";
    const CHAUD: &str = "Salles chaudes";
    const FROID: &str = "Salles froides";
    const AMPHI: &str = "Amphithéâtres";
    const DIRECTION: &str = "Direction";
    const INFO: &str = "Département d'informatique";
    const EON: &str = "Département d'électronique";
    const MACHINES: &str = "Salles des machines";
    const SRT: &str = "Département S.R.T.";
    const MER: &str = "Océan Atlantique";
    const BIERE: &str = "Laboratoire de bière bleue";
    const LABO: &str = "Laboratoires";
    const DEGUSTATION: &str = "Dégustation";

    from_tables(
        "polytech",
        &[
            ("IHT", None, &[SI, LSH, PEIP]),
            ("Isitem", None, &[BUREAUX, HALL, CHAUD, FROID, MACHINES]),
            ("Ireste", None, &[AMPHI, DIRECTION, INFO, EON, SRT]),
            ("Gavy", None, &[MER, BIERE, LABO, DEGUSTATION]),
        ],
        &[
            (SI, &[LSH, PEIP]),
            (LSH, &[SI, PEIP, BUREAUX]),
            (PEIP, &[SI, LSH, AMPHI, HALL, MER]),
            (BUREAUX, &[LSH, CHAUD, HALL]),
            (CHAUD, &[BUREAUX, FROID]),
            (FROID, &[CHAUD, HALL]),
            (HALL, &[BUREAUX, FROID, AMPHI, PEIP]),
            (AMPHI, &[PEIP, HALL, DIRECTION, MACHINES]),
            (DIRECTION, &[AMPHI, EON, LABO]),
            (MACHINES, &[AMPHI, INFO, EON]),
            (INFO, &[MACHINES, EON]),
            (EON, &[MACHINES, DIRECTION, SRT, INFO]),
            (SRT, &[EON]),
            (MER, &[BIERE, PEIP]),
            (BIERE, &[MER, DEGUSTATION, LABO]),
            (DEGUSTATION, &[BIERE, LABO]),
            (LABO, &[BIERE, DEGUSTATION, DIRECTION]),
        ],
    )
}
