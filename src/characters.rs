//! Character roster. Ten fixed records; each character collects its own reward kind.

use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum CharacterId {
    Barash,
    Krosh,
    Ezhik,
    Losyash,
    Sovunya,
    Nyusha,
    Pin,
    KarKarych,
    Kopatych,
    Bibi,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum RewardKind {
    Stihi,
    Carrot,
    Apple,
    Formula,
    Berries,
    Gear,
    Planet,
    Flower,
    Potato,
    Notes,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterInfo {
    pub id: CharacterId,
    pub name: &'static str,
    pub reward: RewardKind,
    pub color: &'static str,
    pub description: &'static str,
}

pub const CHARACTERS: [CharacterInfo; 10] = [
    CharacterInfo {
        id: CharacterId::Barash,
        name: "Бараш",
        reward: RewardKind::Stihi,
        color: "#E879F9",
        description: "Поэт и мечтатель, любит стихи",
    },
    CharacterInfo {
        id: CharacterId::Krosh,
        name: "Крош",
        reward: RewardKind::Carrot,
        color: "#60A5FA",
        description: "Веселый заяц, обожает морковку",
    },
    CharacterInfo {
        id: CharacterId::Ezhik,
        name: "Ежик",
        reward: RewardKind::Apple,
        color: "#34D399",
        description: "Серьезный и умный, собирает яблоки",
    },
    CharacterInfo {
        id: CharacterId::Losyash,
        name: "Лосяш",
        reward: RewardKind::Formula,
        color: "#FBBF24",
        description: "Ученый, изучает формулы",
    },
    CharacterInfo {
        id: CharacterId::Sovunya,
        name: "Совунья",
        reward: RewardKind::Berries,
        color: "#A78BFA",
        description: "Мудрая сова, собирает ягоды",
    },
    CharacterInfo {
        id: CharacterId::Nyusha,
        name: "Нюша",
        reward: RewardKind::Flower,
        color: "#F472B6",
        description: "Модница, любит цветы",
    },
    CharacterInfo {
        id: CharacterId::Pin,
        name: "Пин",
        reward: RewardKind::Gear,
        color: "#6B7280",
        description: "Изобретатель, чинит шестеренки",
    },
    CharacterInfo {
        id: CharacterId::KarKarych,
        name: "Кар-Карыч",
        reward: RewardKind::Notes,
        color: "#EF4444",
        description: "Певец, создает музыкальные ноты",
    },
    CharacterInfo {
        id: CharacterId::Kopatych,
        name: "Копатыч",
        reward: RewardKind::Potato,
        color: "#92400E",
        description: "Садовод, выращивает картошку",
    },
    CharacterInfo {
        id: CharacterId::Bibi,
        name: "Биби",
        reward: RewardKind::Planet,
        color: "#7C3AED",
        description: "Исследователь, изучает планеты",
    },
];

impl CharacterId {
    pub const ALL: [CharacterId; 10] = [
        CharacterId::Barash,
        CharacterId::Krosh,
        CharacterId::Ezhik,
        CharacterId::Losyash,
        CharacterId::Sovunya,
        CharacterId::Nyusha,
        CharacterId::Pin,
        CharacterId::KarKarych,
        CharacterId::Kopatych,
        CharacterId::Bibi,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CharacterId::Barash => "barash",
            CharacterId::Krosh => "krosh",
            CharacterId::Ezhik => "ezhik",
            CharacterId::Losyash => "losyash",
            CharacterId::Sovunya => "sovunya",
            CharacterId::Nyusha => "nyusha",
            CharacterId::Pin => "pin",
            CharacterId::KarKarych => "kar-karych",
            CharacterId::Kopatych => "kopatych",
            CharacterId::Bibi => "bibi",
        }
    }

    pub fn info(self) -> &'static CharacterInfo {
        // CHARACTERS is laid out in declaration order
        &CHARACTERS[self as usize]
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CharacterId::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| GameError::UnknownCharacter(s.to_string()))
    }
}
