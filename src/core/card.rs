//! Card records as owned by the catalog
//!
//! Cards are read-only from the engine's perspective. The only derived values
//! are the normalized name (used for punctuation-insensitive matching) and the
//! total cost (used by the cost-bucket filter and the total-cost sort).

use crate::core::error::CardError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Card identifier: set code, a dash, then the partition-local sequence code
///
/// ```
/// use cardbase::core::card::CardId;
///
/// let id = CardId::new("CMF-001-J");
/// assert_eq!(id.set_code(), "CMF");
/// assert_eq!(id.sequence(), "001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Partition code, i.e. everything before the first dash
    pub fn set_code(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }

    /// Second dash-separated segment; empty when the identifier has no dash
    pub fn sequence(&self) -> &str {
        self.0.split('-').nth(1).unwrap_or_default()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A single symbol of a card's cost
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CostToken {
    /// A coloured attribute symbol such as `{R}`
    Attribute(String),
    /// A generic pip such as `{2}`
    Generic(u32),
    /// The wildcard `{X}`
    Wildcard,
}

impl CostToken {
    /// Contribution of this token to the total cost
    pub fn value(&self) -> u64 {
        match self {
            CostToken::Attribute(_) => 1,
            CostToken::Generic(n) => u64::from(*n),
            CostToken::Wildcard => 0,
        }
    }
}

impl fmt::Display for CostToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostToken::Attribute(code) => write!(f, "{{{}}}", code),
            CostToken::Generic(n) => write!(f, "{{{}}}", n),
            CostToken::Wildcard => f.write_str("{X}"),
        }
    }
}

/// Ordered cost symbols, written as braced tokens (`{R}{R}{2}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cost {
    tokens: Vec<CostToken>,
}

impl Cost {
    pub fn new(tokens: Vec<CostToken>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[CostToken] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Sum of every token's contribution; wildcards count as zero
    ///
    /// Saturates instead of overflowing on absurd pip values.
    pub fn total(&self) -> u64 {
        self.tokens
            .iter()
            .fold(0u64, |total, token| total.saturating_add(token.value()))
    }

    pub fn has_wildcard(&self) -> bool {
        self.tokens.contains(&CostToken::Wildcard)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl FromStr for Cost {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| CardError::InvalidCost {
            cost: s.to_string(),
            message: message.to_string(),
        };

        let mut tokens = Vec::new();
        let mut rest = s.trim();
        while !rest.is_empty() {
            let inner = rest
                .strip_prefix('{')
                .ok_or_else(|| invalid("expected '{'"))?;
            let end = inner.find('}').ok_or_else(|| invalid("unclosed '{'"))?;
            let symbol = &inner[..end];
            rest = &inner[end + 1..];

            let token = if symbol.is_empty() {
                return Err(invalid("empty symbol"));
            } else if symbol.eq_ignore_ascii_case("X") {
                CostToken::Wildcard
            } else if symbol.chars().all(|c| c.is_ascii_digit()) {
                CostToken::Generic(symbol.parse().map_err(|_| invalid("pip out of range"))?)
            } else {
                CostToken::Attribute(symbol.to_string())
            };
            tokens.push(token);
        }

        Ok(Self { tokens })
    }
}

impl TryFrom<String> for Cost {
    type Error = CardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Cost> for String {
    fn from(cost: Cost) -> Self {
        cost.to_string()
    }
}

/// Strip every character that is neither alphanumeric nor whitespace
pub fn normalize_name(name: &str) -> String {
    static PUNCTUATION: OnceLock<Regex> = OnceLock::new();
    let regex = PUNCTUATION.get_or_init(|| Regex::new(r"[^\w\s]|_").unwrap());
    regex.replace_all(name, "").into_owned()
}

/// Searchable text fields of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardField {
    CardId,
    Name,
    NameWithoutPunctuation,
    AbilityText,
    Race,
    CardType,
    Rarity,
    Divinity,
    Cost,
}

/// Nullable numeric fields of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatField {
    Atk,
    Def,
}

/// A card record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub card_id: CardId,
    pub name: String,
    #[serde(default)]
    pub name_without_punctuation: String,
    #[serde(default)]
    pub ability_texts: Vec<String>,
    #[serde(default, rename = "ATK")]
    pub atk: Option<i64>,
    #[serde(default, rename = "DEF")]
    pub def: Option<i64>,
    #[serde(default)]
    pub cost: Cost,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub divinity: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub races: Vec<String>,
}

impl Card {
    /// Create a card with an empty cost and no text, types or races
    pub fn new(card_id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            card_id: CardId::new(card_id),
            name_without_punctuation: normalize_name(&name),
            name,
            ability_texts: Vec::new(),
            atk: None,
            def: None,
            cost: Cost::default(),
            rarity: String::new(),
            divinity: None,
            types: Vec::new(),
            races: Vec::new(),
        }
    }

    pub fn with_cost(mut self, cost: Cost) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_ability(mut self, text: impl Into<String>) -> Self {
        self.ability_texts.push(text.into());
        self
    }

    pub fn with_stats(mut self, atk: Option<i64>, def: Option<i64>) -> Self {
        self.atk = atk;
        self.def = def;
        self
    }

    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = rarity.into();
        self
    }

    pub fn with_divinity(mut self, divinity: impl Into<String>) -> Self {
        self.divinity = Some(divinity.into());
        self
    }

    pub fn with_type(mut self, card_type: impl Into<String>) -> Self {
        self.types.push(card_type.into());
        self
    }

    pub fn with_race(mut self, race: impl Into<String>) -> Self {
        self.races.push(race.into());
        self
    }

    /// Fill in the normalized name when the source record left it empty
    pub fn normalized(mut self) -> Self {
        if self.name_without_punctuation.is_empty() {
            self.name_without_punctuation = normalize_name(&self.name);
        }
        self
    }

    pub fn total_cost(&self) -> u64 {
        self.cost.total()
    }

    /// Every value stored under a text field; multi-valued fields yield one entry per value
    pub fn text_values(&self, field: CardField) -> Vec<Cow<'_, str>> {
        match field {
            CardField::CardId => vec![Cow::Borrowed(self.card_id.as_str())],
            CardField::Name => vec![Cow::Borrowed(self.name.as_str())],
            CardField::NameWithoutPunctuation => {
                vec![Cow::Borrowed(self.name_without_punctuation.as_str())]
            }
            CardField::AbilityText => self
                .ability_texts
                .iter()
                .map(|t| Cow::Borrowed(t.as_str()))
                .collect(),
            CardField::Race => self.races.iter().map(|r| Cow::Borrowed(r.as_str())).collect(),
            CardField::CardType => self.types.iter().map(|t| Cow::Borrowed(t.as_str())).collect(),
            CardField::Rarity => vec![Cow::Borrowed(self.rarity.as_str())],
            CardField::Divinity => self
                .divinity
                .iter()
                .map(|d| Cow::Borrowed(d.as_str()))
                .collect(),
            CardField::Cost => vec![Cow::Owned(self.cost.to_string())],
        }
    }

    pub fn stat(&self, field: StatField) -> Option<i64> {
        match field {
            StatField::Atk => self.atk,
            StatField::Def => self.def,
        }
    }
}
