// Contracts, stage codes, and extendability rules.

use serde::{Deserialize, Serialize};

/// Where a player's contract sits in its lifecycle.
///
/// Stage codes come in from league-management exports as loose strings:
/// "1st", "2nd", "3rd", an explicit 4-digit guaranteed year ("2027"), or
/// legacy/empty values from older seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStage {
    First,
    Second,
    Third,
    /// A guaranteed deal through the given season. No extension path.
    Guaranteed(u16),
    /// Legacy or empty stage code; treated as extendable.
    Legacy,
}

impl ContractStage {
    /// Parse a raw stage code string.
    ///
    /// A 4-digit number is an explicit guaranteed year; anything not
    /// recognized falls back to `Legacy` rather than failing, since old
    /// league exports carry all kinds of junk in this column.
    pub fn parse(code: &str) -> ContractStage {
        match code.trim().to_lowercase().as_str() {
            "1st" => ContractStage::First,
            "2nd" => ContractStage::Second,
            "3rd" => ContractStage::Third,
            other => {
                if other.len() == 4 {
                    if let Ok(year) = other.parse::<u16>() {
                        return ContractStage::Guaranteed(year);
                    }
                }
                ContractStage::Legacy
            }
        }
    }

    /// Whether a contract at this stage can still be extended.
    ///
    /// Guaranteed deals have no extension path, and a 3rd-year contract is
    /// in its final keeper season. 1st/2nd year and legacy codes extend.
    pub fn extendable(&self) -> bool {
        match self {
            ContractStage::First | ContractStage::Second | ContractStage::Legacy => true,
            ContractStage::Third | ContractStage::Guaranteed(_) => false,
        }
    }
}

impl Default for ContractStage {
    fn default() -> Self {
        ContractStage::Legacy
    }
}

/// A player's keeper contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Auction salary in league currency units.
    pub salary: f64,
    /// Seasons left on the current deal, including the upcoming one.
    pub years_remaining: u8,
    #[serde(default)]
    pub stage: ContractStage,
    /// Explicit keeper designation from the league platform.
    #[serde(default)]
    pub keeper: bool,
}

impl Contract {
    pub fn extendable(&self) -> bool {
        self.stage.extendable()
    }
}
