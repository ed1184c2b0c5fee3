//! # Partition Catalogue
//!
//! The six independently keyed ledger namespaces. Partition `N` is served by
//! channel `channelN` running contract `basic_channelN`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PartitionParseError;

/// One ledger partition, numbered 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Partition {
    /// Drilling site to refinery.
    DrillToRefinery = 1,
    /// Refinery to storage facility.
    RefineryToStorage = 2,
    /// Storage to factory (even units).
    StorageToFactory = 3,
    /// Storage to oil pump (odd units).
    StorageToPump = 4,
    /// Oil pump to end customer.
    PumpToCustomer = 5,
    /// Main chain holding the aggregate records.
    MainChain = 6,
}

impl Partition {
    /// Every partition in channel order.
    pub const ALL: [Partition; 6] = [
        Partition::DrillToRefinery,
        Partition::RefineryToStorage,
        Partition::StorageToFactory,
        Partition::StorageToPump,
        Partition::PumpToCustomer,
        Partition::MainChain,
    ];

    /// The five per-stage partitions (everything except the main chain).
    pub const STAGES: [Partition; 5] = [
        Partition::DrillToRefinery,
        Partition::RefineryToStorage,
        Partition::StorageToFactory,
        Partition::StorageToPump,
        Partition::PumpToCustomer,
    ];

    /// Channel number (1..=6).
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Look a partition up by channel number.
    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.number() == number)
    }

    /// Ledger channel name, e.g. `channel3`.
    pub fn channel_name(self) -> String {
        format!("channel{}", self.number())
    }

    /// Contract deployed on the channel, e.g. `basic_channel3`.
    pub fn contract_name(self) -> String {
        format!("basic_channel{}", self.number())
    }

    /// Human readable label used by the operator menu.
    pub fn label(self) -> &'static str {
        match self {
            Partition::DrillToRefinery => "Driller to Refinery",
            Partition::RefineryToStorage => "Refinery to Storage",
            Partition::StorageToFactory => "Storage to Factory",
            Partition::StorageToPump => "Storage to Oil Pumps",
            Partition::PumpToCustomer => "Pumps to Customer",
            Partition::MainChain => "Main Chain",
        }
    }

    /// Whether this partition holds aggregate records.
    pub fn is_main_chain(self) -> bool {
        self == Partition::MainChain
    }

    /// Storage partition a unit is routed to, chosen by unit parity.
    pub fn storage_for_unit(unit_index: usize) -> Self {
        if unit_index % 2 == 0 {
            Partition::StorageToFactory
        } else {
            Partition::StorageToPump
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.channel_name())
    }
}

impl FromStr for Partition {
    type Err = PartitionParseError;

    /// Accepts `"3"` or `"channel3"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("channel").unwrap_or(trimmed);
        let number: u8 = digits
            .parse()
            .map_err(|_| PartitionParseError::Unrecognized(trimmed.to_string()))?;
        Self::from_number(number).ok_or(PartitionParseError::OutOfRange(number))
    }
}
